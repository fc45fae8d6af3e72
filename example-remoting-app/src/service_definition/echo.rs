use remoting::MethodRegistry;
use remoting::descriptor::MethodDescriptor;
use remoting::marshal::{BoxError, sync_handler};
use remoting::value::RemoteValue;
use serde_json::json;

/// `POST /echo` with a JSON object body → the same object. Dates sent as
/// `{"$type": "date", "$data": ...}` come back as ISO-8601 strings.
pub fn register(registry: &mut MethodRegistry) -> Result<u64, BoxError> {
    let descriptor = MethodDescriptor::from_declaration(
        "echo",
        &json!({
            "accepts": { "arg": "data", "type": "object", "http": { "source": "body" } },
            "returns": { "arg": "data", "type": "object", "root": true },
            "http": { "verb": "post", "path": "/echo" }
        }),
    )?;

    let id = registry.register(
        descriptor,
        sync_handler(|args| Ok(vec![args.get(0).cloned().unwrap_or(RemoteValue::Null)])),
    )?;
    Ok(id)
}
