use remoting::MethodRegistry;
use remoting::descriptor::{ArgSource, ArgSpec, ArgType, MethodDescriptor, ReturnSpec};
use remoting::marshal::{BoxError, sync_handler};
use remoting::http::Method;
use remoting::value::RemoteValue;

/// `GET /add/:a?b=2` → `{"sum": 3}`
pub fn register(registry: &mut MethodRegistry) -> Result<u64, BoxError> {
    let descriptor = MethodDescriptor::builder("add")
        .accepts(ArgSpec::new("a", ArgType::Number, ArgSource::Path).required())
        .accepts(ArgSpec::new("b", ArgType::Number, ArgSource::Query).required())
        .returns(ReturnSpec::new("sum", ArgType::Number))
        .verb(Method::GET)
        .path("/add/:a")
        .build()?;

    let id = registry.register(
        descriptor,
        sync_handler(|args| {
            let sum = args.number(0).unwrap_or_default() + args.number(1).unwrap_or_default();
            Ok(vec![RemoteValue::from(sum)])
        }),
    )?;
    Ok(id)
}
