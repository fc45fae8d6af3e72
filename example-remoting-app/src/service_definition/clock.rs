use chrono::Utc;
use remoting::MethodRegistry;
use remoting::descriptor::{ArgSource, ArgSpec, ArgType, MethodDescriptor, ReturnSpec};
use remoting::http::Method;
use remoting::marshal::{BoxError, RemoteError, handler};
use remoting::value::RemoteValue;
use std::time::Duration;

/// Longest delay a caller may ask for.
const MAX_DELAY_MS: f64 = 10_000.0;

/// `GET /clock/now?delayMs=250` → `{"now": "<ISO-8601>", "delayed": 250}`
///
/// Completes from a spawned task after the requested delay.
pub fn register(registry: &mut MethodRegistry) -> Result<u64, BoxError> {
    let descriptor = MethodDescriptor::builder("clock.now")
        .accepts(
            ArgSpec::new("delay", ArgType::Number, ArgSource::Query)
                .with_wire_name("delayMs")
                .with_description("Milliseconds to wait before answering"),
        )
        .returns(ReturnSpec::new("now", ArgType::Date))
        .returns(ReturnSpec::new("delayed", ArgType::Number))
        .verb(Method::GET)
        .path("/clock/now")
        .build()?;

    let id = registry.register(
        descriptor,
        handler(|args, completion| {
            let delay = args.number(0).unwrap_or(0.0);
            if !(0.0..=MAX_DELAY_MS).contains(&delay) {
                return Err(RemoteError::new(format!(
                    "delayMs must be between 0 and {MAX_DELAY_MS}"
                ))
                .with_status(remoting::http::StatusCode::UNPROCESSABLE_ENTITY)
                .into());
            }

            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(delay as u64)).await;
                completion.resolve(vec![
                    RemoteValue::Date(Utc::now()),
                    RemoteValue::from(delay),
                ]);
            });
            Ok(())
        }),
    )?;
    Ok(id)
}
