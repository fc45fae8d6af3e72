pub mod service_definition;

use remoting::MethodRegistry;
use remoting::marshal::BoxError;

/// Registers every demo method.
pub fn build_registry() -> Result<MethodRegistry, BoxError> {
    let mut registry = MethodRegistry::new();
    service_definition::add::register(&mut registry)?;
    service_definition::echo::register(&mut registry)?;
    service_definition::clock::register(&mut registry)?;
    Ok(registry)
}
