use example_remoting_app::build_registry;
use remoting::marshal::BoxError;
use remoting::{RemotingConfig, RemotingEngine};
use remoting_axum_server::RemotingServer;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    let engine = RemotingEngine::new(build_registry()?, RemotingConfig::from_env());
    for method in engine.registry().iter() {
        let route = method.descriptor.http();
        let verb = route.verb.as_ref().map_or("ALL", |verb| verb.as_str());
        tracing::info!(method = method.descriptor.name(), %verb, path = %route.path, "exposing");
    }

    // Try:
    //   curl 'http://127.0.0.1:3000/add/1?b=2'
    //   curl -X POST -H 'content-type: application/json' -d '{"at":{"$type":"date","$data":"2024-01-01T00:00:00Z"}}' http://127.0.0.1:3000/echo
    //   curl 'http://127.0.0.1:3000/clock/now?delayMs=250'
    RemotingServer::new(engine).serve_on("127.0.0.1", port).await?;
    Ok(())
}
