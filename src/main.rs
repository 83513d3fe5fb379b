use actix_web::{HttpServer, web};
use gatekeeper_api::{
    config::SecurityConfig,
    create_base_app,
    services::{AppMetrics, SecurityManager},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Structured logging; control verbosity with RUST_LOG (e.g. RUST_LOG=info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Invalid security configuration aborts startup; denials at runtime are
    // ordinary return values, a broken gate is not.
    let config = SecurityConfig::from_env();
    if let Err(e) = config.validate() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid configuration: {e}"),
        ));
    }

    let security = web::Data::new(SecurityManager::new(config));
    let metrics = web::Data::new(
        AppMetrics::new().map_err(|e| std::io::Error::other(format!("metrics registry: {e}")))?,
    );

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    info!(port, "gatekeeper-api listening");

    HttpServer::new(move || create_base_app(security.clone(), metrics.clone()))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}
