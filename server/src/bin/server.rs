use summery_core::telemetry::init_tracing;
use summery_core::SummeryConfig;
use summery_server::{build_service, serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = SummeryConfig::load();
    let service = build_service(&config)?;

    let addr = config.bind_addr();
    serve(&addr, service).await?;
    Ok(())
}
