// Engine main entry point
use engine::config::settings::EngineSettings;
use engine::data::market_data::PriceSeriesStore;
use engine::services::analysis_service::AnalysisService;
use engine::services::AnalysisEngineServer;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    info!("Starting stock analysis engine...");

    let settings = EngineSettings::from_env();
    let addr = format!("{}:{}", settings.host, settings.port).parse()?;
    info!("Engine will listen on {}", addr);

    let store = Arc::new(RwLock::new(PriceSeriesStore::new()));
    let analysis_service = AnalysisService::new(store.clone());

    Server::builder()
        .add_service(AnalysisEngineServer::new(analysis_service))
        .serve(addr)
        .await?;

    Ok(())
}
