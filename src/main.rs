use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod scheduler;
mod services;
mod utils;

use api::coinmarketcap::CoinMarketCapClient;
use config::Settings;
use scheduler::Scheduler;
use services::pipeline_service;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("cryptosheet=debug".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting cryptosheet...");
    info!("  Live CoinMarketCap top-{} snapshot → Excel", CoinMarketCapClient::LIMIT);
    info!("");

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    if settings.api_key.is_empty() {
        warn!("API_KEY is not set; the API will reject requests");
    }
    info!("Listings endpoint: {}", settings.api_url);
    info!("Workbook path: {}", settings.output_path.display());

    let client = match CoinMarketCapClient::new(&settings) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };
    let scheduler = Scheduler::new(settings.refresh_interval);

    let client = &client;
    let output_path = settings.output_path.as_path();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let runs = scheduler
        .run(
            move || async move {
                let outcome = pipeline_service::run_job(client, output_path).await;
                if outcome.is_success() {
                    info!("Run result: {}", outcome.describe());
                } else {
                    warn!("Run result: {}", outcome.describe());
                }
            },
            shutdown,
        )
        .await;

    info!("Completed {} runs, exiting", runs);
}
