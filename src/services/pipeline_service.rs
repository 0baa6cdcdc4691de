use std::path::Path;

use chrono::Local;
use tracing::{error, info, warn};

use crate::api::coinmarketcap::CoinMarketCapClient;
use crate::models::JobOutcome;
use crate::services::{analysis_service, export_service, transform_service};

/// One scheduled run: fetch, transform, analyze, persist.
///
/// Failures are logged and folded into the returned outcome.
pub async fn run_job(client: &CoinMarketCapClient, output_path: &Path) -> JobOutcome {
    info!("Starting job at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let outcome = run_stages(client, output_path).await;
    info!("Job completed.");
    outcome
}

async fn run_stages(client: &CoinMarketCapClient, output_path: &Path) -> JobOutcome {
    let records = match client.fetch_listings().await {
        Ok(records) => records,
        Err(e) => {
            error!("Error fetching data: {}", e);
            return JobOutcome::FetchFailed(e);
        }
    };

    let table = transform_service::transform(&records, CoinMarketCapClient::CONVERT);

    let Some(summary) = analysis_service::analyze(&table) else {
        warn!("No data available to update Excel file.");
        return JobOutcome::NoData;
    };

    match export_service::persist(&table, &summary, output_path) {
        Ok(()) => {
            info!("Excel file updated successfully at '{}'.", output_path.display());
            JobOutcome::Exported { rows: table.len() }
        }
        Err(e) => {
            error!("Error updating Excel file: {}", e);
            JobOutcome::ExportFailed { rows: table.len(), error: e }
        }
    }
}
