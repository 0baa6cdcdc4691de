//! Outcome of one scheduled run

use crate::api::coinmarketcap::ApiError;
use crate::utils::errors::ExportError;

/// What happened on a single tick. Every variant is a normal return;
/// none of them stop the scheduler.
#[derive(Debug)]
pub enum JobOutcome {
    /// Workbook rewritten with `rows` assets
    Exported { rows: usize },
    /// Report printed but the workbook could not be written
    ExportFailed { rows: usize, error: ExportError },
    /// API returned no records; workbook left untouched
    NoData,
    /// Request failed; nothing downstream ran
    FetchFailed(ApiError),
}

impl JobOutcome {
    /// One-line summary for the run log
    pub fn describe(&self) -> String {
        match self {
            JobOutcome::Exported { rows } => format!("Exported {} rows", rows),
            JobOutcome::ExportFailed { rows, error } => {
                format!("Analyzed {} rows, workbook not written: {}", rows, error)
            }
            JobOutcome::NoData => "No data, workbook left as is".to_string(),
            JobOutcome::FetchFailed(e) => format!("Fetch failed: {}", e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Exported { .. })
    }
}
