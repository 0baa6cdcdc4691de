//! Per-run analysis results

use super::AssetRow;

/// Statistics derived from one asset table
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Mean over rows that carry a price
    pub average_price: Option<f64>,
    pub max_percent_change_24h: Option<f64>,
    pub min_percent_change_24h: Option<f64>,
    /// At most five rows, largest market cap first
    pub top5: Vec<AssetRow>,
}
