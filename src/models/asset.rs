//! Normalized asset rows

/// One asset projected onto the fixed spreadsheet columns.
/// `None` marks a value the API did not send.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetRow {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub percent_change_24h: Option<f64>,
}

/// Rows in the API's ranking order, one per fetched record
pub type AssetTable = Vec<AssetRow>;

impl AssetRow {
    /// Column titles shared by the data and top-5 sheets
    pub const HEADERS: [&'static str; 6] = [
        "Name",
        "Symbol",
        "Price (USD)",
        "Market Cap",
        "Volume 24h",
        "Percent Change 24h",
    ];

    pub fn name_or_blank(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn symbol_or_blank(&self) -> &str {
        self.symbol.as_deref().unwrap_or("")
    }
}
