use crate::api::coinmarketcap::RawAssetRecord;
use crate::models::{AssetRow, AssetTable};

/// Project raw listings onto spreadsheet rows, one row per record, same order.
///
/// Figures are read from `quote[currency]`; a missing currency entry or leaf
/// leaves the corresponding column empty.
pub fn transform(records: &[RawAssetRecord], currency: &str) -> AssetTable {
    records.iter().map(|record| to_row(record, currency)).collect()
}

fn to_row(record: &RawAssetRecord, currency: &str) -> AssetRow {
    let quote = record.quote.as_ref().and_then(|quotes| quotes.get(currency));

    AssetRow {
        name: record.name.clone(),
        symbol: record.symbol.clone(),
        price: quote.and_then(|q| q.price),
        market_cap: quote.and_then(|q| q.market_cap),
        volume_24h: quote.and_then(|q| q.volume_24h),
        percent_change_24h: quote.and_then(|q| q.percent_change_24h),
    }
}
