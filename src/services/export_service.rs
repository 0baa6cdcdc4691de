use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::models::{AnalysisSummary, AssetRow};
use crate::utils::errors::ExportError;

pub const DATA_SHEET: &str = "Crypto Data";
pub const SUMMARY_SHEET: &str = "Analysis Summary";
pub const TOP5_SHEET: &str = "Top 5";

/// Write the table and its summary to a three-sheet workbook at `path`,
/// replacing whatever was there before.
pub fn persist(table: &[AssetRow], summary: &AnalysisSummary, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    write_asset_sheet(workbook.add_worksheet(), DATA_SHEET, table, &header)?;
    write_summary_sheet(workbook.add_worksheet(), summary, &header)?;
    write_asset_sheet(workbook.add_worksheet(), TOP5_SHEET, &summary.top5, &header)?;

    workbook.save(path)?;
    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

fn write_asset_sheet(
    sheet: &mut Worksheet,
    name: &str,
    rows: &[AssetRow],
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(name)?;

    for (col, title) in AssetRow::HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        write_opt_string(sheet, r, 0, row.name.as_deref())?;
        write_opt_string(sheet, r, 1, row.symbol.as_deref())?;
        write_opt_number(sheet, r, 2, row.price)?;
        write_opt_number(sheet, r, 3, row.market_cap)?;
        write_opt_number(sheet, r, 4, row.volume_24h)?;
        write_opt_number(sheet, r, 5, row.percent_change_24h)?;
    }

    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    summary: &AnalysisSummary,
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(SUMMARY_SHEET)?;
    sheet.write_string_with_format(0, 0, "Metric", header)?;
    sheet.write_string_with_format(0, 1, "Value", header)?;

    let metrics = [
        ("Average Price (USD)", summary.average_price),
        ("Highest 24h % Change", summary.max_percent_change_24h),
        ("Lowest 24h % Change", summary.min_percent_change_24h),
    ];

    for (i, (metric, value)) in metrics.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, *metric)?;
        write_opt_number(sheet, r, 1, *value)?;
    }

    Ok(())
}

// Missing values stay as empty cells

fn write_opt_string(sheet: &mut Worksheet, row: u32, col: u16, value: Option<&str>) -> Result<(), XlsxError> {
    if let Some(v) = value {
        sheet.write_string(row, col, v)?;
    }
    Ok(())
}

fn write_opt_number(sheet: &mut Worksheet, row: u32, col: u16, value: Option<f64>) -> Result<(), XlsxError> {
    if let Some(v) = value {
        sheet.write_number(row, col, v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis_service::summarize;
    use calamine::{open_workbook, Data, Reader, Xlsx};

    fn row(name: &str, symbol: &str, price: f64, market_cap: f64, volume: f64, change: f64) -> AssetRow {
        AssetRow {
            name: Some(name.to_string()),
            symbol: Some(symbol.to_string()),
            price: Some(price),
            market_cap: Some(market_cap),
            volume_24h: Some(volume),
            percent_change_24h: Some(change),
        }
    }

    fn header_row(range: &calamine::Range<Data>) -> Vec<String> {
        range.rows().next().unwrap().iter().map(|c| c.to_string()).collect()
    }

    fn float_at(range: &calamine::Range<Data>, row: usize, col: usize) -> Option<f64> {
        match range.get((row, col)) {
            Some(Data::Float(f)) => Some(*f),
            _ => None,
        }
    }

    #[test]
    fn test_three_sheets_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("excel").join("live_data.xlsx");
        let table = vec![
            row("Bitcoin", "BTC", 50000.0, 900e9, 20e9, 2.5),
            row("Ethereum", "ETH", 3000.0, 350e9, 10e9, -1.2),
        ];
        let summary = summarize(&table).unwrap();

        persist(&table, &summary, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![DATA_SHEET, SUMMARY_SHEET, TOP5_SHEET]);

        let asset_headers: Vec<String> = AssetRow::HEADERS.iter().map(|h| h.to_string()).collect();

        let data = workbook.worksheet_range(DATA_SHEET).unwrap();
        assert_eq!(header_row(&data), asset_headers);
        assert_eq!(data.height(), 3);
        assert_eq!(data.get((1, 0)).unwrap().to_string(), "Bitcoin");
        assert_eq!(float_at(&data, 2, 5), Some(-1.2));

        let summary_sheet = workbook.worksheet_range(SUMMARY_SHEET).unwrap();
        assert_eq!(header_row(&summary_sheet), vec!["Metric", "Value"]);
        assert_eq!(summary_sheet.get((1, 0)).unwrap().to_string(), "Average Price (USD)");
        assert_eq!(float_at(&summary_sheet, 1, 1), Some(26500.0));
        assert_eq!(float_at(&summary_sheet, 2, 1), Some(2.5));
        assert_eq!(float_at(&summary_sheet, 3, 1), Some(-1.2));

        let top = workbook.worksheet_range(TOP5_SHEET).unwrap();
        assert_eq!(header_row(&top), asset_headers);
        assert_eq!(top.height(), 3);
    }

    #[test]
    fn test_missing_values_written_as_blank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.xlsx");
        let table = vec![AssetRow {
            name: Some("Ghost".to_string()),
            ..Default::default()
        }];
        let summary = summarize(&table).unwrap();

        persist(&table, &summary, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let data = workbook.worksheet_range(DATA_SHEET).unwrap();
        assert_eq!(data.get((1, 0)).unwrap().to_string(), "Ghost");
        assert_eq!(float_at(&data, 1, 2), None);
        assert_eq!(float_at(&data, 1, 3), None);
    }

    #[test]
    fn test_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_data.xlsx");

        let first: Vec<AssetRow> = (0..4)
            .map(|i| row(&format!("c{}", i), "C", 1.0, i as f64, 1.0, 0.0))
            .collect();
        persist(&first, &summarize(&first).unwrap(), &path).unwrap();

        let second = vec![row("Bitcoin", "BTC", 50000.0, 900e9, 20e9, 2.5)];
        persist(&second, &summarize(&second).unwrap(), &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let data = workbook.worksheet_range(DATA_SHEET).unwrap();
        assert_eq!(data.height(), 2);
        assert_eq!(data.get((1, 0)).unwrap().to_string(), "Bitcoin");
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("excel");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("live_data.xlsx");

        let table = vec![row("Bitcoin", "BTC", 50000.0, 900e9, 20e9, 2.5)];
        let result = persist(&table, &summarize(&table).unwrap(), &path);

        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
