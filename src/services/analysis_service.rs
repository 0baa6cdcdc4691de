use std::cmp::Ordering;

use crate::models::{AnalysisSummary, AssetRow};
use crate::utils::{Align, Table};

/// How many rows the market-cap leaderboard keeps
pub const TOP_N: usize = 5;

/// Summarize a table and print the report to the console.
///
/// Returns `None` for an empty table after printing a notice.
pub fn analyze(table: &[AssetRow]) -> Option<AnalysisSummary> {
    let Some(summary) = summarize(table) else {
        println!("No data available for analysis.");
        return None;
    };

    println!("{}", render_report(&summary, table.len()));
    Some(summary)
}

/// Compute the summary without printing anything
pub fn summarize(table: &[AssetRow]) -> Option<AnalysisSummary> {
    if table.is_empty() {
        return None;
    }

    let prices: Vec<f64> = table.iter().filter_map(|r| r.price).collect();
    let average_price = if prices.is_empty() {
        None
    } else {
        Some(prices.iter().sum::<f64>() / prices.len() as f64)
    };

    let changes = table.iter().filter_map(|r| r.percent_change_24h);
    let max_percent_change_24h = changes.clone().reduce(f64::max);
    let min_percent_change_24h = changes.reduce(f64::min);

    Some(AnalysisSummary {
        average_price,
        max_percent_change_24h,
        min_percent_change_24h,
        top5: top_by_market_cap(table, TOP_N),
    })
}

/// Largest market caps first; missing caps last; ties keep table order
pub fn top_by_market_cap(table: &[AssetRow], n: usize) -> Vec<AssetRow> {
    let mut ranked: Vec<&AssetRow> = table.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| match (a.market_cap, b.market_cap) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked.into_iter().take(n).cloned().collect()
}

/// Format the console report for one run
pub fn render_report(summary: &AnalysisSummary, row_count: usize) -> String {
    let mut table = Table::new(&[
        ("Name", Align::Left),
        ("Symbol", Align::Left),
        ("Market Cap", Align::Right),
    ]);
    for row in &summary.top5 {
        table.add_row([
            row.name_or_blank().to_string(),
            row.symbol_or_blank().to_string(),
            row.market_cap.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "n/a".to_string()),
        ]);
    }

    let mut report = String::from("\n===== Analysis =====\n");
    report.push_str("Top 5 Cryptocurrencies by Market Cap:\n");
    report.push_str(&table.render());
    report.push('\n');

    match summary.average_price {
        Some(avg) => report.push_str(&format!(
            "Average Price of Top {} Cryptocurrencies: ${:.2}\n",
            row_count, avg
        )),
        None => report.push_str(&format!(
            "Average Price of Top {} Cryptocurrencies: no data\n",
            row_count
        )),
    }
    report.push_str(&format!(
        "Highest 24h % Price Change: {}\n",
        format_change(summary.max_percent_change_24h)
    ));
    report.push_str(&format!(
        "Lowest 24h % Price Change: {}\n",
        format_change(summary.min_percent_change_24h)
    ));
    report.push_str("====================\n");
    report
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(v) => format!("{:.2}%", v),
        None => "no data".to_string(),
    }
}
