//! Price file loading.
//!
//! Prices come as a wide CSV: a `date` column followed by one column of
//! closing prices per ticker. An empty cell means the ticker has no close
//! on that date.
//!
//! ```text
//! date,AAPL,MSFT
//! 2024-01-02,185.64,370.87
//! 2024-01-03,184.25,
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use vantage_core::{PricePoint, PriceSeries, Ticker};

use crate::error::{CliError, CliResult};

/// Contents of a price file.
#[derive(Debug, Clone)]
pub struct PriceFile {
    /// Closing price histories.
    pub prices: PriceSeries,
    /// Tickers with at least one close, in header order.
    pub columns: Vec<Ticker>,
}

/// Reads a wide price CSV.
pub fn load_prices(path: &Path) -> CliResult<PriceFile> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_prices(reader, path)
}

fn read_prices<R: std::io::Read>(mut reader: csv::Reader<R>, path: &Path) -> CliResult<PriceFile> {
    let bad = |reason: String| CliError::PriceFile {
        path: path.to_path_buf(),
        reason,
    };

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(bad("expected a date column and at least one ticker column".into()));
    }

    let tickers = headers
        .iter()
        .skip(1)
        .map(Ticker::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| bad(e.to_string()))?;

    let mut points: BTreeMap<&Ticker, Vec<PricePoint>> = BTreeMap::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let raw_date = record.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| bad(format!("row {}: invalid date '{raw_date}'", line + 2)))?;

        for (ticker, cell) in tickers.iter().zip(record.iter().skip(1)) {
            if cell.is_empty() {
                continue;
            }
            let close: f64 = cell.parse().map_err(|_| {
                bad(format!("row {}: invalid price '{cell}' for {ticker}", line + 2))
            })?;
            points.entry(ticker).or_default().push(PricePoint::new(date, close));
        }
    }

    let mut series = PriceSeries::new();
    let mut columns = Vec::with_capacity(tickers.len());
    for ticker in &tickers {
        let mut history = points.remove(ticker).unwrap_or_default();
        if history.is_empty() {
            debug!(%ticker, "ticker has no prices");
            continue;
        }
        history.sort_by_key(|p| p.date);
        series
            .insert(ticker.clone(), history)
            .map_err(|e| bad(format!("{ticker}: {e}")))?;
        columns.push(ticker.clone());
    }

    debug!(
        path = %path.display(),
        tickers = series.len(),
        "loaded price file"
    );
    Ok(PriceFile {
        prices: series,
        columns,
    })
}
