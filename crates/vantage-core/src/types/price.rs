//! Daily closing price histories and date alignment.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Ticker;
use crate::error::{RiskError, RiskResult};

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Closing price histories keyed by ticker.
///
/// Each history is strictly increasing in date and holds only finite,
/// positive closes. Histories may cover different dates; [`PriceSeries::align`]
/// inner-joins them onto the dates every ticker has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    series: BTreeMap<Ticker, Vec<PricePoint>>,
}

impl PriceSeries {
    /// Creates an empty price series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) the history of one ticker.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] if the dates are not strictly
    /// increasing or a close is not a finite positive number.
    pub fn insert(&mut self, ticker: Ticker, points: Vec<PricePoint>) -> RiskResult<()> {
        for window in points.windows(2) {
            if window[1].date <= window[0].date {
                return Err(RiskError::invalid_input(format!(
                    "prices for {ticker} are not in chronological order at {}",
                    window[1].date
                )));
            }
        }
        if let Some(bad) = points.iter().find(|p| !(p.close.is_finite() && p.close > 0.0)) {
            return Err(RiskError::invalid_input(format!(
                "close for {ticker} on {} must be positive, got {}",
                bad.date, bad.close
            )));
        }
        self.series.insert(ticker, points);
        Ok(())
    }

    /// Inserts a history from parallel date and close slices.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length or the history is invalid.
    pub fn insert_closes(
        &mut self,
        ticker: Ticker,
        dates: &[NaiveDate],
        closes: &[f64],
    ) -> RiskResult<()> {
        if dates.len() != closes.len() {
            return Err(RiskError::invalid_input(format!(
                "{ticker}: {} dates but {} closes",
                dates.len(),
                closes.len()
            )));
        }
        let points = dates
            .iter()
            .zip(closes)
            .map(|(&date, &close)| PricePoint::new(date, close))
            .collect();
        self.insert(ticker, points)
    }

    /// Builder-style variant of [`PriceSeries::insert`].
    ///
    /// # Errors
    ///
    /// See [`PriceSeries::insert`].
    pub fn with_series(mut self, ticker: Ticker, points: Vec<PricePoint>) -> RiskResult<Self> {
        self.insert(ticker, points)?;
        Ok(self)
    }

    /// History of one ticker.
    pub fn get(&self, ticker: &str) -> Option<&[PricePoint]> {
        self.series.get(ticker).map(Vec::as_slice)
    }

    /// Returns true if the ticker has a history.
    pub fn contains(&self, ticker: &str) -> bool {
        self.series.contains_key(ticker)
    }

    /// Tickers in ascending order.
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.series.keys()
    }

    /// Iterates over `(ticker, history)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, &[PricePoint])> {
        self.series.iter().map(|(t, p)| (t, p.as_slice()))
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if no ticker has a history.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Restricts every history to the inclusive date range.
    ///
    /// `None` leaves that side of the range open.
    #[must_use]
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let in_range = |d: NaiveDate| start.map_or(true, |s| d >= s) && end.map_or(true, |e| d <= e);
        let series = self
            .series
            .iter()
            .map(|(t, points)| {
                let kept = points.iter().copied().filter(|p| in_range(p.date)).collect();
                (t.clone(), kept)
            })
            .collect();
        Self { series }
    }

    /// Keeps only the requested tickers.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientData`] for a ticker with no history.
    pub fn select(&self, tickers: &[Ticker]) -> RiskResult<Self> {
        let mut series = BTreeMap::new();
        for ticker in tickers {
            let points = self.series.get(ticker).ok_or_else(|| {
                RiskError::insufficient_data(format!("price history of {ticker}"), 2, 0)
            })?;
            series.insert(ticker.clone(), points.clone());
        }
        Ok(Self { series })
    }

    /// Inner-joins all histories on date.
    ///
    /// Dates missing from any ticker are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientData`] if the series is empty.
    pub fn align(&self) -> RiskResult<AlignedPrices> {
        let mut histories = self.series.values();
        let first = histories
            .next()
            .ok_or_else(|| RiskError::insufficient_data("price series tickers", 1, 0))?;

        let mut common: BTreeSet<NaiveDate> = first.iter().map(|p| p.date).collect();
        for points in histories {
            let dates: BTreeSet<NaiveDate> = points.iter().map(|p| p.date).collect();
            common.retain(|d| dates.contains(d));
        }

        let union: BTreeSet<NaiveDate> = self
            .series
            .values()
            .flat_map(|points| points.iter().map(|p| p.date))
            .collect();

        let tickers: Vec<Ticker> = self.series.keys().cloned().collect();
        let closes: Vec<Vec<f64>> = self
            .series
            .values()
            .map(|points| {
                points
                    .iter()
                    .filter(|p| common.contains(&p.date))
                    .map(|p| p.close)
                    .collect()
            })
            .collect();

        debug!(
            tickers = tickers.len(),
            aligned_dates = common.len(),
            dropped_dates = union.len() - common.len(),
            "aligned price histories"
        );

        Ok(AlignedPrices {
            dates: common.into_iter().collect(),
            tickers,
            closes,
        })
    }
}

/// Price histories sharing one date axis.
///
/// `closes[i][t]` is the close of `tickers[i]` on `dates[t]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPrices {
    dates: Vec<NaiveDate>,
    tickers: Vec<Ticker>,
    closes: Vec<Vec<f64>>,
}

impl AlignedPrices {
    /// Common trading dates in ascending order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Tickers in column order.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Closes of the ticker at column `index`.
    pub fn closes(&self, index: usize) -> Option<&[f64]> {
        self.closes.get(index).map(Vec::as_slice)
    }

    /// Closes of a ticker by name.
    pub fn closes_of(&self, ticker: &str) -> Option<&[f64]> {
        let idx = self.tickers.iter().position(|t| t.as_str() == ticker)?;
        self.closes(idx)
    }

    /// Number of aligned dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if no date is shared by every ticker.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    #[test]
    fn test_insert_rejects_unordered_dates() {
        let mut ps = PriceSeries::new();
        let err = ps
            .insert_closes(t("AAA"), &[d(2), d(1)], &[10.0, 11.0])
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidInput { .. }));
    }

    #[test]
    fn test_insert_rejects_non_positive_close() {
        let mut ps = PriceSeries::new();
        assert!(ps.insert_closes(t("AAA"), &[d(1), d(2)], &[10.0, 0.0]).is_err());
        assert!(ps
            .insert_closes(t("AAA"), &[d(1), d(2)], &[10.0, f64::NAN])
            .is_err());
        assert!(ps.insert_closes(t("AAA"), &[d(1)], &[10.0, 11.0]).is_err());
    }

    #[test]
    fn test_align_inner_join() {
        let mut ps = PriceSeries::new();
        ps.insert_closes(t("AAA"), &[d(1), d(2), d(3), d(4)], &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        ps.insert_closes(t("BBB"), &[d(1), d(3), d(4), d(5)], &[10.0, 30.0, 40.0, 50.0])
            .unwrap();

        let aligned = ps.align().unwrap();
        assert_eq!(aligned.dates(), &[d(1), d(3), d(4)]);
        assert_eq!(aligned.closes_of("AAA").unwrap(), &[1.0, 3.0, 4.0]);
        assert_eq!(aligned.closes_of("BBB").unwrap(), &[10.0, 30.0, 40.0]);
    }

    #[test]
    fn test_align_empty_series() {
        let err = PriceSeries::new().align().unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_between_is_inclusive() {
        let mut ps = PriceSeries::new();
        ps.insert_closes(t("AAA"), &[d(1), d(2), d(3), d(4)], &[1.0, 2.0, 3.0, 4.0])
            .unwrap();

        let window = ps.between(Some(d(2)), Some(d(3)));
        let dates: Vec<NaiveDate> = window.get("AAA").unwrap().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2), d(3)]);

        let open = ps.between(None, Some(d(1)));
        assert_eq!(open.get("AAA").unwrap().len(), 1);
    }

    #[test]
    fn test_select_missing_ticker() {
        let mut ps = PriceSeries::new();
        ps.insert_closes(t("AAA"), &[d(1), d(2)], &[1.0, 2.0]).unwrap();

        let err = ps.select(&[t("AAA"), t("ZZZ")]).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(err.to_string().contains("ZZZ"));

        let selected = ps.select(&[t("AAA")]).unwrap();
        assert_eq!(selected.len(), 1);
    }
}
