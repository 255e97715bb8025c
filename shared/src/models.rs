use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data, keyed by trading date.
///
/// Prices are validated at ingest (finite, close > 0); volume is a share
/// count and cannot be negative by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A derived series aligned one-to-one with the bars it was computed from.
///
/// `values[i]` is `None` where the rolling window had insufficient history;
/// that is expected data, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub parameters: serde_json::Value,
    pub values: Vec<Option<f64>>,
}
