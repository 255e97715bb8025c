// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{IndicatorSeries, PriceBar};

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::InvalidParameter(
                "SMA period must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            name: format!("SMA({})", period),
            period,
        })
    }

    /// Rolling mean of close prices. The first `period - 1` positions have
    /// no value; a series shorter than `period` yields no values at all.
    fn rolling_mean(&self, data: &[PriceBar]) -> Vec<Option<f64>> {
        if data.len() < self.period {
            return vec![None; data.len()];
        }

        let mut values = vec![None; self.period - 1];

        // Seed the first window, then slide it one bar at a time.
        let mut sum: f64 = data.iter().take(self.period).map(|b| b.close).sum();
        values.push(Some(sum / self.period as f64));

        for i in self.period..data.len() {
            sum = sum - data[i - self.period].close + data[i].close;
            values.push(Some(sum / self.period as f64));
        }
        values
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PriceBar]) -> Vec<IndicatorSeries> {
        vec![IndicatorSeries {
            name: self.name.clone(),
            parameters: self.parameters(),
            values: self.rolling_mean(data),
        }]
    }
}
