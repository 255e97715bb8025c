// Relative Strength Index (RSI) indicator implementation
//
// Average gain and average loss are plain rolling means over the trailing
// `period` deltas (the same window rule as the SMA), so the oscillator is
// defined from position `period` onward: one delta is consumed before the
// first window fills.
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{IndicatorSeries, PriceBar};

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::InvalidParameter(
                "RSI period must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            name: format!("RSI({})", period),
            period,
        })
    }

    // A window with no losses reads 100 rather than dividing by zero. A
    // window with no movement at all reads neutral, 50 (convention; the
    // raw ratio would be 0/0).
    fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        }
    }

    fn rolling_rsi(&self, data: &[PriceBar]) -> Vec<Option<f64>> {
        // `period` deltas are needed before the first value, and the series
        // only has `len - 1` of them.
        if data.len() <= self.period {
            return vec![None; data.len()];
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);
        for pair in data.windows(2) {
            let delta = pair[1].close - pair[0].close;
            gains.push(if delta > 0.0 { delta } else { 0.0 });
            losses.push(if delta < 0.0 { -delta } else { 0.0 });
        }

        let n = self.period as f64;
        let mut values = vec![None; self.period];

        let mut gain_sum: f64 = gains[..self.period].iter().sum();
        let mut loss_sum: f64 = losses[..self.period].iter().sum();
        values.push(Some(Self::rsi_value(gain_sum / n, loss_sum / n)));

        for i in self.period..gains.len() {
            // Sliding subtraction can leave a tiny negative residue.
            gain_sum = (gain_sum - gains[i - self.period] + gains[i]).max(0.0);
            loss_sum = (loss_sum - losses[i - self.period] + losses[i]).max(0.0);
            values.push(Some(Self::rsi_value(gain_sum / n, loss_sum / n)));
        }
        values
    }
}

impl IndicatorCalculator for Rsi {
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
            values: self.rolling_rsi(data),
        }]
    }
}
