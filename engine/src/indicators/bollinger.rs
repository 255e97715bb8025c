// Bollinger Bands indicator implementation
//
// Middle band is the SMA of closes; upper/lower bands are offset from it by
// `std_dev_multiplier` rolling sample standard deviations (N-1 normalized,
// matching conventional rolling-statistics semantics). Both bands are
// undefined wherever the SMA is undefined.
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{IndicatorSeries, PriceBar};

pub struct BollingerBands {
    name: String,
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// The multiplier must be finite; zero and negative values are accepted
    /// (they collapse or invert the bands, which is well-defined).
    pub fn new(period: usize, std_dev_multiplier: f64) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::InvalidParameter(
                "Bollinger Bands period must be at least 1".to_string(),
            ));
        }
        if !std_dev_multiplier.is_finite() {
            return Err(EngineError::InvalidParameter(format!(
                "Bollinger Bands std-dev multiplier must be finite, got {}",
                std_dev_multiplier
            )));
        }
        Ok(Self {
            name: format!("BB({},{})", period, std_dev_multiplier),
            period,
            std_dev_multiplier,
        })
    }

    /// Rolling mean and sample standard deviation over close prices, one
    /// pass with a sliding sum and sum of squares.
    ///
    /// Sample deviation has N-1 degrees of freedom, so a period of 1 leaves
    /// every deviation undefined even though the mean is defined everywhere.
    fn rolling_stats(&self, data: &[PriceBar]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
        if data.len() < self.period {
            return (vec![None; data.len()], vec![None; data.len()]);
        }

        let n = self.period as f64;
        let mut means = vec![None; self.period - 1];
        let mut deviations = vec![None; self.period - 1];

        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for bar in &data[..self.period] {
            sum += bar.close;
            sum_sq += bar.close * bar.close;
        }
        means.push(Some(sum / n));
        deviations.push(self.sample_std_dev(sum, sum_sq));

        for i in self.period..data.len() {
            let leaving = data[i - self.period].close;
            let entering = data[i].close;
            sum = sum - leaving + entering;
            sum_sq = sum_sq - leaving * leaving + entering * entering;
            means.push(Some(sum / n));
            deviations.push(self.sample_std_dev(sum, sum_sq));
        }
        (means, deviations)
    }

    fn sample_std_dev(&self, sum: f64, sum_sq: f64) -> Option<f64> {
        if self.period < 2 {
            return None;
        }
        let n = self.period as f64;
        // Sliding updates can leave a tiny negative residue in the variance.
        let variance = ((sum_sq - sum * sum / n) / (n - 1.0)).max(0.0);
        Some(variance.sqrt())
    }

    fn offset_band(
        &self,
        means: &[Option<f64>],
        deviations: &[Option<f64>],
        sign: f64,
    ) -> Vec<Option<f64>> {
        means
            .iter()
            .zip(deviations.iter())
            .map(|(mean, dev)| match (mean, dev) {
                (Some(m), Some(d)) => Some(m + sign * self.std_dev_multiplier * d),
                _ => None,
            })
            .collect()
    }
}

impl IndicatorCalculator for BollingerBands {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "period": self.period,
            "std_dev_multiplier": self.std_dev_multiplier,
        })
    }

    fn calculate(&self, data: &[PriceBar]) -> Vec<IndicatorSeries> {
        let (means, deviations) = self.rolling_stats(data);
        vec![
            IndicatorSeries {
                name: format!("BB_UPPER({},{})", self.period, self.std_dev_multiplier),
                parameters: self.parameters(),
                values: self.offset_band(&means, &deviations, 1.0),
            },
            IndicatorSeries {
                name: format!("BB_LOWER({},{})", self.period, self.std_dev_multiplier),
                parameters: self.parameters(),
                values: self.offset_band(&means, &deviations, -1.0),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn create_bars(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000,
            })
            .collect()
    }

    // Reference sample deviation, two-pass, for cross-checking the sliding
    // implementation.
    fn sample_std(window: &[f64]) -> f64 {
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let sum_sq_dev: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
        (sum_sq_dev / (n - 1.0)).sqrt()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{} != {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_bollinger_hand_computed_windows() {
        // Windows of [1,2,3], [2,3,4], [3,4,5] all have sample deviation 1.
        let bars = create_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bb = BollingerBands::new(3, 2.0).unwrap();
        let output = bb.calculate(&bars);
        let upper = &output[0].values;
        let lower = &output[1].values;

        assert_eq!(upper[0], None);
        assert_eq!(upper[1], None);
        assert_close(upper[2].unwrap(), 4.0);
        assert_close(upper[3].unwrap(), 5.0);
        assert_close(upper[4].unwrap(), 6.0);
        assert_close(lower[2].unwrap(), 0.0);
        assert_close(lower[3].unwrap(), 1.0);
        assert_close(lower[4].unwrap(), 2.0);
    }

    #[test]
    fn test_bollinger_constant_series_collapses_to_price() {
        let bars = create_bars(&[100.0; 6]);
        let bb = BollingerBands::new(3, 2.0).unwrap();
        let output = bb.calculate(&bars);
        for i in 2..6 {
            assert_close(output[0].values[i].unwrap(), 100.0);
            assert_close(output[1].values[i].unwrap(), 100.0);
        }
    }

    #[test]
    fn test_bollinger_band_width_property() {
        // upper - lower must equal 2 * multiplier * sample deviation of the
        // window, for every defined position and multiplier.
        let closes = [10.0, 11.0, 12.0, 11.0, 10.0, 12.5, 13.0];
        let bars = create_bars(&closes);
        let period = 3;
        for multiplier in [1.0, 1.5, 2.0, 4.0] {
            let bb = BollingerBands::new(period, multiplier).unwrap();
            let output = bb.calculate(&bars);
            for i in (period - 1)..closes.len() {
                let window = &closes[i + 1 - period..=i];
                let expected_width = 2.0 * multiplier * sample_std(window);
                let width = output[0].values[i].unwrap() - output[1].values[i].unwrap();
                assert_close(width, expected_width);
            }
        }
    }

    #[test]
    fn test_bollinger_matches_sliding_and_two_pass_deviation() {
        let closes = [125.07, 126.36, 125.02, 129.62, 130.15, 128.3, 131.86];
        let bars = create_bars(&closes);
        let bb = BollingerBands::new(4, 2.0).unwrap();
        let output = bb.calculate(&bars);
        for i in 3..closes.len() {
            let window = &closes[i - 3..=i];
            let mean = window.iter().sum::<f64>() / 4.0;
            let expected_upper = mean + 2.0 * sample_std(window);
            assert_close(output[0].values[i].unwrap(), expected_upper);
        }
    }

    #[test]
    fn test_bollinger_negative_multiplier_inverts_bands() {
        let bars = create_bars(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bb = BollingerBands::new(3, -1.0).unwrap();
        let output = bb.calculate(&bars);
        // "Upper" sits below "lower" once the offset sign flips.
        assert!(output[0].values[2].unwrap() < output[1].values[2].unwrap());
    }

    #[test]
    fn test_bollinger_period_one_bands_undefined() {
        // Sample deviation needs two samples per window, so period 1 yields
        // no band values even though SMA(1) is defined everywhere.
        let bars = create_bars(&[1.0, 2.0, 3.0]);
        let bb = BollingerBands::new(1, 2.0).unwrap();
        let output = bb.calculate(&bars);
        assert_eq!(output[0].values, vec![None, None, None]);
        assert_eq!(output[1].values, vec![None, None, None]);
    }

    #[test]
    fn test_bollinger_short_series_all_undefined() {
        let bars = create_bars(&[1.0, 2.0]);
        let bb = BollingerBands::new(5, 2.0).unwrap();
        let output = bb.calculate(&bars);
        assert_eq!(output[0].values, vec![None, None]);
        assert_eq!(output[1].values, vec![None, None]);
    }

    #[test]
    fn test_bollinger_series_names() {
        let bb = BollingerBands::new(20, 2.0).unwrap();
        let output = bb.calculate(&create_bars(&[1.0; 25]));
        assert_eq!(output[0].name, "BB_UPPER(20,2)");
        assert_eq!(output[1].name, "BB_LOWER(20,2)");
        assert_eq!(bb.name(), "BB(20,2)");
    }

    #[test]
    fn test_bollinger_period_zero_rejected() {
        assert!(matches!(
            BollingerBands::new(0, 2.0),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_bollinger_non_finite_multiplier_rejected() {
        assert!(matches!(
            BollingerBands::new(20, f64::NAN),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            BollingerBands::new(20, f64::INFINITY),
            Err(EngineError::InvalidParameter(_))
        ));
    }
}
