// Technical indicators module
pub mod bollinger;
pub mod rsi;
pub mod sma;

pub use bollinger::BollingerBands;
pub use rsi::Rsi;
pub use sma::Sma;

use serde_json::Value;
use shared::models::{IndicatorSeries, PriceBar};

// Common trait for all indicators.
//
// `calculate` never fails: a series shorter than the window degrades to an
// all-undefined output, since partial history is an expected condition in
// financial time series. Parameter validation happens in the constructors
// instead, which reject a period of 0 (and a non-finite band multiplier)
// with `EngineError::InvalidParameter`.
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    /// Derived series aligned one-to-one with `data` by position; `None`
    /// marks positions without sufficient history. Band indicators return
    /// one entry per band.
    fn calculate(&self, data: &[PriceBar]) -> Vec<IndicatorSeries>;
}
