// Handler for the ComputeIndicators RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers;
use crate::data::market_data::PriceSeriesStore;
use crate::error::EngineError;
use crate::indicators::{BollingerBands, IndicatorCalculator, Rsi, Sma};
use crate::services::{ComputeIndicatorsRequest, ComputeIndicatorsResponse, IndicatorSpec};

fn parse_parameters(spec: &IndicatorSpec) -> Result<serde_json::Value, EngineError> {
    if spec.parameters.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(&spec.parameters).map_err(|e| {
        EngineError::InvalidParameter(format!(
            "Invalid JSON parameters for indicator '{}': {}",
            spec.indicator_type, e
        ))
    })
}

fn period_parameter(params: &serde_json::Value, default: usize) -> Result<usize, EngineError> {
    match params.get("period") {
        None => Ok(default),
        Some(v) => v.as_u64().map(|p| p as usize).ok_or_else(|| {
            EngineError::InvalidParameter(format!(
                "Indicator period must be a non-negative integer, got {}",
                v
            ))
        }),
    }
}

fn multiplier_parameter(params: &serde_json::Value, default: f64) -> Result<f64, EngineError> {
    match params.get("std_dev_multiplier") {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| {
            EngineError::InvalidParameter(format!("Std-dev multiplier must be a number, got {}", v))
        }),
    }
}

fn build_calculator(spec: &IndicatorSpec) -> Result<Box<dyn IndicatorCalculator>, EngineError> {
    let params = parse_parameters(spec)?;

    match spec.indicator_type.to_lowercase().as_str() {
        "sma" => Ok(Box::new(Sma::new(period_parameter(&params, 20)?)?)),
        "bollinger" => Ok(Box::new(BollingerBands::new(
            period_parameter(&params, 20)?,
            multiplier_parameter(&params, 2.0)?,
        )?)),
        "rsi" => Ok(Box::new(Rsi::new(period_parameter(&params, 14)?)?)),
        other => {
            tracing::error!(indicator_type = %other, "Unknown indicator type requested (handler)");
            Err(EngineError::InvalidParameter(format!(
                "Unknown indicator type: {}",
                other
            )))
        }
    }
}

pub async fn handle_compute_indicators(
    req_payload: ComputeIndicatorsRequest,
    store: Arc<RwLock<PriceSeriesStore>>,
) -> Result<Response<ComputeIndicatorsResponse>, Status> {
    tracing::debug!(symbol = %req_payload.symbol, "Handling ComputeIndicatorsRequest in dedicated handler");

    let store_guard = store.read().await;
    let bars = store_guard.get_bars(&req_payload.symbol, None, None);
    drop(store_guard);

    let bars = match bars {
        Some(b) if !b.is_empty() => b,
        _ => {
            tracing::warn!(symbol = %req_payload.symbol, "No bar data found to compute indicators (handler)");
            return Err(EngineError::MarketDataError(format!(
                "Price data not found for symbol '{}'",
                req_payload.symbol
            ))
            .into());
        }
    };

    let mut series = Vec::new();
    for spec in &req_payload.indicators {
        let calculator = build_calculator(spec).map_err(Status::from)?;
        for output in calculator.calculate(&bars) {
            series.push(helpers::to_proto_series(&output));
        }
    }

    Ok(Response::new(ComputeIndicatorsResponse { series }))
}
