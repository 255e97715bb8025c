// Handler for the LoadCsvData RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::csv_parser::DailyCsvParser;
use crate::data::market_data::PriceSeriesStore;
use crate::error::EngineError;
use crate::services::{LoadCsvRequest, LoadCsvResponse};

pub async fn handle_load_csv_data(
    req_payload: LoadCsvRequest,
    store: Arc<RwLock<PriceSeriesStore>>,
) -> Result<Response<LoadCsvResponse>, Status> {
    let bars = match DailyCsvParser::load_bars_from_csv(&req_payload.file_path) {
        Ok(b) => b,
        Err(e) => return Err(e.into()),
    };

    let bars_loaded = bars.len() as i32;
    let mut store = store.write().await;

    match store.add_bars(&req_payload.symbol, bars) {
        Ok(_) => Ok(Response::new(LoadCsvResponse {
            success: true,
            message: format!("Loaded {} bars for symbol {}", bars_loaded, req_payload.symbol),
            bars_loaded,
        })),
        Err(e) => Err(EngineError::from(e).into()),
    }
}
