// Handler for the GetPriceSeries RPC
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers;
use crate::data::market_data::PriceSeriesStore;
use crate::services::{PriceSeriesRequest, PriceSeriesResponse, ProtoPriceBar};

pub async fn handle_get_price_series(
    req_payload: PriceSeriesRequest,
    store: Arc<RwLock<PriceSeriesStore>>,
) -> Result<Response<ReceiverStream<Result<PriceSeriesResponse, Status>>>, Status> {
    tracing::debug!(symbol = %req_payload.symbol, "Handling PriceSeriesRequest in dedicated handler");

    let from_date = match helpers::parse_date_bound(&req_payload.from_date) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(symbol = %req_payload.symbol, error_detail = ?e, "Invalid 'from' date in PriceSeriesRequest");
            return Err(e.into());
        }
    };
    let to_date = match helpers::parse_date_bound(&req_payload.to_date) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(symbol = %req_payload.symbol, error_detail = ?e, "Invalid 'to' date in PriceSeriesRequest");
            return Err(e.into());
        }
    };

    let store_guard = store.read().await;
    // get_bars returns an owned Vec, so the read lock is released right away.
    let bars = store_guard.get_bars(&req_payload.symbol, from_date, to_date);
    drop(store_guard);

    let (tx, rx) = mpsc::channel(4);
    let symbol_for_log = req_payload.symbol.clone();

    tokio::spawn(async move {
        match bars {
            Some(series_bars) => {
                if series_bars.is_empty() {
                    tracing::warn!(symbol = %symbol_for_log, ?from_date, ?to_date, "No bars found in the given range (handler).");
                }
                let proto_bars: Vec<ProtoPriceBar> =
                    series_bars.iter().map(helpers::to_proto_bar).collect();
                tracing::debug!(symbol = %symbol_for_log, count = proto_bars.len(), "Streaming price series (handler).");
                let response = PriceSeriesResponse { bars: proto_bars };
                if let Err(e) = tx.send(Ok(response)).await {
                    tracing::error!(error = ?e, symbol = %symbol_for_log, "Failed to send price series to stream (handler)");
                }
            }
            None => {
                tracing::warn!(symbol = %symbol_for_log, "No price series available (symbol not found in store) (handler).");
                let status = Status::not_found(format!(
                    "Price series not found for symbol '{}'",
                    symbol_for_log
                ));
                if let Err(e) = tx.send(Err(status)).await {
                    tracing::error!(error = ?e, symbol = %symbol_for_log, "Failed to send NotFound status to stream (handler)");
                }
            }
        }
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
