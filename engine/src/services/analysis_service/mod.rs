// Main module hub for the analysis service.
// It contains the AnalysisService struct, its AnalysisEngine impl, and
// declares one submodule per RPC handler plus shared helpers.

use super::{
    AnalysisEngine, ComputeIndicatorsRequest, ComputeIndicatorsResponse, LayoutRequest,
    LayoutResponse, LoadCsvRequest, LoadCsvResponse, PriceSeriesRequest, PriceSeriesResponse,
};
use crate::data::market_data::PriceSeriesStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod compute_indicators;
pub mod get_price_series;
pub mod helpers;
pub mod load_csv_data;
pub mod plan_layout;

pub struct AnalysisService {
    store: Arc<RwLock<PriceSeriesStore>>,
}

impl AnalysisService {
    pub fn new(store: Arc<RwLock<PriceSeriesStore>>) -> Self {
        AnalysisService { store }
    }
}

#[tonic::async_trait]
impl AnalysisEngine for AnalysisService {
    async fn load_csv_data(
        &self,
        request: Request<LoadCsvRequest>,
    ) -> Result<Response<LoadCsvResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            path = %req_payload.file_path,
            "Received LoadCsvRequest, dispatching to handler."
        );
        load_csv_data::handle_load_csv_data(req_payload, self.store.clone()).await
    }

    type GetPriceSeriesStream = ReceiverStream<Result<PriceSeriesResponse, Status>>;
    async fn get_price_series(
        &self,
        request: Request<PriceSeriesRequest>,
    ) -> Result<Response<Self::GetPriceSeriesStream>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            from_date = %req_payload.from_date,
            to_date = %req_payload.to_date,
            "Received PriceSeriesRequest, dispatching to handler."
        );
        get_price_series::handle_get_price_series(req_payload, self.store.clone()).await
    }

    async fn compute_indicators(
        &self,
        request: Request<ComputeIndicatorsRequest>,
    ) -> Result<Response<ComputeIndicatorsResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            indicator_count = req_payload.indicators.len(),
            "Received ComputeIndicatorsRequest, dispatching to handler."
        );
        compute_indicators::handle_compute_indicators(req_payload, self.store.clone()).await
    }

    async fn plan_layout(
        &self,
        request: Request<LayoutRequest>,
    ) -> Result<Response<LayoutResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            volume_enabled = req_payload.volume_enabled,
            rsi_enabled = req_payload.rsi_enabled,
            "Received LayoutRequest, dispatching to handler."
        );
        plan_layout::handle_plan_layout(req_payload).await
    }
}
