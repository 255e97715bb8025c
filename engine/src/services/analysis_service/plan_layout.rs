// Handler for the PlanLayout RPC
use tonic::{Response, Status};

use super::helpers;
use crate::layout;
use crate::services::{LayoutRequest, LayoutResponse};

pub async fn handle_plan_layout(
    req_payload: LayoutRequest,
) -> Result<Response<LayoutResponse>, Status> {
    tracing::debug!(
        volume_enabled = req_payload.volume_enabled,
        rsi_enabled = req_payload.rsi_enabled,
        "Handling LayoutRequest in dedicated handler"
    );

    let plan = layout::plan(req_payload.volume_enabled, req_payload.rsi_enabled);
    let panels = plan.panels.iter().map(helpers::to_proto_panel).collect();

    Ok(Response::new(LayoutResponse { panels }))
}
