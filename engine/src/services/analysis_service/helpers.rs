// Helper functions for analysis service RPC implementations
use chrono::NaiveDate;

use crate::error::EngineError;
use crate::layout::PanelSlot;
use crate::services::{DerivedPoint, PanelSlot as ProtoPanelSlot, ProtoIndicatorSeries, ProtoPriceBar};
use shared::models::{IndicatorSeries, PriceBar};

pub fn to_proto_bar(bar: &PriceBar) -> ProtoPriceBar {
    ProtoPriceBar {
        date: bar.date.format("%Y-%m-%d").to_string(),
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    }
}

pub fn to_proto_series(series: &IndicatorSeries) -> ProtoIndicatorSeries {
    ProtoIndicatorSeries {
        name: series.name.clone(),
        parameters: series.parameters.to_string(),
        points: series
            .values
            .iter()
            .map(|value| match value {
                Some(v) => DerivedPoint {
                    defined: true,
                    value: *v,
                },
                // Undefined stays explicit on the wire; the zero is filler.
                None => DerivedPoint {
                    defined: false,
                    value: 0.0,
                },
            })
            .collect(),
    }
}

pub fn to_proto_panel(panel: &PanelSlot) -> ProtoPanelSlot {
    ProtoPanelSlot {
        kind: panel.kind.as_str().to_string(),
        height: panel.height,
        traces: panel.traces.iter().map(|t| t.as_str().to_string()).collect(),
    }
}

/// Parse an optional inclusive date bound; an empty string means unbounded.
pub fn parse_date_bound(value: &str) -> Result<Option<NaiveDate>, EngineError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| EngineError::InvalidParameter(format!("Invalid date bound '{}': {}", value, e)))
}
