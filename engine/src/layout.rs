// Chart panel layout planning
//
// Table-driven mapping from the enabled indicator families to the stacked
// panel arrangement. Overlay traces (SMA, Bollinger Bands) share the price
// panel; volume and RSI get rows of their own, in that order, below it.
// The planner only looks at which families are toggled, never at the
// indicator values.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    Price,
    Volume,
    Rsi,
}

impl PanelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::Price => "price",
            PanelKind::Volume => "volume",
            PanelKind::Rsi => "rsi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceKind {
    Candlestick,
    Sma,
    BollingerUpper,
    BollingerLower,
    Volume,
    Rsi,
}

impl TraceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceKind::Candlestick => "candlestick",
            TraceKind::Sma => "sma",
            TraceKind::BollingerUpper => "bollinger_upper",
            TraceKind::BollingerLower => "bollinger_lower",
            TraceKind::Volume => "volume",
            TraceKind::Rsi => "rsi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSlot {
    pub kind: PanelKind,
    /// Relative height weight; the weights of a plan sum to 1.0.
    pub height: f64,
    pub traces: Vec<TraceKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelPlan {
    pub panels: Vec<PanelSlot>,
}

impl PanelPlan {
    /// Row index the given trace renders into, or `None` when its panel is
    /// not part of the plan.
    pub fn panel_index(&self, trace: TraceKind) -> Option<usize> {
        self.panels.iter().position(|p| p.traces.contains(&trace))
    }
}

// The price panel hosts the candlesticks plus whichever overlay indicators
// were computed; the renderer draws the ones it was given.
const PRICE_TRACES: [TraceKind; 4] = [
    TraceKind::Candlestick,
    TraceKind::Sma,
    TraceKind::BollingerUpper,
    TraceKind::BollingerLower,
];

/// Decide the stacked panel arrangement for the enabled indicator families.
/// The price panel always comes first; volume and RSI panels follow in that
/// order when enabled.
pub fn plan(volume_enabled: bool, rsi_enabled: bool) -> PanelPlan {
    let heights: &[f64] = match (volume_enabled, rsi_enabled) {
        (false, false) => &[1.0],
        (true, false) => &[0.7, 0.3],
        (false, true) => &[0.7, 0.3],
        (true, true) => &[0.6, 0.2, 0.2],
    };

    let mut panels = vec![PanelSlot {
        kind: PanelKind::Price,
        height: heights[0],
        traces: PRICE_TRACES.to_vec(),
    }];
    if volume_enabled {
        panels.push(PanelSlot {
            kind: PanelKind::Volume,
            height: heights[panels.len()],
            traces: vec![TraceKind::Volume],
        });
    }
    if rsi_enabled {
        panels.push(PanelSlot {
            kind: PanelKind::Rsi,
            height: heights[panels.len()],
            traces: vec![TraceKind::Rsi],
        });
    }
    PanelPlan { panels }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(plan: &PanelPlan) -> Vec<PanelKind> {
        plan.panels.iter().map(|p| p.kind).collect()
    }

    fn heights(plan: &PanelPlan) -> Vec<f64> {
        plan.panels.iter().map(|p| p.height).collect()
    }

    #[test]
    fn test_plan_price_only() {
        let plan = plan(false, false);
        assert_eq!(kinds(&plan), vec![PanelKind::Price]);
        assert_eq!(heights(&plan), vec![1.0]);
    }

    #[test]
    fn test_plan_with_volume() {
        let plan = plan(true, false);
        assert_eq!(kinds(&plan), vec![PanelKind::Price, PanelKind::Volume]);
        assert_eq!(heights(&plan), vec![0.7, 0.3]);
    }

    #[test]
    fn test_plan_with_rsi() {
        let plan = plan(false, true);
        assert_eq!(kinds(&plan), vec![PanelKind::Price, PanelKind::Rsi]);
        assert_eq!(heights(&plan), vec![0.7, 0.3]);
    }

    #[test]
    fn test_plan_with_volume_and_rsi() {
        let plan = plan(true, true);
        assert_eq!(
            kinds(&plan),
            vec![PanelKind::Price, PanelKind::Volume, PanelKind::Rsi]
        );
        assert_eq!(heights(&plan), vec![0.6, 0.2, 0.2]);
    }

    #[test]
    fn test_plan_heights_sum_to_one() {
        for volume in [false, true] {
            for rsi in [false, true] {
                let plan = plan(volume, rsi);
                let total: f64 = plan.panels.iter().map(|p| p.height).sum();
                assert!(
                    (total - 1.0).abs() < 1e-9,
                    "Heights for ({}, {}) sum to {}",
                    volume,
                    rsi,
                    total
                );
            }
        }
    }

    #[test]
    fn test_overlays_share_the_price_panel() {
        let plan = plan(true, true);
        assert_eq!(plan.panel_index(TraceKind::Candlestick), Some(0));
        assert_eq!(plan.panel_index(TraceKind::Sma), Some(0));
        assert_eq!(plan.panel_index(TraceKind::BollingerUpper), Some(0));
        assert_eq!(plan.panel_index(TraceKind::BollingerLower), Some(0));
        assert_eq!(plan.panel_index(TraceKind::Volume), Some(1));
        assert_eq!(plan.panel_index(TraceKind::Rsi), Some(2));
    }

    #[test]
    fn test_disabled_families_have_no_panel() {
        let plan = plan(false, false);
        assert_eq!(plan.panel_index(TraceKind::Volume), None);
        assert_eq!(plan.panel_index(TraceKind::Rsi), None);
        // Overlays still land on the price panel regardless of flags.
        assert_eq!(plan.panel_index(TraceKind::Sma), Some(0));
    }

    #[test]
    fn test_rsi_panel_is_always_last() {
        let with_volume = plan(true, true);
        assert_eq!(with_volume.panels.last().unwrap().kind, PanelKind::Rsi);
        let without_volume = plan(false, true);
        assert_eq!(without_volume.panels.last().unwrap().kind, PanelKind::Rsi);
    }
}
