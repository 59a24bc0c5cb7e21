//! Control value → route, with block-to-block edge detection.

use serde::{Deserialize, Serialize};

/// Index of a route, contiguous from 0.
pub type Route = usize;

/// How a control value is quantized to a route index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorMode {
    /// Truncate toward zero: 0.0..1.0 → 0, 1.0..2.0 → 1, ...
    #[default]
    Truncate,
    /// Two-way switch: above 0.5 → route 1, otherwise route 0.
    Threshold,
}

impl SelectorMode {
    /// Raw route index, before clamping to the configured route count.
    /// NaN and negative values select route 0.
    #[inline]
    pub fn quantize(self, control: f32) -> Route {
        match self {
            SelectorMode::Truncate => {
                if control.is_nan() || control <= 0.0 {
                    0
                } else {
                    control as Route
                }
            }
            SelectorMode::Threshold => Route::from(control > 0.5),
        }
    }
}

/// Result of resolving one block's control value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Route selected for this block.
    pub route: Route,
    /// Previous block's route, only if it differs from `route`.
    pub vacated: Option<Route>,
}

impl Transition {
    #[inline]
    pub fn changed(&self) -> bool {
        self.vacated.is_some()
    }
}

/// Remembers the last resolved route across blocks.
#[derive(Debug, Clone)]
pub struct RouteSelector {
    mode: SelectorMode,
    route_count: usize,
    /// `None` until the first block after construction or reset.
    previous: Option<Route>,
}

impl RouteSelector {
    pub fn new(mode: SelectorMode, route_count: usize) -> Self {
        Self {
            mode,
            route_count,
            previous: None,
        }
    }

    /// Resolve this block's route. The first call after a reset never reports
    /// a change, whatever the control value.
    #[inline]
    pub fn resolve(&mut self, control: f32) -> Transition {
        let last = self.route_count.saturating_sub(1);
        let route = self.mode.quantize(control).min(last);
        let vacated = self.previous.filter(|&previous| previous != route);
        self.previous = Some(route);
        Transition { route, vacated }
    }

    #[inline]
    pub fn previous(&self) -> Option<Route> {
        self.previous
    }

    #[inline]
    pub fn mode(&self) -> SelectorMode {
        self.mode
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
