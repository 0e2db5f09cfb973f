use serde::{Deserialize, Serialize};

use crate::{error::Result, geom::DistanceMethod};

/// Engine configuration, supplied once to [`crate::Engine::init`].
///
/// Every field has a default, so a partial JSON document is valid. The camel
/// case names used by web front-ends are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Metric used to rank candidates. Default: center.
    #[serde(alias = "distanceCalculationMethod")]
    pub distance_method: DistanceMethod,

    /// When set, a candidate must overlap the current node on the axis
    /// perpendicular to the move, allowing a gap of up to this many units.
    /// Default: unset, no perpendicular restriction.
    #[serde(alias = "perpendicularTolerance")]
    pub perpendicular_tolerance: Option<f64>,

    /// Log candidate scoring through `tracing`. Diagnostics only.
    pub debug: bool,

    /// Keep a [`crate::NavigationTrace`] of the last navigation for drawing
    /// overlays. Diagnostics only.
    #[serde(alias = "visualDebug")]
    pub visual_debug: bool,
}

impl NavigationConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Set the distance method.
    pub fn distance_method(mut self, method: DistanceMethod) -> Self {
        self.distance_method = method;
        self
    }

    /// Require perpendicular overlap, allowing a gap of up to `tolerance`.
    pub fn perpendicular_tolerance(mut self, tolerance: f64) -> Self {
        self.perpendicular_tolerance = Some(tolerance);
        self
    }

    /// Enable scoring logs.
    pub fn debug(mut self, on: bool) -> Self {
        self.debug = on;
        self
    }

    /// Enable navigation traces.
    pub fn visual_debug(mut self, on: bool) -> Self {
        self.visual_debug = on;
        self
    }
}
