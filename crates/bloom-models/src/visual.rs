//! Pure projection of the bloom level to flower visual parameters.
//!
//! Stateless by construction: the rendering layer derives everything it draws
//! from the latest bloom level and holds no animation state of its own.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Visual parameters for drawing the flower at a given bloom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BloomVisual {
    /// Flower head scale factor
    pub flower_scale: f64,

    /// Flower head tilt in degrees, upright at full bloom
    pub flower_rotation_deg: f64,

    /// Stem vertical scale factor
    pub stem_scale: f64,

    /// Per-petal vertical scale factor
    pub petal_scale: f64,

    /// Petal opacity in [0,1]
    pub petal_opacity: f64,

    /// Leaf opacity in [0,1]
    pub leaf_opacity: f64,

    /// Bloom meter fill percentage, floored so the bar stays visible
    pub meter_percent: f64,
}

impl BloomVisual {
    /// Compute the visual parameters for a bloom level.
    ///
    /// Out-of-range input is clamped so the projection stays total.
    pub fn from_level(level: f64) -> Self {
        let level = level.clamp(0.0, 1.0);
        Self {
            flower_scale: 0.6 + 0.6 * level,
            flower_rotation_deg: 5.0 * (1.0 - level),
            stem_scale: 0.6 + 0.4 * level,
            petal_scale: 0.85 + 0.3 * level,
            petal_opacity: 0.6 + 0.4 * level,
            leaf_opacity: 0.5 + 0.5 * level,
            meter_percent: (level * 100.0).max(6.0),
        }
    }
}
