//! Slope speed multiplier curve.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Piecewise-linear mapping from slope angle (degrees) to a speed multiplier.
///
/// Negative angles are downhill, positive angles uphill. Angles outside the
/// key range clamp to the first/last key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopeSpeedCurve {
    keys: Vec<(f32, f32)>,
}

impl Default for SlopeSpeedCurve {
    /// Speeds up going down, slows to a crawl on a vertical climb.
    fn default() -> Self {
        Self {
            keys: vec![(-90.0, 1.5), (0.0, 1.0), (90.0, 0.0)],
        }
    }
}

impl SlopeSpeedCurve {
    /// Build a curve from `(angle, multiplier)` keys sorted by angle.
    pub fn new(keys: Vec<(f32, f32)>) -> Result<Self, ConfigError> {
        let curve = Self { keys };
        curve.validate()?;
        Ok(curve)
    }

    /// A curve that never changes speed.
    pub fn constant(multiplier: f32) -> Self {
        Self {
            keys: vec![(0.0, multiplier)],
        }
    }

    pub fn keys(&self) -> &[(f32, f32)] {
        &self.keys
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::EmptySlopeCurve);
        }
        for (index, &(angle, value)) in self.keys.iter().enumerate() {
            if !angle.is_finite() || !value.is_finite() {
                return Err(ConfigError::UnsortedSlopeCurve { index });
            }
            if index > 0 && self.keys[index - 1].0 >= angle {
                return Err(ConfigError::UnsortedSlopeCurve { index });
            }
        }
        Ok(())
    }

    /// Multiplier at `angle` degrees.
    pub fn evaluate(&self, angle: f32) -> f32 {
        let Some(&(first_angle, first_value)) = self.keys.first() else {
            return 1.0;
        };
        if angle <= first_angle {
            return first_value;
        }

        for pair in self.keys.windows(2) {
            let (a0, v0) = pair[0];
            let (a1, v1) = pair[1];
            if angle <= a1 {
                let t = (angle - a0) / (a1 - a0);
                return v0 + (v1 - v0) * t;
            }
        }

        self.keys.last().map_or(1.0, |&(_, value)| value)
    }
}
