use serde::{Deserialize, Serialize};

use crate::QuadtreeError;

/// Construction parameters for a [`Quadtree`](crate::Quadtree).
///
/// Missing fields fall back to [`QuadtreeConfig::default`]: a unit domain at the origin,
/// a minimum quadrant ratio of `0.01` and a capacity of `4` items per quadrant.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuadtreeConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Smallest quadrant side a split may produce, as a fraction of the domain.
    pub min_quadrant_ratio: f64,
    /// Item count a quadrant may hold before it splits.
    pub max_quadrant_capacity: usize,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            min_quadrant_ratio: 0.01,
            max_quadrant_capacity: 4,
        }
    }
}

impl QuadtreeConfig {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_min_quadrant_ratio(mut self, ratio: f64) -> Self {
        self.min_quadrant_ratio = ratio;
        self
    }

    pub fn with_max_quadrant_capacity(mut self, capacity: usize) -> Self {
        self.max_quadrant_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), QuadtreeError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(QuadtreeError::NonFiniteOrigin {
                x: self.x,
                y: self.y,
            });
        }
        let extent_ok = |v: f64| v.is_finite() && v > 0.0;
        if !extent_ok(self.width) || !extent_ok(self.height) {
            return Err(QuadtreeError::InvalidExtent {
                width: self.width,
                height: self.height,
            });
        }
        // NaN fails both comparisons.
        if !(self.min_quadrant_ratio > 0.0 && self.min_quadrant_ratio <= 1.0) {
            return Err(QuadtreeError::InvalidQuadrantRatio(self.min_quadrant_ratio));
        }
        if self.max_quadrant_capacity == 0 {
            return Err(QuadtreeError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(QuadtreeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_extent() {
        let cfg = QuadtreeConfig::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(
            cfg.validate(),
            Err(QuadtreeError::InvalidExtent {
                width: 0.0,
                height: 10.0
            })
        );
        let cfg = QuadtreeConfig::new(0.0, 0.0, 10.0, -1.0);
        assert!(matches!(
            cfg.validate(),
            Err(QuadtreeError::InvalidExtent { .. })
        ));
        let cfg = QuadtreeConfig::new(0.0, 0.0, f64::INFINITY, 1.0);
        assert!(matches!(
            cfg.validate(),
            Err(QuadtreeError::InvalidExtent { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_origin() {
        let cfg = QuadtreeConfig::new(f64::NAN, 0.0, 1.0, 1.0);
        assert!(matches!(
            cfg.validate(),
            Err(QuadtreeError::NonFiniteOrigin { .. })
        ));
    }

    #[test]
    fn rejects_bad_ratio_and_capacity() {
        let base = QuadtreeConfig::default();
        for ratio in [0.0, -0.5, 1.5, f64::NAN] {
            let cfg = base.clone().with_min_quadrant_ratio(ratio);
            assert!(matches!(
                cfg.validate(),
                Err(QuadtreeError::InvalidQuadrantRatio(_))
            ));
        }
        assert_eq!(
            base.clone().with_max_quadrant_capacity(0).validate(),
            Err(QuadtreeError::ZeroCapacity)
        );
        assert_eq!(base.with_min_quadrant_ratio(1.0).validate(), Ok(()));
    }

    #[test]
    fn parses_from_toml_with_defaults() {
        let cfg: QuadtreeConfig = toml::from_str(
            r#"
            x = -100.0
            width = 200.0
            height = 50.0
            max_quadrant_capacity = 16
            "#,
        )
        .unwrap();
        assert_eq!(cfg.x, -100.0);
        assert_eq!(cfg.y, 0.0);
        assert_eq!(cfg.width, 200.0);
        assert_eq!(cfg.height, 50.0);
        assert_eq!(cfg.min_quadrant_ratio, 0.01);
        assert_eq!(cfg.max_quadrant_capacity, 16);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = QuadtreeError::InvalidQuadrantRatio(2.0);
        assert_eq!(err.to_string(), "Minimum quadrant ratio must be in (0, 1]: 2");
        assert_eq!(
            QuadtreeError::ZeroCapacity.to_string(),
            "Maximum quadrant capacity must be at least 1"
        );
    }
}
