//! Shared configuration for Linework
//!
//! This crate provides the single source of truth for stroke optimizer
//! tuning: step distances, corner detection thresholds and the choice of
//! pipeline. Every type here is plain serde data so presets can be stored
//! and adjusted at runtime (for editor sliders).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum travel (pixels) before a new vertex is committed
pub const DEFAULT_STEP_DISTANCE: f32 = 15.0;

/// Default step distance of the sub-pixel jitter prefilter (pixels)
pub const DEFAULT_PREFILTER_STEP_DISTANCE: f32 = 2.0;

/// Default fraction of the step distance used near corners
pub const DEFAULT_CORNER_STEP_RATIO: f32 = 0.25;

/// Default number of trailing points excluded from corner evaluation
pub const DEFAULT_NEAR_INPUT_INDEX_RANGE: usize = 2;

/// Default minimum combined curvature for a corner (75 degrees)
pub const DEFAULT_CORNER_MINIMUM_CURVING_ANGLE: f32 = 75.0 * std::f32::consts::PI / 180.0;

/// Default ratio under which two curvatures describe one rounded corner
pub const DEFAULT_COMBINATION_CORNER_DIFFERENCE_RATIO: f32 = 2.0;

/// Default cap on the apex distance from its sampled vertex (pixels)
pub const DEFAULT_MAX_CORNER_CROSS_POINT_DISTANCE: f32 = 20.0;

/// Errors reported by [`OptimizerConfig::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid step distance for {field}: {value} (must be finite and > 0)")]
    InvalidStepDistance { field: &'static str, value: f32 },
    #[error("Prefilter step {prefilter} exceeds main step {step}")]
    PrefilterTooCoarse { prefilter: f32, step: f32 },
    #[error("Invalid corner step ratio: {0} (must be in (0, 1])")]
    InvalidCornerStepRatio(f32),
    #[error("Invalid corner angle: {0} rad (must be in (0, PI])")]
    InvalidCornerAngle(f32),
    #[error("Invalid combination ratio: {0} (must be >= 1)")]
    InvalidCombinationRatio(f32),
    #[error("Invalid apex distance cap: {0} (must be finite and > 0)")]
    InvalidCrossPointDistance(f32),
}

/// Which stroke input pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    /// Single-stage distance filter
    Distance,
    /// Distance filter followed by corner splitting
    CornerSplit,
    /// Prefilter, dual-resolution merge, then corner splitting
    #[default]
    CornerMerge,
}

/// Corner detection and segmentation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerConfig {
    /// Trailing points (closest to the moving pointer) never split
    pub near_input_index_range: usize,
    /// Minimum combined curvature in radians to call a location a corner
    pub corner_minimum_curving_angle: f32,
    /// Two adjacent curvatures within this ratio form one rounded corner
    pub combination_corner_difference_ratio: f32,
    /// Reject a line-intersection apex farther than this from its vertex
    pub max_corner_cross_point_distance: f32,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            near_input_index_range: DEFAULT_NEAR_INPUT_INDEX_RANGE,
            corner_minimum_curving_angle: DEFAULT_CORNER_MINIMUM_CURVING_ANGLE,
            combination_corner_difference_ratio: DEFAULT_COMBINATION_CORNER_DIFFERENCE_RATIO,
            max_corner_cross_point_distance: DEFAULT_MAX_CORNER_CROSS_POINT_DISTANCE,
        }
    }
}

impl CornerConfig {
    /// Check corner thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let angle = self.corner_minimum_curving_angle;
        if !(angle > 0.0 && angle <= std::f32::consts::PI) {
            return Err(ConfigError::InvalidCornerAngle(angle));
        }

        let ratio = self.combination_corner_difference_ratio;
        if !ratio.is_finite() || ratio < 1.0 {
            return Err(ConfigError::InvalidCombinationRatio(ratio));
        }

        let cap = self.max_corner_cross_point_distance;
        if !cap.is_finite() || cap <= 0.0 {
            return Err(ConfigError::InvalidCrossPointDistance(cap));
        }

        Ok(())
    }
}

/// Full stroke optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Pipeline to build
    pub kind: OptimizerKind,
    /// Minimum travel before a vertex is committed (pixels)
    pub step_distance: f32,
    /// Fixed step of the jitter prefilter (pixels)
    pub prefilter_step_distance: f32,
    /// Fine step near corners, as a fraction of `step_distance`
    pub corner_step_ratio: f32,
    /// Corner detection thresholds
    pub corner: CornerConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            kind: OptimizerKind::default(),
            step_distance: DEFAULT_STEP_DISTANCE,
            prefilter_step_distance: DEFAULT_PREFILTER_STEP_DISTANCE,
            corner_step_ratio: DEFAULT_CORNER_STEP_RATIO,
            corner: CornerConfig::default(),
        }
    }
}

impl OptimizerConfig {
    /// Create a config for the given pipeline with default tuning
    pub fn new(kind: OptimizerKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Builder-style override of the main step distance
    pub fn with_step_distance(mut self, step_distance: f32) -> Self {
        self.step_distance = step_distance;
        self
    }

    /// Fine step distance used near corners
    pub fn corner_step_distance(&self) -> f32 {
        self.step_distance * self.corner_step_ratio
    }

    /// Check that every value is usable by the pipelines
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("step_distance", self.step_distance),
            ("prefilter_step_distance", self.prefilter_step_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidStepDistance { field, value });
            }
        }

        if self.prefilter_step_distance > self.step_distance {
            return Err(ConfigError::PrefilterTooCoarse {
                prefilter: self.prefilter_step_distance,
                step: self.step_distance,
            });
        }

        let ratio = self.corner_step_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::InvalidCornerStepRatio(ratio));
        }

        self.corner.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.kind, OptimizerKind::CornerMerge);
        assert_eq!(config.step_distance, DEFAULT_STEP_DISTANCE);
        assert_eq!(config.corner, CornerConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_corner_step_distance() {
        let config = OptimizerConfig::default().with_step_distance(20.0);
        assert!((config.corner_step_distance() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let config = OptimizerConfig::default().with_step_distance(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidStepDistance {
                field: "step_distance",
                value: 0.0
            })
        );

        let config = OptimizerConfig::default().with_step_distance(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_coarse_prefilter() {
        let config = OptimizerConfig {
            prefilter_step_distance: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PrefilterTooCoarse { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_corner_thresholds() {
        let mut config = OptimizerConfig::default();
        config.corner.combination_corner_difference_ratio = 0.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCombinationRatio(0.5))
        );

        let mut config = OptimizerConfig::default();
        config.corner.corner_minimum_curving_angle = 4.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidCornerAngle(4.0)));
    }

    #[test]
    fn test_partial_preset_uses_defaults() {
        let config: OptimizerConfig =
            serde_json::from_str(r#"{ "kind": "corner_split", "step_distance": 8.0 }"#).unwrap();
        assert_eq!(config.kind, OptimizerKind::CornerSplit);
        assert_eq!(config.step_distance, 8.0);
        assert_eq!(config.prefilter_step_distance, DEFAULT_PREFILTER_STEP_DISTANCE);
        assert_eq!(config.corner, CornerConfig::default());
    }
}
