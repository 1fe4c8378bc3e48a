//! Distance filter followed by corner splitting.

use glam::Vec2;
use linework_config::{CornerConfig, OptimizerConfig};
use tracing::{debug, trace};

use super::{StrokeOptimizer, is_valid_location, sanitize_step_distance, validated_config};
use crate::edit::{
    add_or_replace_point_for_min_distance, commit_final_point, split_stroke_by_right_angle_corner,
    update_last_point_parameters,
};
use crate::types::Stroke;

/// Admits samples at the step distance, then re-splits the whole working
/// stroke at corners after every sample.
///
/// Curvature near the tail only settles as later samples arrive, so earlier
/// split decisions may be revised by the next sample.
#[derive(Debug, Clone)]
pub struct CornerSplitOptimizer {
    step_distance: f32,
    corner: CornerConfig,
    original: Stroke,
    working: Stroke,
    segments: Vec<Stroke>,
    active: bool,
}

impl Default for CornerSplitOptimizer {
    fn default() -> Self {
        Self::new(&OptimizerConfig::default())
    }
}

impl CornerSplitOptimizer {
    pub fn new(config: &OptimizerConfig) -> Self {
        let config = validated_config(config);
        Self {
            step_distance: sanitize_step_distance(config.step_distance),
            corner: config.corner.clone(),
            original: Stroke::new(),
            working: Stroke::new(),
            segments: Vec::new(),
            active: false,
        }
    }

    /// Corner detection thresholds in use
    pub fn corner_config(&self) -> &CornerConfig {
        &self.corner
    }

    /// Replace the corner thresholds; takes effect on the next sample
    pub fn set_corner_config(&mut self, corner: CornerConfig) {
        self.corner = corner;
    }

    /// The unsplit, distance-filtered stroke
    pub fn working_stroke(&self) -> &Stroke {
        &self.working
    }

    fn admit(&mut self, location: Vec2) {
        self.original.add_point(location);
        update_last_point_parameters(&mut self.original);

        let outcome =
            add_or_replace_point_for_min_distance(&mut self.working, location, self.step_distance);
        update_last_point_parameters(&mut self.working);
        trace!("CornerSplitOptimizer: {:?} at ({:.1}, {:.1})", outcome, location.x, location.y);
    }

    fn resplit(&mut self) {
        self.segments = split_stroke_by_right_angle_corner(&self.working, &self.corner);
    }

    fn reset(&mut self) {
        self.original.clear();
        self.working.clear();
        self.segments.clear();
    }
}

impl StrokeOptimizer for CornerSplitOptimizer {
    fn set_input_step_distance(&mut self, step_distance: f32) {
        self.step_distance = sanitize_step_distance(step_distance);
    }

    fn input_step_distance(&self) -> f32 {
        self.step_distance
    }

    fn on_pointer_down(&mut self, location: Vec2) {
        if !is_valid_location(location) {
            return;
        }
        if self.active {
            debug!("CornerSplitOptimizer: pointer down while active, restarting stroke");
        }

        self.reset();
        self.active = true;
        self.admit(location);
        self.resplit();
    }

    fn on_pointer_move(&mut self, location: Vec2) {
        if !self.active || !is_valid_location(location) {
            return;
        }
        self.admit(location);
        self.resplit();
    }

    fn on_pointer_up(&mut self, location: Vec2) {
        if !self.active || !is_valid_location(location) {
            return;
        }
        self.admit(location);
        commit_final_point(&mut self.working);
        update_last_point_parameters(&mut self.working);
        self.resplit();
        self.active = false;

        debug!(
            "CornerSplitOptimizer: stroke finished, {} raw -> {} points in {} segments",
            self.original.len(),
            self.working.len(),
            self.segments.len()
        );
    }

    fn cancel_input(&mut self) {
        if self.active {
            debug!("CornerSplitOptimizer: stroke cancelled");
        }
        self.reset();
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn original_stroke(&self) -> &Stroke {
        &self.original
    }

    fn result_strokes(&self) -> &[Stroke] {
        &self.segments
    }
}
