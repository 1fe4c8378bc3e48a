//! Single-stage distance filter.

use glam::Vec2;
use linework_config::OptimizerConfig;
use tracing::{debug, trace};

use super::{StrokeOptimizer, is_valid_location, sanitize_step_distance, validated_config};
use crate::edit::{
    add_or_replace_point_for_min_distance, commit_final_point, update_last_point_parameters,
};
use crate::types::Stroke;

/// Every sample goes straight through distance-gated admission.
///
/// The result is always a single stroke: the filtered working stroke itself.
#[derive(Debug, Clone)]
pub struct DistanceOptimizer {
    step_distance: f32,
    original: Stroke,
    working: Stroke,
    active: bool,
}

impl Default for DistanceOptimizer {
    fn default() -> Self {
        Self::new(&OptimizerConfig::default())
    }
}

impl DistanceOptimizer {
    /// Create a distance filter using `config.step_distance`
    pub fn new(config: &OptimizerConfig) -> Self {
        let config = validated_config(config);
        Self {
            step_distance: sanitize_step_distance(config.step_distance),
            original: Stroke::new(),
            working: Stroke::new(),
            active: false,
        }
    }

    fn record_raw(&mut self, location: Vec2) {
        self.original.add_point(location);
        update_last_point_parameters(&mut self.original);
    }

    fn admit(&mut self, location: Vec2) {
        self.record_raw(location);
        let outcome =
            add_or_replace_point_for_min_distance(&mut self.working, location, self.step_distance);
        update_last_point_parameters(&mut self.working);
        trace!("DistanceOptimizer: {:?} at ({:.1}, {:.1})", outcome, location.x, location.y);
    }
}

impl StrokeOptimizer for DistanceOptimizer {
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
            debug!("DistanceOptimizer: pointer down while active, restarting stroke");
        }

        self.original.clear();
        self.working.clear();
        self.active = true;
        self.admit(location);
    }

    fn on_pointer_move(&mut self, location: Vec2) {
        if !self.active || !is_valid_location(location) {
            return;
        }
        self.admit(location);
    }

    fn on_pointer_up(&mut self, location: Vec2) {
        if !self.active || !is_valid_location(location) {
            return;
        }
        self.admit(location);
        commit_final_point(&mut self.working);
        update_last_point_parameters(&mut self.working);
        self.active = false;

        debug!(
            "DistanceOptimizer: stroke finished, {} raw -> {} points",
            self.original.len(),
            self.working.len()
        );
    }

    fn cancel_input(&mut self) {
        if self.active {
            debug!("DistanceOptimizer: stroke cancelled");
        }
        self.original.clear();
        self.working.clear();
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn original_stroke(&self) -> &Stroke {
        &self.original
    }

    fn result_strokes(&self) -> &[Stroke] {
        if self.working.is_empty() {
            &[]
        } else {
            std::slice::from_ref(&self.working)
        }
    }
}
