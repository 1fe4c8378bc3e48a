//! Prefilter, dual-resolution merge and corner splitting.

use glam::Vec2;
use linework_config::OptimizerConfig;
use tracing::{debug, trace};

use super::{StrokeOptimizer, is_valid_location, sanitize_step_distance, validated_config};
use crate::edit::{
    DualResolutionParams, add_or_replace_point_for_min_distance, commit_final_point,
    get_step_distance_and_corner_optimized_stroke, split_stroke_by_right_angle_corner,
    update_last_point_parameters,
};
use crate::types::Stroke;

/// Three-stage pipeline.
///
/// 1. A fixed, very small step prefilter removes sub-pixel jitter before any
///    curvature is computed (exposed as the sample stroke).
/// 2. The sample is merged at a coarse step on straight runs and a fine step
///    near corners.
/// 3. The merged stroke is split at its corners.
///
/// Stages 2 and 3 are recomputed over the whole stroke on every sample.
#[derive(Debug, Clone)]
pub struct CornerMergeOptimizer {
    config: OptimizerConfig,
    params: DualResolutionParams,
    original: Stroke,
    sample: Stroke,
    merged: Stroke,
    segments: Vec<Stroke>,
    active: bool,
}

impl Default for CornerMergeOptimizer {
    fn default() -> Self {
        Self::new(&OptimizerConfig::default())
    }
}

impl CornerMergeOptimizer {
    pub fn new(config: &OptimizerConfig) -> Self {
        let mut config = validated_config(config).into_owned();
        config.step_distance = sanitize_step_distance(config.step_distance);
        config.prefilter_step_distance = sanitize_step_distance(config.prefilter_step_distance);
        let params = DualResolutionParams {
            coarse_step: config.step_distance,
            fine_step: sanitize_step_distance(config.corner_step_distance()),
            corner: config.corner.clone(),
        };
        Self {
            config,
            params,
            original: Stroke::new(),
            sample: Stroke::new(),
            merged: Stroke::new(),
            segments: Vec::new(),
            active: false,
        }
    }

    /// Step distances and corner thresholds of the merge stage
    pub fn merge_params(&self) -> &DualResolutionParams {
        &self.params
    }

    /// The merged stroke before corner splitting
    pub fn merged_stroke(&self) -> &Stroke {
        &self.merged
    }

    fn admit(&mut self, location: Vec2) {
        self.original.add_point(location);
        update_last_point_parameters(&mut self.original);

        let outcome = add_or_replace_point_for_min_distance(
            &mut self.sample,
            location,
            self.config.prefilter_step_distance,
        );
        update_last_point_parameters(&mut self.sample);
        trace!("CornerMergeOptimizer: {:?} at ({:.1}, {:.1})", outcome, location.x, location.y);
    }

    fn recompute(&mut self) {
        self.merged = get_step_distance_and_corner_optimized_stroke(&self.sample, &self.params);
        self.segments = split_stroke_by_right_angle_corner(&self.merged, &self.params.corner);
    }

    fn reset(&mut self) {
        self.original.clear();
        self.sample.clear();
        self.merged.clear();
        self.segments.clear();
    }
}

impl StrokeOptimizer for CornerMergeOptimizer {
    fn set_input_step_distance(&mut self, step_distance: f32) {
        self.config.step_distance = sanitize_step_distance(step_distance);
        self.params.coarse_step = self.config.step_distance;
        self.params.fine_step = sanitize_step_distance(self.config.corner_step_distance());
    }

    fn input_step_distance(&self) -> f32 {
        self.params.coarse_step
    }

    fn on_pointer_down(&mut self, location: Vec2) {
        if !is_valid_location(location) {
            return;
        }
        if self.active {
            debug!("CornerMergeOptimizer: pointer down while active, restarting stroke");
        }

        self.reset();
        self.active = true;
        self.admit(location);
        self.recompute();
    }

    fn on_pointer_move(&mut self, location: Vec2) {
        if !self.active || !is_valid_location(location) {
            return;
        }
        self.admit(location);
        self.recompute();
    }

    fn on_pointer_up(&mut self, location: Vec2) {
        if !self.active || !is_valid_location(location) {
            return;
        }
        self.admit(location);
        commit_final_point(&mut self.sample);
        update_last_point_parameters(&mut self.sample);
        self.recompute();
        self.active = false;

        debug!(
            "CornerMergeOptimizer: stroke finished, {} raw -> {} sampled -> {} merged in {} segments",
            self.original.len(),
            self.sample.len(),
            self.merged.len(),
            self.segments.len()
        );
    }

    fn cancel_input(&mut self) {
        if self.active {
            debug!("CornerMergeOptimizer: stroke cancelled");
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

    fn sample_stroke(&self) -> Option<&Stroke> {
        Some(&self.sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::test_support::draw;

    fn optimizer(step_distance: f32) -> CornerMergeOptimizer {
        let mut config = OptimizerConfig::default().with_step_distance(step_distance);
        config.corner.near_input_index_range = 1;
        CornerMergeOptimizer::new(&config)
    }

    /// Right angle at (50, 0), sampled every half pixel with sub-pixel wobble
    fn wobbly_l_shape() -> Vec<(f32, f32)> {
        let wobble = |i: usize| if i % 2 == 0 { 0.2 } else { -0.2 };
        let mut points: Vec<(f32, f32)> = (0..=100)
            .map(|i| (i as f32 * 0.5, wobble(i)))
            .collect();
        points.extend((1..=100).map(|i| (50.0 + wobble(i), i as f32 * 0.5)));
        points
    }

    #[test]
    fn test_prefilter_removes_sub_pixel_jitter() {
        let mut optimizer = optimizer(15.0);
        draw(&mut optimizer, &wobbly_l_shape());

        let sample = optimizer.sample_stroke().unwrap();
        assert_eq!(optimizer.original_stroke().len(), 201);
        assert!(sample.len() < 70);
        assert!(sample.points().iter().all(|p| p.committed));
    }

    #[test]
    fn test_splits_at_corner() {
        let mut optimizer = optimizer(15.0);
        draw(&mut optimizer, &wobbly_l_shape());

        let segments = optimizer.result_strokes();
        assert_eq!(segments.len(), 2);

        let shared = segments[0].last().unwrap();
        assert_eq!(shared.location, segments[1].first().unwrap().location);
        assert!(shared.corner);
        assert!((shared.location - Vec2::new(50.0, 0.0)).length() < 1.5);

        assert_eq!(segments[0].first().unwrap().location, Vec2::new(0.0, 0.2));
        assert_eq!(segments[1].last().unwrap().location, Vec2::new(50.2, 50.0));
    }

    #[test]
    fn test_merged_is_coarser_than_sample() {
        let mut optimizer = optimizer(15.0);
        draw(&mut optimizer, &wobbly_l_shape());

        let sample_len = optimizer.sample_stroke().unwrap().len();
        let merged = optimizer.merged_stroke();
        assert!(merged.len() < sample_len);
        assert!(merged.points().iter().any(|p| p.corner));
    }

    #[test]
    fn test_live_tip_is_not_committed() {
        let mut optimizer = optimizer(15.0);
        optimizer.on_pointer_down(Vec2::ZERO);
        optimizer.on_pointer_move(Vec2::new(14.0, 0.0));
        optimizer.on_pointer_move(Vec2::new(15.5, 0.0));

        // Within the prefilter step of the last sample, yet past the main step
        let tip = optimizer.result_strokes()[0].last().unwrap();
        assert_eq!(tip.location, Vec2::new(15.5, 0.0));
        assert!(!tip.committed);

        optimizer.on_pointer_up(Vec2::new(15.5, 0.0));
        assert!(optimizer.result_strokes()[0].last().unwrap().committed);
    }

    #[test]
    fn test_step_distance_updates_fine_step() {
        let mut optimizer = optimizer(15.0);
        optimizer.set_input_step_distance(40.0);
        assert_eq!(optimizer.input_step_distance(), 40.0);
        assert!((optimizer.merge_params().fine_step - 10.0).abs() < 1e-6);
    }
}
