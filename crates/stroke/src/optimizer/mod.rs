//! Stroke input optimizers
//!
//! Each optimizer is a stateful pipeline that turns pointer events into an
//! optimized stroke (or set of stroke segments):
//! - [`DistanceOptimizer`] - single-stage distance filter
//! - [`CornerSplitOptimizer`] - distance filter plus corner splitting
//! - [`CornerMergeOptimizer`] - jitter prefilter, dual-resolution merge and
//!   corner splitting
//!
//! All three implement [`StrokeOptimizer`], the contract consumed by the
//! rendering/UI layer. They share no state; one instance handles exactly
//! one pointer at a time.

mod corner_merge;
mod corner_split;
mod distance;

use std::borrow::Cow;

use glam::Vec2;
use linework_config::{OptimizerConfig, OptimizerKind};
use tracing::warn;

use crate::constants::MIN_STEP_DISTANCE;
use crate::types::Stroke;

pub use corner_merge::CornerMergeOptimizer;
pub use corner_split::CornerSplitOptimizer;
pub use distance::DistanceOptimizer;

/// Pointer-driven stroke optimization pipeline
///
/// State machine: idle -> `on_pointer_down` -> active -> `on_pointer_move`*
/// -> `on_pointer_up` / `cancel_input` -> idle. Moves and ups while idle are
/// ignored; a pointer-down while active restarts the stroke.
///
/// Results are recomputed synchronously on every event, so the accessors
/// always reflect the latest sample.
pub trait StrokeOptimizer {
    /// Set the minimum travel (pixels) before a vertex is committed
    fn set_input_step_distance(&mut self, step_distance: f32);

    /// Current step distance
    fn input_step_distance(&self) -> f32;

    /// Begin a stroke at `location`
    fn on_pointer_down(&mut self, location: Vec2);

    /// Continue the active stroke
    fn on_pointer_move(&mut self, location: Vec2);

    /// Finish the active stroke; the final point is always kept
    fn on_pointer_up(&mut self, location: Vec2);

    /// Discard the in-progress stroke and return to idle
    fn cancel_input(&mut self);

    /// Check if a stroke is currently in progress
    fn is_active(&self) -> bool;

    /// Every raw sample of the current (or last finished) stroke
    fn original_stroke(&self) -> &Stroke;

    /// Current optimized output
    fn result_strokes(&self) -> &[Stroke];

    /// Intermediate diagnostic stroke, for pipelines that have one
    fn sample_stroke(&self) -> Option<&Stroke> {
        None
    }
}

/// Build the optimizer selected by `config.kind`
pub fn create_optimizer(config: &OptimizerConfig) -> Box<dyn StrokeOptimizer> {
    match config.kind {
        OptimizerKind::Distance => Box::new(DistanceOptimizer::new(config)),
        OptimizerKind::CornerSplit => Box::new(CornerSplitOptimizer::new(config)),
        OptimizerKind::CornerMerge => Box::new(CornerMergeOptimizer::new(config)),
    }
}

/// Check a configuration, falling back to the defaults for its pipeline
pub(crate) fn validated_config(config: &OptimizerConfig) -> Cow<'_, OptimizerConfig> {
    match config.validate() {
        Ok(()) => Cow::Borrowed(config),
        Err(err) => {
            warn!("Invalid optimizer config ({}), using defaults", err);
            Cow::Owned(OptimizerConfig::new(config.kind))
        }
    }
}

/// Clamp a step distance to a usable value
pub(crate) fn sanitize_step_distance(step_distance: f32) -> f32 {
    if step_distance.is_finite() && step_distance >= MIN_STEP_DISTANCE {
        step_distance
    } else {
        warn!(
            "Invalid step distance {}, clamping to {}",
            step_distance, MIN_STEP_DISTANCE
        );
        MIN_STEP_DISTANCE
    }
}

/// Check that a pointer location can enter the pipeline
pub(crate) fn is_valid_location(location: Vec2) -> bool {
    if location.is_finite() {
        true
    } else {
        warn!("Ignoring non-finite pointer location {:?}", location);
        false
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec2;

    use super::StrokeOptimizer;

    /// Drive a full gesture: first point down, last point up, rest moves
    pub fn draw(optimizer: &mut dyn StrokeOptimizer, points: &[(f32, f32)]) {
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        optimizer.on_pointer_down(Vec2::new(first.0, first.1));

        if let Some((&last, moves)) = rest.split_last() {
            for &(x, y) in moves {
                optimizer.on_pointer_move(Vec2::new(x, y));
            }
            optimizer.on_pointer_up(Vec2::new(last.0, last.1));
        } else {
            optimizer.on_pointer_up(Vec2::new(first.0, first.1));
        }
    }
}
