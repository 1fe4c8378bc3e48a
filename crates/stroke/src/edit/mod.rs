//! Stroke edit logic
//!
//! Stateless algorithms operating on [`Stroke`](crate::types::Stroke):
//! - [`parameters`] - batch and incremental length/curvature maintenance
//! - [`admission`] - distance-gated point admission (jitter suppression)
//! - [`corners`] - the shared corner scan with apex refinement
//! - [`split`] - segmentation of a stroke at its corners
//! - [`dual_resolution`] - coarse/fine re-sampling around corners

pub mod admission;
pub mod corners;
pub mod dual_resolution;
pub mod parameters;
pub mod split;

pub use admission::{Admission, add_or_replace_point_for_min_distance, commit_final_point};
pub use corners::{Corner, detect_corners};
pub use dual_resolution::{DualResolutionParams, get_step_distance_and_corner_optimized_stroke};
pub use parameters::{calculate_point_parameters, update_last_point_parameters};
pub use split::split_stroke_by_right_angle_corner;

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec2;

    use super::calculate_point_parameters;
    use crate::types::Stroke;

    /// Committed stroke with derived parameters filled in
    pub fn stroke_of(points: &[(f32, f32)]) -> Stroke {
        let mut stroke = Stroke::from_locations(points.iter().map(|&(x, y)| Vec2::new(x, y)));
        calculate_point_parameters(&mut stroke);
        stroke
    }
}
