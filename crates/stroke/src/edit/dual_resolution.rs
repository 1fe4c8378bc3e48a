//! Dual-resolution re-sampling.
//!
//! Re-admits a finely sampled stroke at a coarse step along low-curvature
//! stretches and at a fine step near detected corners, so straight runs
//! collapse to few vertices while corners keep their shape. Corners are
//! pinned: the apex (or the sharper vertex) is always committed.

use glam::Vec2;
use linework_config::CornerConfig;
use serde::{Deserialize, Serialize};

use super::admission::{add_or_replace_point_for_min_distance, commit_final_point};
use super::corners::{Corner, detect_corners};
use super::parameters::calculate_point_parameters;
use crate::constants::COINCIDENT_DISTANCE;
use crate::geometry::distance;
use crate::types::Stroke;

/// Parameters for [`get_step_distance_and_corner_optimized_stroke`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualResolutionParams {
    /// Step distance away from corners
    pub coarse_step: f32,
    /// Step distance within `coarse_step` of a corner
    pub fine_step: f32,
    /// Corner detection thresholds
    pub corner: CornerConfig,
}

/// Merge `sample` into a single stroke with corner-aware step distances.
///
/// `sample` must have up-to-date parameters. Points admitted in corner mode,
/// and the pinned corner points themselves, carry `corner = true`. The
/// result keeps a provisional tail while `sample` does; once `sample` is
/// fully committed the result's final point is committed too. Parameters of
/// the result are recomputed before returning.
pub fn get_step_distance_and_corner_optimized_stroke(
    sample: &Stroke,
    params: &DualResolutionParams,
) -> Stroke {
    let points = sample.points();
    let mut merged = Stroke::new();
    let Some(first) = points.first() else {
        return merged;
    };

    let corners = detect_corners(points, &params.corner);
    let corner_positions: Vec<f32> = corners
        .iter()
        .map(|c| points[c.index()].total_length)
        .collect();
    let mut pending = corners.iter().peekable();

    merged.add_point(first.location);
    for (i, point) in points.iter().enumerate().skip(1) {
        match pending.peek() {
            // First vertex of a rounded corner, replaced by the apex
            Some(Corner::Apex { index, .. }) if *index == i + 1 => continue,
            Some(&&Corner::Apex { index, apex }) if index == i => {
                pin_corner(&mut merged, apex);
                pending.next();
                continue;
            }
            Some(&&Corner::Vertex { index }) if index == i => {
                pin_corner(&mut merged, point.location);
                pending.next();
                continue;
            }
            _ => {}
        }

        let near_corner = corner_positions
            .iter()
            .any(|&pos| (point.total_length - pos).abs() < params.coarse_step);
        let step = if near_corner {
            params.fine_step
        } else {
            params.coarse_step
        };

        if point.committed {
            add_or_replace_point_for_min_distance(&mut merged, point.location, step);
        } else {
            // The live pointer tip stays provisional at any distance
            merged.set_provisional(point.location);
        }
        if let Some(last) = merged.last_mut() {
            last.corner = near_corner;
        }
    }

    if sample.provisional().is_none() {
        commit_final_point(&mut merged);
    }

    calculate_point_parameters(&mut merged);
    merged
}

/// Commit a corner location, reusing the last committed point if it coincides
fn pin_corner(stroke: &mut Stroke, location: Vec2) {
    let coincident = stroke
        .last_committed()
        .is_some_and(|p| distance(p.location, location) <= COINCIDENT_DISTANCE);

    if coincident {
        stroke.discard_provisional();
    } else {
        stroke.commit_point(location);
    }

    if let Some(last) = stroke.last_mut() {
        last.corner = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::test_support::stroke_of;

    fn params(coarse_step: f32, fine_step: f32) -> DualResolutionParams {
        DualResolutionParams {
            coarse_step,
            fine_step,
            corner: CornerConfig {
                near_input_index_range: 1,
                corner_minimum_curving_angle: 75f32.to_radians(),
                ..Default::default()
            },
        }
    }

    /// An L shape sampled every unit: along x to (40, 0), then up to (40, 40)
    fn fine_l_shape() -> Stroke {
        let mut locations: Vec<(f32, f32)> = (0..=40).map(|x| (x as f32, 0.0)).collect();
        locations.extend((1..=40).map(|y| (40.0, y as f32)));
        stroke_of(&locations)
    }

    #[test]
    fn test_empty_sample() {
        let merged = get_step_distance_and_corner_optimized_stroke(&Stroke::new(), &params(10.0, 2.0));
        assert!(merged.is_empty());
    }

    #[test]
    fn test_straight_run_uses_coarse_step() {
        let sample = stroke_of(&(0..=50).map(|x| (x as f32, 0.0)).collect::<Vec<_>>());
        let merged = get_step_distance_and_corner_optimized_stroke(&sample, &params(10.0, 2.0));

        let locations: Vec<Vec2> = merged.locations().collect();
        assert_eq!(locations.len(), 6);
        assert_eq!(locations[0], Vec2::ZERO);
        assert_eq!(locations[5], Vec2::new(50.0, 0.0));
        assert!(merged.points().iter().all(|p| p.committed && !p.corner));
    }

    #[test]
    fn test_corner_is_pinned_and_flagged() {
        let merged = get_step_distance_and_corner_optimized_stroke(&fine_l_shape(), &params(10.0, 2.0));

        let corner = merged
            .points()
            .iter()
            .find(|p| p.location == Vec2::new(40.0, 0.0))
            .expect("corner vertex must survive the merge");
        assert!(corner.corner);
        assert_eq!(merged.last().unwrap().location, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn test_fine_step_near_corner() {
        let merged = get_step_distance_and_corner_optimized_stroke(&fine_l_shape(), &params(10.0, 2.0));

        // Close to the corner, committed points are packed at the fine step
        let near: Vec<&crate::types::StrokePoint> = merged
            .points()
            .iter()
            .filter(|p| distance(p.location, Vec2::new(40.0, 0.0)) < 10.0)
            .collect();
        assert!(near.len() > 3);
        assert!(near.iter().all(|p| p.corner));

        // Far from it, the coarse step applies
        let far = merged
            .points()
            .iter()
            .filter(|p| p.location.y == 0.0 && p.location.x <= 20.0)
            .count();
        assert_eq!(far, 3);
    }

    #[test]
    fn test_provisional_sample_tail_is_kept() {
        let mut sample = fine_l_shape();
        sample.set_provisional(Vec2::new(40.0, 41.0));
        calculate_point_parameters(&mut sample);

        let merged = get_step_distance_and_corner_optimized_stroke(&sample, &params(10.0, 2.0));
        let last = merged.last().unwrap();
        assert_eq!(last.location, Vec2::new(40.0, 41.0));
        assert!(!last.committed);
    }

    #[test]
    fn test_far_provisional_tail_stays_provisional() {
        let mut sample = stroke_of(&(0..=20).map(|x| (x as f32, 0.0)).collect::<Vec<_>>());
        sample.set_provisional(Vec2::new(40.0, 0.0));
        calculate_point_parameters(&mut sample);

        let merged = get_step_distance_and_corner_optimized_stroke(&sample, &params(10.0, 2.0));
        let locations: Vec<Vec2> = merged.committed_points().map(|p| p.location).collect();
        assert_eq!(
            locations,
            vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)]
        );

        let tail = merged.provisional().unwrap();
        assert_eq!(tail.location, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn test_feeds_corner_split() {
        let merged = get_step_distance_and_corner_optimized_stroke(&fine_l_shape(), &params(10.0, 2.0));
        let segments = crate::edit::split_stroke_by_right_angle_corner(&merged, &params(10.0, 2.0).corner);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].last().unwrap().location, Vec2::new(40.0, 0.0));
        assert_eq!(segments[1].first().unwrap().location, Vec2::new(40.0, 0.0));
    }
}
