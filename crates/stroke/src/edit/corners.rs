//! Corner detection over a stroke's curvature.
//!
//! The scan walks interior vertices and sums each vertex's curvature with
//! the curvature carried over from its predecessor, so a sharp turn drawn as
//! two moderately bent vertices is still recognized as one corner. When the
//! two bends are similar in magnitude the corner is refined to the
//! intersection of the incoming and outgoing chords (the apex).
//!
//! The same scan feeds both [`split_stroke_by_right_angle_corner`] and the
//! dual-resolution merge.
//!
//! [`split_stroke_by_right_angle_corner`]: super::split_stroke_by_right_angle_corner

use glam::Vec2;
use linework_config::CornerConfig;

use crate::geometry::{cross_point, distance};
use crate::types::StrokePoint;

/// A detected corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Corner {
    /// Vertices `index - 1` and `index` form one rounded corner whose
    /// geometric apex is `apex`
    Apex { index: usize, apex: Vec2 },
    /// Vertex `index` is the corner
    Vertex { index: usize },
}

impl Corner {
    /// Index of the sampled vertex the corner is anchored to
    pub fn index(&self) -> usize {
        match *self {
            Corner::Apex { index, .. } | Corner::Vertex { index } => index,
        }
    }
}

/// Find corners in `points`, in ascending index order.
///
/// A vertex is eligible when it has at least two points on each side and is
/// more than `near_input_index_range` points away from the end. Curvature
/// used by a corner is consumed and never carried into the next vertex.
/// After an apex corner the following vertex is skipped.
pub fn detect_corners(points: &[StrokePoint], config: &CornerConfig) -> Vec<Corner> {
    let mut corners = Vec::new();
    let Some(last) = points.len().checked_sub(1) else {
        return corners;
    };

    let mut consumed_through: Option<usize> = None;
    let mut i = 2;
    while i + 2 <= last && last - i > config.near_input_index_range {
        let cur = points[i].angle.abs();
        let carried = if consumed_through.is_some_and(|c| c >= i - 1) {
            0.0
        } else {
            points[i - 1].angle.abs()
        };

        if cur + carried < config.corner_minimum_curving_angle {
            i += 1;
            continue;
        }

        if is_combined(cur, carried, config.combination_corner_difference_ratio) {
            if let Some(apex) = corner_apex(points, i, config.max_corner_cross_point_distance) {
                corners.push(Corner::Apex { index: i, apex });
                consumed_through = Some(i + 1);
                i += 2;
                continue;
            }
        }

        // Heuristic fallback: split at the sharper of the two vertices
        let index = if carried > cur { i - 1 } else { i };
        corners.push(Corner::Vertex { index });
        consumed_through = Some(i);
        i += 1;
    }

    corners
}

/// Whether two curvature magnitudes describe one rounded corner
fn is_combined(a: f32, b: f32, ratio: f32) -> bool {
    a > 0.0 && b > 0.0 && a <= b * ratio && b <= a * ratio
}

/// Intersect the chord entering vertex `i - 1` with the chord leaving `i`.
///
/// Returns `None` if the chords do not cross or the crossing lies farther
/// than `max_distance` from both corner vertices.
fn corner_apex(points: &[StrokePoint], i: usize, max_distance: f32) -> Option<Vec2> {
    let apex = cross_point(
        points[i - 2].location,
        points[i - 1].location,
        points[i].location,
        points[i + 2].location,
    )?;

    let nearest = distance(apex, points[i - 1].location).min(distance(apex, points[i].location));
    (nearest <= max_distance).then_some(apex)
}
