//! Segmentation of a stroke at its corners.

use linework_config::CornerConfig;

use super::corners::{Corner, detect_corners};
use super::parameters::calculate_point_parameters;
use crate::types::{Stroke, StrokePoint};

/// Split `stroke` into segments at right-angle-like corners.
///
/// Segments are returned in drawing order and always meet at a shared
/// corner point, each segment owning its own copy:
/// - apex corners end the segment at the vertex before the corner, append
///   the apex, and start the next segment from the apex;
/// - vertex corners end the segment at the corner vertex and start the next
///   segment from it.
///
/// Shared corner points carry `corner = true`. Every segment has its
/// parameters recomputed, so lengths and curvature are segment-local. An
/// empty stroke yields no segments; a stroke without corners yields one.
pub fn split_stroke_by_right_angle_corner(stroke: &Stroke, config: &CornerConfig) -> Vec<Stroke> {
    let points = stroke.points();
    if points.is_empty() {
        return Vec::new();
    }

    let corners = detect_corners(points, config);
    let mut segments = Vec::with_capacity(corners.len() + 1);
    let mut current: Vec<StrokePoint> = Vec::new();
    let mut start = 0;

    for corner in corners {
        let shared = match corner {
            Corner::Apex { index, apex } => {
                current.extend_from_slice(&points[start..index]);
                start = index;
                StrokePoint::new(apex).with_corner(true)
            }
            Corner::Vertex { index } => {
                current.extend_from_slice(&points[start..index]);
                start = index + 1;
                points[index].with_corner(true)
            }
        };

        current.push(shared);
        segments.push(finish_segment(&mut current));
        current.push(shared);
    }

    current.extend_from_slice(&points[start..]);
    segments.push(finish_segment(&mut current));
    segments
}

fn finish_segment(points: &mut Vec<StrokePoint>) -> Stroke {
    let mut segment = Stroke::from_points(std::mem::take(points));
    calculate_point_parameters(&mut segment);
    segment
}
