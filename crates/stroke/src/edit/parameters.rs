//! Per-point length and curvature maintenance.

use crate::geometry::{angle_of_curving, distance};
use crate::types::Stroke;

/// Recompute `length`, `total_length` and `angle` for every point.
///
/// One left-to-right pass, used for initialization and bulk reprocessing.
/// Strokes with fewer than two points get all-zero parameters.
pub fn calculate_point_parameters(stroke: &mut Stroke) {
    let points = stroke.points_mut();
    let n = points.len();

    if n < 2 {
        for point in points.iter_mut() {
            point.length = 0.0;
            point.total_length = 0.0;
            point.angle = 0.0;
        }
        return;
    }

    let mut total = 0.0;
    for i in 0..n {
        let length = if i + 1 < n {
            distance(points[i].location, points[i + 1].location)
        } else {
            0.0
        };
        let angle = if i > 0 && i + 1 < n {
            angle_of_curving(
                points[i - 1].location,
                points[i].location,
                points[i + 1].location,
            )
        } else {
            0.0
        };

        let point = &mut points[i];
        point.length = length;
        point.total_length = total;
        point.angle = angle;
        total += length;
    }
}

/// Refresh only the parameters touched by the latest admission.
///
/// Updates the edge into the last point, the last point's `total_length`,
/// and the curvature of the two vertices before it. O(1) per sample; call
/// once after every admission.
pub fn update_last_point_parameters(stroke: &mut Stroke) {
    let points = stroke.points_mut();
    let Some(last) = points.len().checked_sub(1) else {
        return;
    };

    points[last].length = 0.0;
    points[last].angle = 0.0;
    if last == 0 {
        points[0].total_length = 0.0;
        return;
    }

    let prev = last - 1;
    points[prev].length = distance(points[prev].location, points[last].location);
    points[last].total_length = points[prev].total_length + points[prev].length;

    for i in last.saturating_sub(2).max(1)..last {
        points[i].angle = angle_of_curving(
            points[i - 1].location,
            points[i].location,
            points[i + 1].location,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Vec2;

    use super::*;
    use crate::edit::test_support::stroke_of;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_batch_lengths() {
        let stroke = stroke_of(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        let points = stroke.points();

        assert!((points[0].length - 5.0).abs() < EPSILON);
        assert!((points[1].length - 6.0).abs() < EPSILON);
        assert_eq!(points[2].length, 0.0);
        assert_eq!(points[0].total_length, 0.0);
        assert!((points[1].total_length - 5.0).abs() < EPSILON);
        assert!((points[2].total_length - 11.0).abs() < EPSILON);
        assert!((stroke.total_length() - 11.0).abs() < EPSILON);
    }

    #[test]
    fn test_batch_angles_interior_only() {
        let stroke = stroke_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let points = stroke.points();

        assert_eq!(points[0].angle, 0.0);
        assert!((points[1].angle.abs() - FRAC_PI_2).abs() < EPSILON);
        assert_eq!(points[2].angle, 0.0);
    }

    #[test]
    fn test_batch_single_point() {
        let stroke = stroke_of(&[(4.0, 4.0)]);
        let point = stroke.first().unwrap();
        assert_eq!(point.length, 0.0);
        assert_eq!(point.total_length, 0.0);
    }

    #[test]
    fn test_incremental_matches_batch() {
        let locations = [
            (0.0, 0.0),
            (4.0, 1.0),
            (9.0, 3.0),
            (11.0, 8.0),
            (10.0, 14.0),
            (6.0, 19.0),
        ];

        let mut incremental = Stroke::new();
        for &(x, y) in &locations {
            incremental.add_point(Vec2::new(x, y));
            update_last_point_parameters(&mut incremental);
        }
        let batch = stroke_of(&locations);

        for (a, b) in incremental.points().iter().zip(batch.points()) {
            assert!((a.length - b.length).abs() < EPSILON);
            assert!((a.total_length - b.total_length).abs() < EPSILON);
            assert!((a.angle - b.angle).abs() < EPSILON);
        }
    }

    #[test]
    fn test_incremental_tracks_moving_tail() {
        let mut stroke = Stroke::new();
        stroke.add_point(Vec2::ZERO);
        update_last_point_parameters(&mut stroke);
        stroke.add_point(Vec2::new(10.0, 0.0));
        update_last_point_parameters(&mut stroke);
        stroke.set_provisional(Vec2::new(20.0, 0.0));
        update_last_point_parameters(&mut stroke);
        assert!(stroke.points()[1].angle.abs() < EPSILON);

        // Moving the tail bends the settled vertex
        stroke.set_provisional(Vec2::new(10.0, 10.0));
        update_last_point_parameters(&mut stroke);
        assert!((stroke.points()[1].angle.abs() - FRAC_PI_2).abs() < EPSILON);
        assert!((stroke.total_length() - 20.0).abs() < EPSILON);

        // Dropping the tail leaves the new last point without an outgoing edge
        stroke.discard_provisional();
        update_last_point_parameters(&mut stroke);
        let last = stroke.last().unwrap();
        assert_eq!(last.length, 0.0);
        assert_eq!(last.angle, 0.0);
    }
}
