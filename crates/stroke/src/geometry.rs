//! Vector math primitives for stroke geometry.
//!
//! Pure functions over [`glam::Vec2`]: distances, signed vertex angles and
//! line intersection. Nothing here holds state.

use std::f32::consts::PI;

use glam::Vec2;

use crate::constants::PARALLEL_TOLERANCE;

/// Euclidean distance between two locations
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    p1.distance(p2)
}

/// Signed interior angle at `p2` between `p1 - p2` and `p3 - p2`.
///
/// Result lies in (-PI, PI]. PI means the path runs straight through `p2`,
/// 0 means `p1` and `p3` leave `p2` in the same direction.
pub fn angle_of_corner(p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
    let a = p1 - p2;
    let b = p3 - p2;
    let angle = a.perp_dot(b).atan2(a.dot(b));
    // atan2 yields -PI for a negative-zero cross term
    if angle <= -PI { PI } else { angle }
}

/// Signed curving angle at `p2`: 0 for a straight run, +/-PI for a reversal.
///
/// This is the value stored in [`StrokePoint::angle`](crate::types::StrokePoint).
pub fn angle_of_curving(p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
    let corner = angle_of_corner(p1, p2, p3);
    if corner >= 0.0 {
        corner - PI
    } else {
        corner + PI
    }
}

/// Intersection of the infinite lines through `l1p1, l1p2` and `l2p1, l2p2`.
///
/// Returns `None` when the lines are parallel within [`PARALLEL_TOLERANCE`],
/// when either line is degenerate (coincident points), or when the result is
/// not finite.
pub fn cross_point(l1p1: Vec2, l1p2: Vec2, l2p1: Vec2, l2p2: Vec2) -> Option<Vec2> {
    let d1 = l1p2 - l1p1;
    let d2 = l2p2 - l2p1;

    // |d1 x d2| = |d1| |d2| sin(theta)
    let denom = d1.perp_dot(d2);
    if denom.abs() <= PARALLEL_TOLERANCE * d1.length() * d2.length() {
        return None;
    }

    let t = (l2p1 - l1p1).perp_dot(d2) / denom;
    let point = l1p1 + d1 * t;
    point.is_finite().then_some(point)
}

/// Perpendicular distance from `pt` to the infinite line through `p1, p2`.
///
/// A degenerate line (coincident `p1`, `p2`) yields 0.
pub fn distance_of_line_and_point(p1: Vec2, p2: Vec2, pt: Vec2) -> f32 {
    let dir = p2 - p1;
    let len = dir.length();
    if len <= f32::EPSILON {
        return 0.0;
    }
    dir.perp_dot(pt - p1).abs() / len
}
