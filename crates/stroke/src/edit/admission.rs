//! Distance-gated point admission.
//!
//! A new vertex is committed only once the pointer has travelled at least
//! the step distance from the last committed vertex. Samples closer than
//! that keep overwriting a single provisional tail, which is what removes
//! pointer jitter.

use glam::Vec2;

use crate::constants::COINCIDENT_DISTANCE;
use crate::geometry::distance;
use crate::types::Stroke;

/// Outcome of admitting one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The sample became a committed vertex
    Committed,
    /// The sample is the (new) provisional tail
    Provisional,
}

/// Admit a pointer sample into `stroke`.
///
/// The first sample of a stroke is always committed. After that, a sample
/// closer than `step_distance` to the last committed point replaces the
/// provisional tail; a sample at least `step_distance` away replaces the tail
/// and is committed. Consecutive committed points are therefore always at
/// least `step_distance` apart.
///
/// The previous tail is never committed on its own, even when the far sample
/// turns a sharp corner. The corner vertex is then the first sample past the
/// step, e.g. a square traced at step 8 bends at (96, 0) rather than (100, 0).
///
/// Call on every move/up sample, followed by
/// [`update_last_point_parameters`](super::update_last_point_parameters).
pub fn add_or_replace_point_for_min_distance(
    stroke: &mut Stroke,
    location: Vec2,
    step_distance: f32,
) -> Admission {
    let Some(anchor) = stroke.last_committed() else {
        stroke.add_point(location);
        return Admission::Committed;
    };

    if distance(anchor.location, location) < step_distance {
        stroke.set_provisional(location);
        Admission::Provisional
    } else {
        stroke.commit_point(location);
        Admission::Committed
    }
}

/// Commit the provisional tail at the end of a gesture.
///
/// The final point is kept regardless of distance, unless it coincides with
/// the last committed point, in which case it is dropped. Returns `true` if a
/// point was committed.
pub fn commit_final_point(stroke: &mut Stroke) -> bool {
    let coincident = match (stroke.last_committed(), stroke.provisional()) {
        (Some(anchor), Some(tail)) => {
            distance(anchor.location, tail.location) <= COINCIDENT_DISTANCE
        }
        _ => false,
    };

    if coincident {
        stroke.discard_provisional();
        false
    } else {
        stroke.commit_tail()
    }
}
