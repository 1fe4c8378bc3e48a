//! Stroke data model.
//!
//! A [`Stroke`] is an ordered polyline of [`StrokePoint`]s in drawing order.
//! Every point except possibly the last is committed; the last point may be a
//! provisional "live" vertex that the next pointer sample is allowed to
//! overwrite.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A vertex of a stroke with its derived geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    /// Position in surface pixels
    pub location: Vec2,
    /// Distance to the next point (0 for the last point)
    pub length: f32,
    /// Arc length from the first point up to this point
    pub total_length: f32,
    /// Signed curving angle in radians (0 = straight, interior points only)
    pub angle: f32,
    /// False only for a provisional trailing point
    pub committed: bool,
    /// Classified as (or snapped near) a corner
    pub corner: bool,
}

impl StrokePoint {
    /// Create a committed point with default derived fields
    pub fn new(location: Vec2) -> Self {
        Self {
            location,
            length: 0.0,
            total_length: 0.0,
            angle: 0.0,
            committed: true,
            corner: false,
        }
    }

    /// Create a provisional point
    pub fn provisional(location: Vec2) -> Self {
        Self {
            committed: false,
            ..Self::new(location)
        }
    }

    /// Mark this point as a corner
    pub fn with_corner(mut self, corner: bool) -> Self {
        self.corner = corner;
        self
    }
}

/// Errors reported when building a [`Stroke`] from raw points
#[derive(Debug, Error, PartialEq)]
pub enum StrokeError {
    #[error("Provisional point at index {index} is not the final point")]
    ProvisionalNotLast { index: usize },
}

/// An ordered sequence of stroke points
///
/// Invariant: only the final point may have `committed == false`.
/// Serialized as a plain array of points; deserializing checks the invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StrokePoint>", into = "Vec<StrokePoint>")]
pub struct Stroke {
    points: Vec<StrokePoint>,
}

impl TryFrom<Vec<StrokePoint>> for Stroke {
    type Error = StrokeError;

    fn try_from(points: Vec<StrokePoint>) -> Result<Self, Self::Error> {
        let body = points.len().saturating_sub(1);
        match points[..body].iter().position(|p| !p.committed) {
            Some(index) => Err(StrokeError::ProvisionalNotLast { index }),
            None => Ok(Self { points }),
        }
    }
}

impl From<Stroke> for Vec<StrokePoint> {
    fn from(stroke: Stroke) -> Self {
        stroke.points
    }
}

impl Stroke {
    /// Create an empty stroke
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stroke of committed points from locations
    ///
    /// Derived fields are left at their defaults; run
    /// [`calculate_point_parameters`](crate::edit::calculate_point_parameters)
    /// to fill them in.
    pub fn from_locations(locations: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: locations.into_iter().map(StrokePoint::new).collect(),
        }
    }

    pub(crate) fn from_points(points: Vec<StrokePoint>) -> Self {
        debug_assert!(
            points.iter().rev().skip(1).all(|p| p.committed),
            "only the final point may be provisional"
        );
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [StrokePoint] {
        &mut self.points
    }

    pub fn first(&self) -> Option<&StrokePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&StrokePoint> {
        self.points.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut StrokePoint> {
        self.points.last_mut()
    }

    /// Locations in drawing order
    pub fn locations(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(|p| p.location)
    }

    /// Committed points only (excludes a provisional tail)
    pub fn committed_points(&self) -> impl Iterator<Item = &StrokePoint> + '_ {
        self.points.iter().filter(|p| p.committed)
    }

    /// Total arc length, as of the last parameter update
    pub fn total_length(&self) -> f32 {
        self.points.last().map(|p| p.total_length).unwrap_or(0.0)
    }

    /// Append a committed point, committing any provisional tail first
    pub fn add_point(&mut self, location: Vec2) {
        self.commit_tail();
        self.points.push(StrokePoint::new(location));
    }

    /// Point `n` positions before the last one
    ///
    /// `point_at_offset_from_end(0)` is the last point. Returns `None` if the
    /// stroke has fewer than `n + 1` points.
    pub fn point_at_offset_from_end(&self, n: usize) -> Option<&StrokePoint> {
        let index = self.points.len().checked_sub(n + 1)?;
        self.points.get(index)
    }

    /// The provisional tail, if any
    pub fn provisional(&self) -> Option<&StrokePoint> {
        self.points.last().filter(|p| !p.committed)
    }

    /// The most recent committed point
    pub fn last_committed(&self) -> Option<&StrokePoint> {
        match self.provisional() {
            Some(_) => self.point_at_offset_from_end(1),
            None => self.points.last(),
        }
    }

    /// Place or move the provisional tail
    pub fn set_provisional(&mut self, location: Vec2) {
        match self.points.last_mut() {
            Some(last) if !last.committed => *last = StrokePoint::provisional(location),
            _ => self.points.push(StrokePoint::provisional(location)),
        }
    }

    /// Commit a point, replacing the provisional tail if there is one
    pub fn commit_point(&mut self, location: Vec2) {
        self.discard_provisional();
        self.points.push(StrokePoint::new(location));
    }

    /// Promote the provisional tail to a committed point
    ///
    /// Returns `true` if there was a tail to commit.
    pub fn commit_tail(&mut self) -> bool {
        match self.points.last_mut() {
            Some(last) if !last.committed => {
                last.committed = true;
                true
            }
            _ => false,
        }
    }

    /// Drop the provisional tail, returning it
    pub fn discard_provisional(&mut self) -> Option<StrokePoint> {
        if self.provisional().is_some() {
            self.points.pop()
        } else {
            None
        }
    }

    /// Remove all points
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
