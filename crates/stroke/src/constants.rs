/// Smallest step distance an optimizer accepts (pixels).
pub const MIN_STEP_DISTANCE: f32 = 0.01;

/// Sine of the smallest angle between two lines still treated as crossing.
///
/// Lines closer to parallel than this report no intersection.
pub const PARALLEL_TOLERANCE: f32 = 1e-6;

/// Points closer than this are treated as the same location (pixels).
pub const COINCIDENT_DISTANCE: f32 = 1e-4;
