//! Session replay encoding.
//!
//! A recording is the ordered list of raw pointer coordinates of one stroke,
//! serialized as a JSON array of `[x, y]` pairs. Replaying feeds the first
//! pair to `on_pointer_down`, the last to `on_pointer_up` and everything in
//! between to `on_pointer_move`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::optimizer::StrokeOptimizer;
use crate::types::Stroke;

/// Errors that can occur while decoding or encoding a recording.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Invalid recording JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Non-finite coordinate at index {index}")]
    NonFiniteCoordinate { index: usize },
}

/// One recorded stroke as raw coordinate pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeRecording(Vec<[f32; 2]>);

impl StrokeRecording {
    /// Create a recording from coordinate pairs
    pub fn new(points: Vec<[f32; 2]>) -> Self {
        Self(points)
    }

    /// Capture the locations of a stroke, typically an optimizer's original stroke
    pub fn from_stroke(stroke: &Stroke) -> Self {
        Self(stroke.locations().map(|p| p.to_array()).collect())
    }

    /// Parse a `[[x, y], ...]` JSON document
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let recording: Self = serde_json::from_str(json)?;
        recording.validate()?;
        Ok(recording)
    }

    /// Encode as a `[[x, y], ...]` JSON document
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded locations in order
    pub fn locations(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.0.iter().map(|&p| Vec2::from_array(p))
    }

    fn validate(&self) -> Result<(), ReplayError> {
        match self.locations().position(|p| !p.is_finite()) {
            Some(index) => Err(ReplayError::NonFiniteCoordinate { index }),
            None => Ok(()),
        }
    }

    /// Drive `optimizer` through the recorded gesture.
    ///
    /// An empty recording is a no-op. A single pair replays as a pointer-down
    /// immediately followed by a pointer-up at the same location.
    pub fn replay(&self, optimizer: &mut dyn StrokeOptimizer) {
        let locations: Vec<Vec2> = self.locations().collect();
        let Some((&first, rest)) = locations.split_first() else {
            debug!("Replay: empty recording, nothing to do");
            return;
        };

        optimizer.on_pointer_down(first);
        match rest.split_last() {
            Some((&last, moves)) => {
                for &location in moves {
                    optimizer.on_pointer_move(location);
                }
                optimizer.on_pointer_up(last);
            }
            None => optimizer.on_pointer_up(first),
        }

        debug!("Replay: {} samples replayed", self.len());
    }
}
