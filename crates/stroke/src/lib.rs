//! Linework stroke input optimization
//!
//! This crate turns a raw, noisy sequence of pointer samples into clean
//! vector polylines:
//! - [`geometry`] - Vector math primitives (distances, curving angles, line intersection)
//! - [`types::Stroke`] - Append-mostly stroke with per-point derived geometry
//! - [`edit`] - Stateless admission, parameter and corner-splitting algorithms
//! - [`optimizer`] - Pointer-driven pipelines behind the [`StrokeOptimizer`] trait
//! - [`replay`] - `[[x, y], ...]` session recordings that drive an optimizer
//!
//! Everything is synchronous and single-threaded: each pointer event runs one
//! bounded recomputation before returning.

pub mod constants;
pub mod edit;
pub mod geometry;
pub mod optimizer;
pub mod replay;
pub mod types;

pub use constants::*;
pub use edit::*;
pub use geometry::*;
pub use optimizer::*;
pub use replay::*;
pub use types::*;

// Re-export so callers build locations with the same glam version
pub use glam;
pub use linework_config::{ConfigError, CornerConfig, OptimizerConfig, OptimizerKind};
