//! Geometry primitives used by the focusnav engine.
//!
//! Everything here is a pure value type. Rectangles live in a single shared
//! coordinate space supplied by whatever measures the UI; the engine never
//! computes layout itself.

#![warn(missing_docs)]

/// Cardinal directions and axes.
mod direction;
/// Distance metrics between rectangles.
mod distance;
/// Error types for geometry operations.
mod error;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use direction::{Axis, Direction};
pub use distance::DistanceMethod;
pub use error::{Error, Result};
pub use point::Point;
pub use rect::Rect;
