//! focusnav: directional focus navigation for remote-controlled UIs.
//!
//! A UI registers its focusable regions as a tree of nodes, pushes measured
//! rectangles into the engine, and feeds it arrow and enter events. The
//! engine keeps exactly one focused node, maintains the focused and
//! has-focused-child flags along the focus path, and notifies each node's
//! [`FocusHandler`] as those flags change.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Engine`] - Owns the focus tree and focus state
//! - [`EventDispatch`] - Arrow and enter routing, implemented by [`Engine`]
//! - [`FocusableSpec`] - What a UI element supplies when it registers
//! - [`FocusHandler`] - Per-node callbacks
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Direction, DistanceMethod)
//! - [`navigate`] - Directional candidate search and scoring

#![warn(missing_docs)]

/// Geometry primitives.
pub use focusnav_geom as geom;

/// Engine configuration.
pub mod config;
/// Event routing.
pub mod dispatch;
/// Diagnostics tree dump.
pub mod dump;
/// The engine.
pub mod engine;
/// Error types.
pub mod error;
/// Callbacks and event details.
pub mod handler;
/// Node keys and ids.
pub mod key;
/// Geometry cache.
pub mod layout;
/// Directional navigation.
pub mod navigate;
/// Node types and registration specs.
pub mod node;
/// The node registry.
pub mod registry;

mod entry;
mod state;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::NavigationConfig;
pub use dispatch::{EventDispatch, KeyTracker, Navigation};
pub use engine::Engine;
pub use error::{Error, Result};
pub use handler::{ArrowAction, ExtraProps, FocusDetails, FocusHandler, Handlers, KeyPressDetails};
pub use key::{FocusKey, NodeId};
pub use navigate::{NavigationTrace, ScoredCandidate};
pub use node::{FocusableNode, FocusableSpec, NodeFlags, NodeUpdate};
pub use registry::Registry;

/// Common imports for engine users.
pub mod prelude {
    pub use crate::{
        Engine, EventDispatch, FocusDetails, FocusHandler, FocusKey, FocusableSpec, Handlers,
        NavigationConfig, Navigation, NodeUpdate,
        geom::{Direction, DistanceMethod, Rect},
    };
}
