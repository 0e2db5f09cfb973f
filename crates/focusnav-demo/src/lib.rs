//! A headless television home screen driven by focusnav.
//!
//! [`Home`] registers a profile button, a side menu, a progress bar and rows
//! of assets, feeds remote-control strokes to the engine, and re-measures the
//! screen after each one. Menu items switch pages by swapping the content
//! rows.

/// The home screen.
pub mod home;
/// Remote-control key strokes.
pub mod input;
/// Pages and their rows.
pub mod page;
/// Focus handlers for on-screen elements.
pub mod widgets;

#[cfg(test)]
mod tests;

pub use home::Home;
pub use input::{Key, Stroke};
pub use page::Page;
