//! Test utilities: a recording handler, a grid builder and a focus invariant
//! check.

/// Grid layout builder.
pub mod grid;
/// Recording handler.
pub mod recorder;

pub use grid::Grid;
pub use recorder::{Event, Log, Record, Recorder};

use crate::engine::Engine;

/// Check that the focus flags agree with the focused node: exactly the
/// focused node has `focused`, and exactly its proper ancestors have
/// `has_focused_child`. Returns a description of the first violation.
pub fn check_focus_flags(engine: &Engine) -> Result<(), String> {
    let current = engine.state.current;
    let ancestors = current
        .map(|id| engine.registry.ancestors(id))
        .unwrap_or_default();
    if let Some(id) = current
        && engine.registry.node(id).is_none()
    {
        return Err("focused node is not registered".into());
    }
    for (id, node) in engine.registry.iter() {
        if node.focused != (current == Some(id)) {
            return Err(format!("{}: focused = {}", node.key, node.focused));
        }
        if node.has_focused_child != ancestors.contains(&id) {
            return Err(format!(
                "{}: has_focused_child = {}",
                node.key, node.has_focused_child
            ));
        }
    }
    Ok(())
}
