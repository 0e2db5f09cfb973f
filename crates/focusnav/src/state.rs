//! Focus transitions: flag maintenance and callback ordering.

use tracing::debug;

use crate::{
    handler::{ExtraProps, FocusDetails, FocusHandler},
    key::NodeId,
    layout::LayoutCache,
    registry::Registry,
};

/// The single piece of mutable focus state. Ancestor chains are derived from
/// the registry on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct FocusState {
    /// The focused leaf.
    pub current: Option<NodeId>,
}

/// A focus change about to be committed.
pub struct Transition<'a> {
    /// Previously focused leaf, if it is still registered.
    pub old_leaf: Option<NodeId>,
    /// Surviving proper ancestors of the old focus, nearest first.
    pub old_chain: Vec<NodeId>,
    /// Leaf to focus, or `None` to clear focus.
    pub new_leaf: Option<NodeId>,
    /// Passed to focus and blur callbacks.
    pub details: &'a FocusDetails,
}

/// Run a callback on a node's handler, if it has one.
fn notify(registry: &mut Registry, id: NodeId, f: impl FnOnce(&mut dyn FocusHandler, &ExtraProps)) {
    if let Some(node) = registry.node_mut(id)
        && let Some(handler) = node.handler.as_deref_mut()
    {
        f(handler, &node.extra_props);
    }
}

/// Apply a transition. Flags change before the node's callbacks run, so a
/// handler always observes the new state of its own node.
pub fn commit(
    registry: &mut Registry,
    layouts: &LayoutCache,
    state: &mut FocusState,
    t: &Transition<'_>,
) {
    let new_chain = t
        .new_leaf
        .map(|id| registry.ancestors(id))
        .unwrap_or_default();
    debug!(
        from = ?t.old_leaf.and_then(|id| registry.key_of(id)),
        to = ?t.new_leaf.and_then(|id| registry.key_of(id)),
        "focus transition"
    );

    // Every node on the old path becomes its parent's remembered child.
    let old_path: Vec<NodeId> = t.old_leaf.iter().chain(&t.old_chain).copied().collect();
    for pair in old_path.windows(2) {
        let Some(child_key) = registry.key_of(pair[0]).cloned() else {
            continue;
        };
        if let Some(parent) = registry.node_mut(pair[1])
            && parent.flags.save_last_focused_child
        {
            parent.last_focused_child = Some(child_key);
        }
    }

    if let Some(old) = t.old_leaf
        && t.new_leaf != Some(old)
    {
        if let Some(node) = registry.node_mut(old) {
            node.focused = false;
        }
        let layout = layouts.get(old);
        notify(registry, old, |h, props| {
            h.on_update_focused(false);
            h.on_blur(layout, props, t.details);
        });
    }

    for id in t.old_chain.iter().copied().filter(|id| !new_chain.contains(id)) {
        set_has_focused_child(registry, id, false);
        let layout = layouts.get(id);
        notify(registry, id, |h, props| h.on_blur(layout, props, t.details));
    }

    for id in new_chain
        .iter()
        .rev()
        .copied()
        .filter(|id| !t.old_chain.contains(id))
    {
        set_has_focused_child(registry, id, true);
        let layout = layouts.get(id);
        notify(registry, id, |h, props| h.on_focus(layout, props, t.details));
    }

    state.current = t.new_leaf;
    if let Some(new) = t.new_leaf
        && t.old_leaf != Some(new)
    {
        if let Some(node) = registry.node_mut(new) {
            node.focused = true;
        }
        let layout = layouts.get(new);
        notify(registry, new, |h, props| {
            h.on_update_focused(true);
            h.on_focus(layout, props, t.details);
        });
    }
}

/// Set `has_focused_child`, notifying the observer if the node tracks its
/// children.
fn set_has_focused_child(registry: &mut Registry, id: NodeId, value: bool) {
    let Some(node) = registry.node_mut(id) else {
        return;
    };
    if node.has_focused_child == value {
        return;
    }
    node.has_focused_child = value;
    if node.flags.track_children {
        notify(registry, id, |h, _| h.on_update_has_focused_child(value));
    }
}
