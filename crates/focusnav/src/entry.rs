//! How focus descends into a container: preferred child, then remembered
//! child, then the child nearest to where focus is coming from.

use std::cmp::Ordering;

use crate::{
    geom::{DistanceMethod, Rect},
    key::NodeId,
    layout::LayoutCache,
    registry::Registry,
};

/// Where focus is entering a container from.
#[derive(Debug, Clone, Copy)]
pub enum Entry {
    /// No origin: pick the top-left-most child.
    TopLeft,
    /// Directional entry: pick the child nearest to this rect.
    From(Rect),
}

/// Can focus end up on this node or somewhere beneath it?
pub fn is_enterable(registry: &Registry, id: NodeId) -> bool {
    let Some(node) = registry.node(id) else {
        return false;
    };
    node.flags.focusable || node.children.iter().any(|c| is_enterable(registry, *c))
}

/// Pick the child focus should move to when it lands on `id`. Returns `None`
/// when nothing beneath `id` can take focus.
pub fn pick_child(
    registry: &Registry,
    layouts: &LayoutCache,
    method: DistanceMethod,
    id: NodeId,
    entry: Entry,
) -> Option<NodeId> {
    let node = registry.node(id)?;
    let children: Vec<NodeId> = node
        .children
        .iter()
        .copied()
        .filter(|c| is_enterable(registry, *c))
        .collect();
    if children.is_empty() {
        return None;
    }

    let remembered = if node.flags.save_last_focused_child {
        node.last_focused_child.as_ref()
    } else {
        None
    };
    for key in node.preferred_child.iter().chain(remembered) {
        if let Some(c) = registry.id(key.as_str())
            && registry.is_ancestor_id(id, c)
            && is_enterable(registry, c)
        {
            return Some(c);
        }
    }

    nearest(registry, layouts, method, &children, entry)
}

/// Descend from `id` until reaching a node with nothing enterable beneath it.
pub fn resolve_leaf(
    registry: &Registry,
    layouts: &LayoutCache,
    method: DistanceMethod,
    id: NodeId,
    entry: Entry,
) -> NodeId {
    let mut current = id;
    while let Some(next) = pick_child(registry, layouts, method, current, entry) {
        current = next;
    }
    current
}

/// The best of `candidates` for an entry. Measured nodes beat unmeasured
/// ones; remaining ties go to the node registered first.
fn nearest(
    registry: &Registry,
    layouts: &LayoutCache,
    method: DistanceMethod,
    candidates: &[NodeId],
    entry: Entry,
) -> Option<NodeId> {
    let order = |id: NodeId| registry.node(id).map_or(u64::MAX, |n| n.order);
    candidates.iter().copied().min_by(|a, b| {
        let by_geometry = match (layouts.get(*a), layouts.get(*b)) {
            (Some(ra), Some(rb)) => match entry {
                Entry::TopLeft => ra
                    .top()
                    .total_cmp(&rb.top())
                    .then(ra.left().total_cmp(&rb.left())),
                Entry::From(origin) => method
                    .distance(&origin, &ra)
                    .total_cmp(&method.distance(&origin, &rb)),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_geometry.then(order(*a).cmp(&order(*b)))
    })
}
