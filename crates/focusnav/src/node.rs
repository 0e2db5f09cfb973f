use std::collections::BTreeSet;

use crate::{
    geom::{Direction, Rect},
    handler::{ExtraProps, FocusHandler},
    key::{FocusKey, NodeId},
};

/// Behavior flags for a focusable node, with the defaults a UI element gets
/// when it registers without saying otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFlags {
    /// The node itself is a valid navigation target. Default: `true`.
    pub focusable: bool,
    /// Remember the child on the focus path when focus leaves, and return to
    /// it on re-entry. Default: `true`.
    pub save_last_focused_child: bool,
    /// Deliver `has_focused_child` changes to the node's handler. Default:
    /// `false`.
    pub track_children: bool,
    /// When a focused descendant is removed, restore focus within this node.
    /// Default: `true`.
    pub auto_restore_focus: bool,
    /// The node claims focus at startup via `Engine::focus_forced`. Default:
    /// `false`.
    pub force_focus: bool,
    /// Navigation may not leave this subtree in `boundary_directions`.
    /// Default: `false`.
    pub is_focus_boundary: bool,
    /// Directions blocked by the boundary. Empty means all four.
    pub boundary_directions: BTreeSet<Direction>,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            focusable: true,
            save_last_focused_child: true,
            track_children: false,
            auto_restore_focus: true,
            force_focus: false,
            is_focus_boundary: false,
            boundary_directions: BTreeSet::new(),
        }
    }
}

impl NodeFlags {
    /// Does this node's boundary block leaving (or entering) in `dir`?
    pub fn blocks(&self, dir: Direction) -> bool {
        self.is_focus_boundary
            && (self.boundary_directions.is_empty() || self.boundary_directions.contains(&dir))
    }
}

/// A node in the focus tree, stored in the registry arena.
pub struct FocusableNode {
    /// Caller-visible key.
    pub(crate) key: FocusKey,
    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in insertion order.
    pub(crate) children: Vec<NodeId>,
    /// Registration sequence number, used as the final tie-break.
    pub(crate) order: u64,
    /// Behavior flags.
    pub(crate) flags: NodeFlags,
    /// Child to enter first.
    pub(crate) preferred_child: Option<FocusKey>,
    /// Child that was on the focus path when focus last left this node.
    pub(crate) last_focused_child: Option<FocusKey>,
    /// Is this the focused node?
    pub(crate) focused: bool,
    /// Is a descendant focused?
    pub(crate) has_focused_child: bool,
    /// Context data handed to callbacks.
    pub(crate) extra_props: ExtraProps,
    /// Callbacks, if any.
    pub(crate) handler: Option<Box<dyn FocusHandler>>,
}

impl FocusableNode {
    /// The node's key.
    pub fn key(&self) -> &FocusKey {
        &self.key
    }

    /// Behavior flags.
    pub fn flags(&self) -> &NodeFlags {
        &self.flags
    }

    /// Is the node itself a navigation target?
    pub fn is_focusable(&self) -> bool {
        self.flags.focusable
    }

    /// The configured preferred child.
    pub fn preferred_child_key(&self) -> Option<&FocusKey> {
        self.preferred_child.as_ref()
    }

    /// The remembered last focused child.
    pub fn last_focused_child_key(&self) -> Option<&FocusKey> {
        self.last_focused_child.as_ref()
    }

    /// Is this the focused node?
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Is one of this node's descendants focused?
    pub fn has_focused_child(&self) -> bool {
        self.has_focused_child
    }

    /// Context data handed to callbacks.
    pub fn extra_props(&self) -> &ExtraProps {
        &self.extra_props
    }

    /// Registration sequence number.
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Everything a UI element supplies when it registers.
#[derive(Default)]
pub struct FocusableSpec {
    /// Requested key. A key is generated when absent.
    pub(crate) key: Option<String>,
    /// Parent key.
    pub(crate) parent: Option<String>,
    /// Initial geometry.
    pub(crate) rect: Option<Rect>,
    /// Behavior flags.
    pub(crate) flags: NodeFlags,
    /// Child to enter first.
    pub(crate) preferred_child: Option<String>,
    /// Context data handed to callbacks.
    pub(crate) extra_props: ExtraProps,
    /// Callbacks.
    pub(crate) handler: Option<Box<dyn FocusHandler>>,
}

impl FocusableSpec {
    /// A spec with default flags and a generated key.
    pub fn new() -> Self {
        Self::default()
    }

    /// A spec with an explicit key.
    pub fn keyed(key: impl Into<String>) -> Self {
        Self::new().key(key)
    }

    /// Set the key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the parent key.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the initial geometry.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Replace all flags.
    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set `focusable`.
    pub fn focusable(mut self, v: bool) -> Self {
        self.flags.focusable = v;
        self
    }

    /// Set `save_last_focused_child`.
    pub fn save_last_focused_child(mut self, v: bool) -> Self {
        self.flags.save_last_focused_child = v;
        self
    }

    /// Set `track_children`.
    pub fn track_children(mut self, v: bool) -> Self {
        self.flags.track_children = v;
        self
    }

    /// Set `auto_restore_focus`.
    pub fn auto_restore_focus(mut self, v: bool) -> Self {
        self.flags.auto_restore_focus = v;
        self
    }

    /// Set `force_focus`.
    pub fn force_focus(mut self, v: bool) -> Self {
        self.flags.force_focus = v;
        self
    }

    /// Make the node a focus boundary in the given directions. An empty list
    /// blocks all directions.
    pub fn focus_boundary(mut self, directions: impl IntoIterator<Item = Direction>) -> Self {
        self.flags.is_focus_boundary = true;
        self.flags.boundary_directions = directions.into_iter().collect();
        self
    }

    /// Set the preferred child key.
    pub fn preferred_child(mut self, key: impl Into<String>) -> Self {
        self.preferred_child = Some(key.into());
        self
    }

    /// Set the context data handed to callbacks.
    pub fn extra_props(mut self, props: ExtraProps) -> Self {
        self.extra_props = props;
        self
    }

    /// Attach callbacks.
    pub fn handler(mut self, handler: impl FocusHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }
}

/// A partial change to a registered node. Fields left unset keep their
/// current value.
#[derive(Default)]
pub struct NodeUpdate {
    /// New geometry.
    pub(crate) rect: Option<Rect>,
    /// New `focusable` flag.
    pub(crate) focusable: Option<bool>,
    /// New boundary setting and directions.
    pub(crate) boundary: Option<(bool, BTreeSet<Direction>)>,
    /// New preferred child; `Some(None)` clears it.
    pub(crate) preferred_child: Option<Option<String>>,
    /// New context data.
    pub(crate) extra_props: Option<ExtraProps>,
    /// New callbacks.
    pub(crate) handler: Option<Box<dyn FocusHandler>>,
}

impl NodeUpdate {
    /// An empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update geometry.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Update `focusable`.
    pub fn focusable(mut self, v: bool) -> Self {
        self.focusable = Some(v);
        self
    }

    /// Update the focus boundary. An empty direction list blocks all
    /// directions.
    pub fn focus_boundary(
        mut self,
        enabled: bool,
        directions: impl IntoIterator<Item = Direction>,
    ) -> Self {
        self.boundary = Some((enabled, directions.into_iter().collect()));
        self
    }

    /// Update the preferred child.
    pub fn preferred_child(mut self, key: Option<String>) -> Self {
        self.preferred_child = Some(key);
        self
    }

    /// Update the context data.
    pub fn extra_props(mut self, props: ExtraProps) -> Self {
        self.extra_props = Some(props);
        self
    }

    /// Replace the callbacks.
    pub fn handler(mut self, handler: impl FocusHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }
}
