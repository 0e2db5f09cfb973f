use tracing::{debug, warn};

use crate::{
    config::NavigationConfig,
    dispatch::KeyTracker,
    dump,
    entry::{Entry, is_enterable, pick_child, resolve_leaf},
    error::{Error, Result},
    geom::Rect,
    handler::FocusDetails,
    key::{FocusKey, NodeId},
    layout::LayoutCache,
    navigate::NavigationTrace,
    node::{FocusableNode, FocusableSpec, NodeUpdate},
    registry::Registry,
    state::{FocusState, Transition, commit},
};

/// The focus navigation engine. One engine owns the focus tree, the layout
/// cache and the focus state for a UI; every operation runs to completion
/// before returning.
///
/// Event routing lives in [`crate::EventDispatch`], which `Engine`
/// implements.
pub struct Engine {
    /// Registered nodes.
    pub(crate) registry: Registry,
    /// Last-known geometry.
    pub(crate) layouts: LayoutCache,
    /// Current focus.
    pub(crate) state: FocusState,
    /// Navigation settings.
    pub(crate) config: NavigationConfig,
    /// Repeat counts for held inputs.
    pub(crate) keys: KeyTracker,
    /// Are dispatched events ignored?
    pub(crate) paused: bool,
    /// Scored candidates of the last navigation, when `visual_debug` is on.
    pub(crate) last_trace: Option<NavigationTrace>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::init(NavigationConfig::default())
    }
}

impl Engine {
    /// Create an engine with the given configuration.
    pub fn init(config: NavigationConfig) -> Self {
        debug!(?config, "engine init");
        Self {
            registry: Registry::new(),
            layouts: LayoutCache::new(),
            state: FocusState::default(),
            config,
            keys: KeyTracker::default(),
            paused: false,
            last_trace: None,
        }
    }

    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return its key, which is generated if `spec`
    /// does not supply one. Registration never moves focus.
    pub fn add(&mut self, mut spec: FocusableSpec) -> Result<FocusKey> {
        let rect = spec.rect.take();
        if let Some(r) = rect {
            r.validate()?;
        }
        let id = self.registry.add(spec)?;
        if let Some(r) = rect {
            self.layouts.set(id, r)?;
        }
        let key = self.key_of(id)?;
        debug!(key = %key, "add");
        Ok(key)
    }

    /// Merge a partial update into a registered node.
    pub fn update(&mut self, key: &str, update: NodeUpdate) -> Result<()> {
        if let Some(r) = update.rect {
            r.validate()?;
        }
        let rect = update.rect;
        let id = self.registry.update(key, update)?;
        if let Some(r) = rect {
            self.layouts.set(id, r)?;
        }
        Ok(())
    }

    /// Record a node's measured geometry.
    pub fn update_layout(&mut self, key: &str, rect: Rect) -> Result<()> {
        let id = self.id(key)?;
        self.layouts.set(id, rect)
    }

    /// Unregister a node. Its children are re-parented to its parent. If it
    /// was focused, focus is restored within the nearest ancestor that has
    /// `auto_restore_focus`, or cleared if there is none. Removing an unknown
    /// key does nothing.
    pub fn remove(&mut self, key: &str) {
        let Some(id) = self.registry.id(key) else {
            warn!(key, "remove: unknown focus key");
            return;
        };
        let was_focused = self.state.current == Some(id);
        let chain = if was_focused {
            self.registry.ancestors(id)
        } else {
            Vec::new()
        };

        self.registry.remove(id);
        self.layouts.remove(id);
        debug!(key, was_focused, "remove");
        if !was_focused {
            return;
        }

        let target = chain
            .iter()
            .copied()
            .find(|a| {
                self.registry
                    .node(*a)
                    .is_some_and(|n| n.flags.auto_restore_focus)
            })
            .and_then(|a| {
                let method = self.config.distance_method;
                let child = pick_child(&self.registry, &self.layouts, method, a, Entry::TopLeft)?;
                Some(resolve_leaf(
                    &self.registry,
                    &self.layouts,
                    method,
                    child,
                    Entry::TopLeft,
                ))
            });
        let details = FocusDetails::default();
        commit(
            &mut self.registry,
            &self.layouts,
            &mut self.state,
            &Transition {
                old_leaf: None,
                old_chain: chain,
                new_leaf: target,
                details: &details,
            },
        );
    }

    /// Move focus to `key`, descending to a leaf if it is a container.
    /// Focusing the node that already has focus does nothing.
    pub fn set_focus(&mut self, key: &str, details: &FocusDetails) -> Result<()> {
        let id = self
            .registry
            .id(key)
            .filter(|id| is_enterable(&self.registry, *id))
            .ok_or_else(|| Error::InvalidTarget(key.into()))?;
        let leaf = resolve_leaf(
            &self.registry,
            &self.layouts,
            self.config.distance_method,
            id,
            Entry::TopLeft,
        );
        self.move_to(Some(leaf), details);
        Ok(())
    }

    /// Focus `key` with default details.
    pub fn focus_self(&mut self, key: &str) -> Result<()> {
        self.set_focus(key, &FocusDetails::default())
    }

    /// Focus the first registered node that asked to claim focus. Returns the
    /// key that received focus, if any.
    pub fn focus_forced(&mut self) -> Result<Option<FocusKey>> {
        let Some(key) = self
            .registry
            .iter()
            .find(|(_, n)| n.flags.force_focus)
            .map(|(_, n)| n.key.clone())
        else {
            return Ok(None);
        };
        self.set_focus(key.as_str(), &FocusDetails::default())?;
        Ok(self.current_focus_key().cloned())
    }

    /// Clear focus entirely.
    pub fn blur(&mut self) {
        self.move_to(None, &FocusDetails::default());
    }

    /// Commit a transition from the current focus to `target`.
    pub(crate) fn move_to(&mut self, target: Option<NodeId>, details: &FocusDetails) {
        let old_leaf = self.state.current;
        if old_leaf == target {
            return;
        }
        let old_chain = old_leaf
            .map(|id| self.registry.ancestors(id))
            .unwrap_or_default();
        commit(
            &mut self.registry,
            &self.layouts,
            &mut self.state,
            &Transition {
                old_leaf,
                old_chain,
                new_leaf: target,
                details,
            },
        );
    }

    /// Is `key` the focused node?
    pub fn is_focused(&self, key: &str) -> bool {
        self.registry.get(key).is_some_and(FocusableNode::is_focused)
    }

    /// Is a descendant of `key` focused?
    pub fn has_focused_child(&self, key: &str) -> bool {
        self.registry
            .get(key)
            .is_some_and(FocusableNode::has_focused_child)
    }

    /// Key of the focused node.
    pub fn current_focus_key(&self) -> Option<&FocusKey> {
        self.state.current.and_then(|id| self.registry.key_of(id))
    }

    /// Keys from the outermost ancestor down to the focused node. Empty when
    /// nothing is focused.
    pub fn focus_path(&self) -> Vec<&FocusKey> {
        let Some(current) = self.state.current else {
            return Vec::new();
        };
        let mut ids = self.registry.ancestors(current);
        ids.reverse();
        ids.push(current);
        ids.into_iter()
            .filter_map(|id| self.registry.key_of(id))
            .collect()
    }

    /// Look up a node.
    pub fn get(&self, key: &str) -> Option<&FocusableNode> {
        self.registry.get(key)
    }

    /// Keys of a node's children.
    pub fn children_of(&self, key: &str) -> Result<Vec<&FocusKey>> {
        self.registry.children_of(key)
    }

    /// Is `ancestor` a proper ancestor of `descendant`?
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        self.registry.is_ancestor(ancestor, descendant)
    }

    /// A node's last-known rect.
    pub fn layout(&self, key: &str) -> Option<Rect> {
        self.registry.id(key).and_then(|id| self.layouts.get(id))
    }

    /// The node registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Scored candidates from the most recent navigation. Only recorded when
    /// `visual_debug` is on.
    pub fn last_trace(&self) -> Option<&NavigationTrace> {
        self.last_trace.as_ref()
    }

    /// Drop every node and reset focus. Configuration is kept.
    pub fn destroy(&mut self) {
        debug!(nodes = self.registry.len(), "destroy");
        self.registry.clear();
        self.layouts.clear();
        self.state = FocusState::default();
        self.keys.clear();
        self.paused = false;
        self.last_trace = None;
    }

    /// Render the focus tree as colored text for debugging.
    pub fn dump(&self) -> Result<String> {
        dump::dump(&self.registry, &self.layouts, self.state.current)
    }

    /// Id for a registered key.
    fn id(&self, key: &str) -> Result<NodeId> {
        self.registry
            .id(key)
            .ok_or_else(|| Error::NotFound(key.into()))
    }

    /// Key for a registered id.
    fn key_of(&self, id: NodeId) -> Result<FocusKey> {
        self.registry
            .key_of(id)
            .cloned()
            .ok_or_else(|| Error::Internal("node vanished during add".into()))
    }
}
