use std::collections::HashMap;

use slotmap::SlotMap;

use crate::{
    error::{Error, Result},
    key::{FocusKey, NodeId},
    node::{FocusableNode, FocusableSpec, NodeUpdate},
};

/// Owns every focusable node in a flat arena. The tree is expressed through
/// parent and child ids stored on the nodes; keys map to ids through an
/// index.
#[derive(Default)]
pub struct Registry {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, FocusableNode>,
    /// Key to id index.
    index: HashMap<FocusKey, NodeId>,
    /// Top-level nodes in insertion order.
    roots: Vec<NodeId>,
    /// Next registration sequence number.
    next_order: u64,
    /// Next suffix for generated keys.
    next_generated: u64,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and link it under its parent. Registration never moves
    /// focus.
    pub(crate) fn add(&mut self, spec: FocusableSpec) -> Result<NodeId> {
        let key = match spec.key {
            Some(k) => FocusKey::new(k)?,
            None => self.generate_key(),
        };
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }
        let preferred_child = spec.preferred_child.map(FocusKey::new).transpose()?;
        let parent = match spec.parent {
            Some(p) => Some(self.id(&p).ok_or(Error::ParentNotFound {
                key: key.clone(),
                parent: p,
            })?),
            None => None,
        };

        let order = self.next_order;
        self.next_order += 1;
        let id = self.nodes.insert(FocusableNode {
            key: key.clone(),
            parent,
            children: Vec::new(),
            order,
            flags: spec.flags,
            preferred_child,
            last_focused_child: None,
            focused: false,
            has_focused_child: false,
            extra_props: spec.extra_props,
            handler: spec.handler,
        });
        self.index.insert(key, id);
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Merge a partial update into a node. Geometry is not stored here; the
    /// caller routes `update.rect` to the layout cache.
    pub(crate) fn update(&mut self, key: &str, update: NodeUpdate) -> Result<NodeId> {
        let id = self.id(key).ok_or_else(|| Error::NotFound(key.into()))?;
        let preferred_child = match update.preferred_child {
            Some(Some(k)) => Some(Some(FocusKey::new(k)?)),
            Some(None) => Some(None),
            None => None,
        };

        let node = &mut self.nodes[id];
        if let Some(v) = update.focusable {
            node.flags.focusable = v;
        }
        if let Some((enabled, directions)) = update.boundary {
            node.flags.is_focus_boundary = enabled;
            node.flags.boundary_directions = directions;
        }
        if let Some(p) = preferred_child {
            node.preferred_child = p;
        }
        if let Some(props) = update.extra_props {
            node.extra_props = props;
        }
        if let Some(h) = update.handler {
            node.handler = Some(h);
        }
        Ok(id)
    }

    /// Unlink a node and drop it from the arena. Its children take its place
    /// in its parent's child list, so no child is left pointing at a missing
    /// parent.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<FocusableNode> {
        let node = self.nodes.remove(id)?;
        self.index.remove(&node.key);

        for child in &node.children {
            if let Some(c) = self.nodes.get_mut(*child) {
                c.parent = node.parent;
            }
        }

        let siblings = match node.parent {
            Some(p) => match self.nodes.get_mut(p) {
                Some(parent) => {
                    if parent.last_focused_child.as_ref() == Some(&node.key) {
                        parent.last_focused_child = None;
                    }
                    &mut parent.children
                }
                None => return Some(node),
            },
            None => &mut self.roots,
        };
        if let Some(pos) = siblings.iter().position(|c| *c == id) {
            siblings.remove(pos);
            for (i, child) in node.children.iter().enumerate() {
                siblings.insert(pos + i, *child);
            }
        }
        Some(node)
    }

    /// Generate a key that is not yet registered.
    fn generate_key(&mut self) -> FocusKey {
        loop {
            self.next_generated += 1;
            let key = FocusKey::generated(self.next_generated);
            if !self.index.contains_key(&key) {
                return key;
            }
        }
    }

    /// Look up a node id by key.
    pub fn id(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Look up a node by key.
    pub fn get(&self, key: &str) -> Option<&FocusableNode> {
        self.id(key).and_then(|id| self.nodes.get(id))
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&FocusableNode> {
        self.nodes.get(id)
    }

    /// Mutable lookup by id.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut FocusableNode> {
        self.nodes.get_mut(id)
    }

    /// The key of a node id.
    pub fn key_of(&self, id: NodeId) -> Option<&FocusKey> {
        self.nodes.get(id).map(|n| &n.key)
    }

    /// Is a node with this key registered?
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys of a node's children, in insertion order.
    pub fn children_of(&self, key: &str) -> Result<Vec<&FocusKey>> {
        let node = self.get(key).ok_or_else(|| Error::NotFound(key.into()))?;
        Ok(node
            .children
            .iter()
            .filter_map(|c| self.key_of(*c))
            .collect())
    }

    /// Key of a node's parent, `None` for top-level nodes.
    pub fn parent_of(&self, key: &str) -> Result<Option<&FocusKey>> {
        let node = self.get(key).ok_or_else(|| Error::NotFound(key.into()))?;
        Ok(node.parent.and_then(|p| self.key_of(p)))
    }

    /// Is `ancestor` a proper ancestor of `descendant`? Unknown keys are never
    /// related.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        match (self.id(ancestor), self.id(descendant)) {
            (Some(a), Some(d)) => self.is_ancestor_id(a, d),
            _ => false,
        }
    }

    /// Id form of [`Self::is_ancestor`].
    pub(crate) fn is_ancestor_id(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.nodes.get(descendant).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Proper ancestors of a node, nearest first.
    pub(crate) fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(p) = current {
            out.push(p);
            current = self.nodes.get(p).and_then(|n| n.parent);
        }
        out
    }

    /// Child ids of a node.
    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Top-level node ids in insertion order.
    pub(crate) fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All nodes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &FocusableNode)> {
        let mut all: Vec<_> = self.nodes.iter().collect();
        all.sort_by_key(|(_, n)| n.order);
        all.into_iter()
    }

    /// All keys in registration order.
    pub fn keys(&self) -> Vec<&FocusKey> {
        self.iter().map(|(_, n)| &n.key).collect()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.roots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Result<Registry> {
        let mut r = Registry::new();
        r.add(FocusableSpec::keyed("root").focusable(false))?;
        r.add(FocusableSpec::keyed("a").parent("root"))?;
        r.add(FocusableSpec::keyed("b").parent("root"))?;
        r.add(FocusableSpec::keyed("b1").parent("b"))?;
        r.add(FocusableSpec::keyed("b2").parent("b"))?;
        r.add(FocusableSpec::keyed("c").parent("root"))?;
        Ok(r)
    }

    #[test]
    fn add_links_children_in_order() -> Result<()> {
        let r = tree()?;
        assert_eq!(r.children_of("root")?, vec!["a", "b", "c"]);
        assert_eq!(r.children_of("b")?, vec!["b1", "b2"]);
        assert_eq!(r.parent_of("b1")?.map(FocusKey::as_str), Some("b"));
        assert_eq!(r.parent_of("root")?, None);
        assert_eq!(r.len(), 6);
        Ok(())
    }

    #[test]
    fn duplicate_key_is_rejected_without_mutation() -> Result<()> {
        let mut r = tree()?;
        let err = r.add(FocusableSpec::keyed("a").parent("b")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(ref k) if k == "a"));
        assert_eq!(r.children_of("b")?, vec!["b1", "b2"]);
        assert_eq!(r.parent_of("a")?.map(FocusKey::as_str), Some("root"));
        assert_eq!(r.len(), 6);
        Ok(())
    }

    #[test]
    fn missing_parent_is_rejected() -> Result<()> {
        let mut r = tree()?;
        let err = r.add(FocusableSpec::keyed("x").parent("nope")).unwrap_err();
        assert!(matches!(err, Error::ParentNotFound { .. }));
        assert!(!r.contains("x"));
        Ok(())
    }

    #[test]
    fn generated_keys_are_unique() -> Result<()> {
        let mut r = Registry::new();
        r.add(FocusableSpec::keyed("sn:focusable-item-1"))?;
        let a = r.add(FocusableSpec::new())?;
        let b = r.add(FocusableSpec::new())?;
        assert_eq!(r.key_of(a).map(FocusKey::as_str), Some("sn:focusable-item-2"));
        assert_eq!(r.key_of(b).map(FocusKey::as_str), Some("sn:focusable-item-3"));
        Ok(())
    }

    #[test]
    fn update_merges_only_given_fields() -> Result<()> {
        let mut r = tree()?;
        r.update("b", NodeUpdate::new().focusable(false))?;
        let b = r.get("b").unwrap();
        assert!(!b.is_focusable());
        assert!(b.flags().save_last_focused_child);

        r.update("b", NodeUpdate::new().preferred_child(Some("b2".into())))?;
        assert_eq!(r.get("b").unwrap().preferred_child_key().unwrap(), "b2");
        r.update("b", NodeUpdate::new().preferred_child(None))?;
        assert!(r.get("b").unwrap().preferred_child_key().is_none());

        assert!(matches!(
            r.update("nope", NodeUpdate::new()),
            Err(Error::NotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn remove_reparents_children_in_place() -> Result<()> {
        let mut r = tree()?;
        let b = r.id("b").unwrap();
        let removed = r.remove(b).unwrap();
        assert_eq!(removed.key(), "b");
        assert_eq!(r.children_of("root")?, vec!["a", "b1", "b2", "c"]);
        assert_eq!(r.parent_of("b1")?.map(FocusKey::as_str), Some("root"));
        assert!(!r.contains("b"));
        assert!(r.remove(b).is_none());
        Ok(())
    }

    #[test]
    fn remove_root_promotes_children() -> Result<()> {
        let mut r = tree()?;
        let root = r.id("root").unwrap();
        r.remove(root);
        assert_eq!(r.parent_of("a")?, None);
        let roots: Vec<_> = r.roots().iter().filter_map(|id| r.key_of(*id)).collect();
        assert_eq!(roots, vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn ancestry() -> Result<()> {
        let r = tree()?;
        assert!(r.is_ancestor("root", "b2"));
        assert!(r.is_ancestor("b", "b2"));
        assert!(!r.is_ancestor("b2", "b"));
        assert!(!r.is_ancestor("a", "b2"));
        assert!(!r.is_ancestor("b", "b"));
        assert!(!r.is_ancestor("nope", "b"));
        let b2 = r.id("b2").unwrap();
        let chain: Vec<_> = r.ancestors(b2).into_iter().filter_map(|id| r.key_of(id)).collect();
        assert_eq!(chain, vec!["b", "root"]);
        Ok(())
    }

    #[test]
    fn iteration_follows_registration_order() -> Result<()> {
        let r = tree()?;
        assert_eq!(r.keys(), vec!["root", "a", "b", "b1", "b2", "c"]);
        Ok(())
    }
}
