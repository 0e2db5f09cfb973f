use slotmap::SecondaryMap;

use crate::{error::Result, geom::Rect, key::NodeId};

/// Last-known geometry for each registered node.
///
/// Rectangles are pushed in by whatever measures the UI. Nothing is derived
/// or cached beyond the most recent value, so a node that moved but has not
/// been re-measured is navigated with its old rect until the next update.
#[derive(Debug, Default)]
pub struct LayoutCache {
    /// Rect per node.
    rects: SecondaryMap<NodeId, Rect>,
}

impl LayoutCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node's rect. Invalid rects are rejected and the previous
    /// value is kept.
    pub fn set(&mut self, id: NodeId, rect: Rect) -> Result<()> {
        rect.validate()?;
        self.rects.insert(id, rect);
        Ok(())
    }

    /// The node's last-known rect, if it has been measured.
    pub fn get(&self, id: NodeId) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    /// Forget a node's rect, returning the old value.
    pub fn remove(&mut self, id: NodeId) -> Option<Rect> {
        self.rects.remove(id)
    }

    /// Has the node been measured?
    pub fn contains(&self, id: NodeId) -> bool {
        self.rects.contains_key(id)
    }

    /// Number of measured nodes.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True if no node has been measured.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Drop every rect.
    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn set_get_remove() -> Result<()> {
        let mut ids: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let mut cache = LayoutCache::new();
        assert!(cache.is_empty());
        cache.set(a, Rect::new(0.0, 0.0, 10.0, 10.0))?;
        assert_eq!(cache.get(a), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(cache.get(b), None);

        cache.set(a, Rect::new(5.0, 0.0, 10.0, 10.0))?;
        assert_eq!(cache.get(a).map(|r| r.x), Some(5.0));
        assert_eq!(cache.len(), 1);

        assert!(cache.remove(a).is_some());
        assert!(!cache.contains(a));
        Ok(())
    }

    #[test]
    fn invalid_rect_keeps_previous() -> Result<()> {
        let mut ids: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let mut cache = LayoutCache::new();
        cache.set(a, Rect::new(0.0, 0.0, 10.0, 10.0))?;
        assert!(cache.set(a, Rect::new(0.0, 0.0, -1.0, 10.0)).is_err());
        assert_eq!(cache.get(a), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        Ok(())
    }
}
