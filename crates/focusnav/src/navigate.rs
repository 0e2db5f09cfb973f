//! Directional candidate search.

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    config::NavigationConfig,
    entry::{Entry, resolve_leaf},
    geom::{Direction, DistanceMethod, Rect},
    key::{FocusKey, NodeId},
    layout::LayoutCache,
    registry::Registry,
};

/// Weight of the primary-axis distance relative to the perpendicular offset.
pub const PRIMARY_WEIGHT: f64 = 5.0;

/// How a candidate scored against the current node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// Distance along the direction of travel.
    pub primary: f64,
    /// Offset across the direction of travel.
    pub perpendicular: f64,
    /// Combined score; lower is better.
    pub total: f64,
}

/// One entry of a [`NavigationTrace`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// Candidate key.
    pub key: FocusKey,
    /// Candidate rect at the time of the search.
    pub rect: Rect,
    /// Candidate score.
    pub score: Score,
}

/// Record of a navigation search, kept when `visual_debug` is on so a UI can
/// draw the candidates that were considered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationTrace {
    /// Node the search started from.
    pub from: FocusKey,
    /// Requested direction.
    pub direction: Direction,
    /// Qualifying candidates, best first.
    pub candidates: Vec<ScoredCandidate>,
    /// Final target after descending into containers.
    pub target: Option<FocusKey>,
}

/// Result of a search.
#[derive(Debug, Default)]
pub(crate) struct Search {
    /// Leaf focus should move to.
    pub(crate) target: Option<NodeId>,
    /// Qualifying candidates, best first.
    pub(crate) scored: Vec<(NodeId, Rect, Score)>,
}

impl Search {
    /// Convert to a trace for diagnostics.
    pub(crate) fn trace(
        &self,
        registry: &Registry,
        from: NodeId,
        direction: Direction,
    ) -> Option<NavigationTrace> {
        let from = registry.key_of(from)?.clone();
        let candidates = self
            .scored
            .iter()
            .filter_map(|(id, rect, score)| {
                Some(ScoredCandidate {
                    key: registry.key_of(*id)?.clone(),
                    rect: *rect,
                    score: *score,
                })
            })
            .collect();
        Some(NavigationTrace {
            from,
            direction,
            candidates,
            target: self.target.and_then(|t| registry.key_of(t).cloned()),
        })
    }
}

/// Find the node focus should move to from `current` in `dir`.
pub(crate) fn search(
    registry: &Registry,
    layouts: &LayoutCache,
    config: &NavigationConfig,
    current: NodeId,
    dir: Direction,
) -> Search {
    let Some(from) = layouts.get(current) else {
        debug!(?current, "current node has no layout, cannot navigate");
        return Search::default();
    };
    let ancestors = registry.ancestors(current);
    // Innermost boundary around the current node that blocks this direction.
    let wall = ancestors
        .iter()
        .copied()
        .find(|a| registry.node(*a).is_some_and(|n| n.flags.blocks(dir)));

    let mut scored = Vec::new();
    for (id, node) in registry.iter() {
        if id == current || !node.flags.focusable {
            continue;
        }
        let Some(rect) = layouts.get(id) else {
            continue;
        };
        if rect.is_empty() || ancestors.contains(&id) || registry.is_ancestor_id(current, id) {
            continue;
        }
        if let Some(w) = wall
            && !registry.is_ancestor_id(w, id)
        {
            continue;
        }
        if behind_boundary(registry, id, current, dir) {
            continue;
        }
        if let Some(score) = score(config, &from, &rect, dir) {
            scored.push((id, node.order, rect, score));
        }
    }
    // Stable sort over registration order keeps exact ties deterministic.
    scored.sort_by(|a, b| a.3.total.total_cmp(&b.3.total).then(a.1.cmp(&b.1)));

    if config.debug {
        for (id, _, rect, score) in &scored {
            trace!(
                candidate = %registry.key_of(*id).map(FocusKey::as_str).unwrap_or("?"),
                ?rect,
                primary = score.primary,
                perpendicular = score.perpendicular,
                total = score.total,
                "navigation candidate"
            );
        }
    }

    let target = scored.first().map(|(id, ..)| {
        resolve_leaf(
            registry,
            layouts,
            config.distance_method,
            *id,
            Entry::From(from),
        )
    });
    Search {
        target,
        scored: scored
            .into_iter()
            .map(|(id, _, rect, score)| (id, rect, score))
            .collect(),
    }
}

/// Is `id` inside a boundary that blocks `dir` and does not contain `current`?
fn behind_boundary(registry: &Registry, id: NodeId, current: NodeId, dir: Direction) -> bool {
    let mut node_id = Some(id);
    while let Some(n) = node_id {
        let Some(node) = registry.node(n) else {
            return false;
        };
        if node.flags.blocks(dir) && !registry.is_ancestor_id(n, current) {
            return true;
        }
        node_id = node.parent;
    }
    false
}

/// Score `to` as a move from `from` in `dir`. Returns `None` if `to` does not
/// lie in that direction.
pub fn score(config: &NavigationConfig, from: &Rect, to: &Rect, dir: Direction) -> Option<Score> {
    let axis = dir.axis();
    let across = axis.perpendicular();
    let sign = if dir.is_incremental() { 1.0 } else { -1.0 };

    let primary = match config.distance_method {
        DistanceMethod::Center => {
            let d = (to.center_on(axis) - from.center_on(axis)) * sign;
            if d <= 0.0 {
                return None;
            }
            d
        }
        DistanceMethod::Corners | DistanceMethod::Edges => {
            let d = (to.trailing_edge(dir) - from.leading_edge(dir)) * sign;
            if d < 0.0 {
                return None;
            }
            d
        }
    };

    if let Some(tolerance) = config.perpendicular_tolerance
        && from.gap(to, across) > tolerance
    {
        return None;
    }

    let perpendicular = match config.distance_method {
        DistanceMethod::Center | DistanceMethod::Edges => {
            (to.center_on(across) - from.center_on(across)).abs()
        }
        DistanceMethod::Corners => from.corner_offset(to, across),
    };

    Some(Score {
        primary,
        perpendicular,
        total: primary * PRIMARY_WEIGHT + perpendicular,
    })
}
