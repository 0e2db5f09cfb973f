//! Routing of enter and arrow events to the focused node.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    engine::Engine,
    geom::Direction,
    handler::{ArrowAction, FocusDetails, KeyPressDetails},
    key::{FocusKey, NodeId},
    navigate::search,
};

/// Input name used for enter in [`KeyPressDetails::pressed_keys`].
pub const ENTER: &str = "enter";

/// What an arrow press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Focus moved to this node.
    Moved(FocusKey),
    /// The focused node consumed the press.
    Handled,
    /// Nothing qualifies in that direction; focus is unchanged.
    NoCandidate,
    /// Nothing is focused.
    NoFocus,
    /// The engine is paused.
    Paused,
}

/// Counts repeated presses of each input until it is released.
#[derive(Debug, Default, Clone)]
pub struct KeyTracker {
    /// Press count per held input.
    pressed: BTreeMap<String, u32>,
}

impl KeyTracker {
    /// Register a press and return the details to hand to callbacks.
    pub fn press(&mut self, input: &str) -> KeyPressDetails {
        *self.pressed.entry(input.to_string()).or_default() += 1;
        self.details()
    }

    /// Register a release, resetting the input's count.
    pub fn release(&mut self, input: &str) {
        self.pressed.remove(input);
    }

    /// Current press counts.
    pub fn details(&self) -> KeyPressDetails {
        KeyPressDetails {
            pressed_keys: self.pressed.clone(),
        }
    }

    /// Forget every held input.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

/// Event entry points. An input layer maps physical keys to these calls.
pub trait EventDispatch {
    /// Offer an arrow press to the focused node, then navigate if it was not
    /// consumed.
    fn dispatch_arrow(&mut self, direction: Direction) -> Navigation;

    /// Deliver an arrow release to the focused node. Never navigates.
    fn dispatch_arrow_release(&mut self, direction: Direction);

    /// Deliver an enter press to the focused node.
    fn dispatch_enter_press(&mut self);

    /// Deliver an enter release to the focused node.
    fn dispatch_enter_release(&mut self);

    /// The node focus would move to from the current focus, without moving
    /// it.
    fn navigate(&self, direction: Direction) -> Option<FocusKey>;

    /// Move focus in a direction without consulting the focused node's arrow
    /// handler.
    fn navigate_by_direction(
        &mut self,
        direction: Direction,
        details: &FocusDetails,
    ) -> Navigation;

    /// Ignore dispatched events until [`Self::resume`].
    fn pause(&mut self);

    /// Resume handling dispatched events.
    fn resume(&mut self);

    /// Are dispatched events being ignored?
    fn is_paused(&self) -> bool;
}

impl EventDispatch for Engine {
    fn dispatch_arrow(&mut self, direction: Direction) -> Navigation {
        if self.paused {
            return Navigation::Paused;
        }
        let Some(current) = self.state.current else {
            return Navigation::NoFocus;
        };
        let details = self.keys.press(direction.as_str());
        let mut action = ArrowAction::Continue;
        if let Some(node) = self.registry.node_mut(current)
            && let Some(handler) = node.handler.as_deref_mut()
        {
            action = handler.on_arrow_press(direction, &node.extra_props, &details);
        }
        if action == ArrowAction::Handled {
            debug!(%direction, "arrow consumed by focused node");
            return Navigation::Handled;
        }
        self.navigate_by_direction(direction, &FocusDetails::from_key(details))
    }

    fn dispatch_arrow_release(&mut self, direction: Direction) {
        if self.paused {
            return;
        }
        self.keys.release(direction.as_str());
        if let Some(current) = self.state.current
            && let Some(node) = self.registry.node_mut(current)
            && let Some(handler) = node.handler.as_deref_mut()
        {
            handler.on_arrow_release(direction, &node.extra_props);
        }
    }

    fn dispatch_enter_press(&mut self) {
        if self.paused {
            return;
        }
        let Some(current) = self.state.current else {
            return;
        };
        let details = self.keys.press(ENTER);
        if let Some(node) = self.registry.node_mut(current)
            && let Some(handler) = node.handler.as_deref_mut()
        {
            handler.on_enter_press(&node.extra_props, &details);
        }
    }

    fn dispatch_enter_release(&mut self) {
        if self.paused {
            return;
        }
        self.keys.release(ENTER);
        if let Some(current) = self.state.current
            && let Some(node) = self.registry.node_mut(current)
            && let Some(handler) = node.handler.as_deref_mut()
        {
            handler.on_enter_release(&node.extra_props);
        }
    }

    fn navigate(&self, direction: Direction) -> Option<FocusKey> {
        let current = self.state.current?;
        let found = search(
            &self.registry,
            &self.layouts,
            &self.config,
            current,
            direction,
        );
        found
            .target
            .and_then(|id| self.registry.key_of(id))
            .cloned()
    }

    fn navigate_by_direction(
        &mut self,
        direction: Direction,
        details: &FocusDetails,
    ) -> Navigation {
        let Some(current) = self.state.current else {
            return Navigation::NoFocus;
        };
        let found = search(
            &self.registry,
            &self.layouts,
            &self.config,
            current,
            direction,
        );
        if self.config.visual_debug {
            self.last_trace = found.trace(&self.registry, current, direction);
        }
        match found.target {
            Some(target) => moved(self, target, details),
            None => {
                debug!(%direction, "no candidate");
                Navigation::NoCandidate
            }
        }
    }

    fn pause(&mut self) {
        debug!("pause");
        self.paused = true;
    }

    fn resume(&mut self) {
        debug!("resume");
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Move focus to a navigation target and report where it landed.
fn moved(engine: &mut Engine, target: NodeId, details: &FocusDetails) -> Navigation {
    engine.move_to(Some(target), details);
    match engine.registry.key_of(target) {
        Some(key) => Navigation::Moved(key.clone()),
        None => Navigation::NoCandidate,
    }
}
