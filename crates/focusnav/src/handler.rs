//! Per-node callbacks and the event detail types passed to them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::{Direction, Rect};

/// Caller-supplied context data bound to a node and handed back to every
/// callback. The engine never inspects it.
pub type ExtraProps = serde_json::Value;

/// Details about the physical input that triggered a key callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPressDetails {
    /// How many times each currently held input has fired without a release.
    /// A count above one means the input is being held down.
    pub pressed_keys: BTreeMap<String, u32>,
}

impl KeyPressDetails {
    /// Repeat count for a named input, zero if it is not held.
    pub fn count(&self, key: &str) -> u32 {
        self.pressed_keys.get(key).copied().unwrap_or(0)
    }

    /// True if any held input has repeated.
    pub fn is_long_press(&self) -> bool {
        self.pressed_keys.values().any(|c| *c > 1)
    }
}

/// Details passed to focus and blur callbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusDetails {
    /// The key press that caused the transition, if any.
    pub event: Option<KeyPressDetails>,
    /// Free-form data supplied by whoever requested the transition.
    #[serde(default)]
    pub data: ExtraProps,
}

impl FocusDetails {
    /// Details for a transition caused by a key press.
    pub fn from_key(event: KeyPressDetails) -> Self {
        Self {
            event: Some(event),
            data: ExtraProps::Null,
        }
    }
}

/// The answer a node gives when offered an arrow press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowAction {
    /// The node consumed the move itself; no navigation happens.
    Handled,
    /// The node did not handle the move; directional navigation proceeds.
    #[default]
    Continue,
}

impl From<bool> for ArrowAction {
    /// `true` means handled.
    fn from(handled: bool) -> Self {
        if handled { Self::Handled } else { Self::Continue }
    }
}

/// Callbacks a UI element attaches to its focusable node. Every method has a
/// no-op default, so implementors only override what they care about.
///
/// Handlers run synchronously inside engine operations and cannot call back
/// into the engine.
pub trait FocusHandler: Send {
    /// Enter was pressed while this node was focused.
    fn on_enter_press(&mut self, _props: &ExtraProps, _details: &KeyPressDetails) {}

    /// Enter was released while this node was focused.
    fn on_enter_release(&mut self, _props: &ExtraProps) {}

    /// An arrow was pressed while this node was focused. Return
    /// [`ArrowAction::Handled`] to consume the move.
    fn on_arrow_press(
        &mut self,
        _direction: Direction,
        _props: &ExtraProps,
        _details: &KeyPressDetails,
    ) -> ArrowAction {
        ArrowAction::Continue
    }

    /// An arrow was released while this node was focused.
    fn on_arrow_release(&mut self, _direction: Direction, _props: &ExtraProps) {}

    /// The node became focused, or became an ancestor of the focused node.
    fn on_focus(&mut self, _layout: Option<Rect>, _props: &ExtraProps, _details: &FocusDetails) {}

    /// The node lost focus, or stopped being an ancestor of the focused node.
    fn on_blur(&mut self, _layout: Option<Rect>, _props: &ExtraProps, _details: &FocusDetails) {}

    /// The node's `focused` flag changed.
    fn on_update_focused(&mut self, _focused: bool) {}

    /// The node's `has_focused_child` flag changed. Only delivered to nodes
    /// registered with `track_children`.
    fn on_update_has_focused_child(&mut self, _has_focused_child: bool) {}
}

/// Boxed enter-press callback.
type EnterPressFn = Box<dyn FnMut(&ExtraProps, &KeyPressDetails) + Send>;
/// Boxed enter-release callback.
type EnterReleaseFn = Box<dyn FnMut(&ExtraProps) + Send>;
/// Boxed arrow-press callback.
type ArrowPressFn = Box<dyn FnMut(Direction, &ExtraProps, &KeyPressDetails) -> ArrowAction + Send>;
/// Boxed arrow-release callback.
type ArrowReleaseFn = Box<dyn FnMut(Direction, &ExtraProps) + Send>;
/// Boxed focus or blur callback.
type FocusFn = Box<dyn FnMut(Option<Rect>, &ExtraProps, &FocusDetails) + Send>;
/// Boxed flag observer.
type FlagFn = Box<dyn FnMut(bool) + Send>;

/// A [`FocusHandler`] assembled from optional closures.
#[derive(Default)]
pub struct Handlers {
    /// Enter press.
    enter_press: Option<EnterPressFn>,
    /// Enter release.
    enter_release: Option<EnterReleaseFn>,
    /// Arrow press.
    arrow_press: Option<ArrowPressFn>,
    /// Arrow release.
    arrow_release: Option<ArrowReleaseFn>,
    /// Focus.
    focus: Option<FocusFn>,
    /// Blur.
    blur: Option<FocusFn>,
    /// Focused flag observer.
    update_focused: Option<FlagFn>,
    /// Has-focused-child flag observer.
    update_has_focused_child: Option<FlagFn>,
}

impl Handlers {
    /// An empty handler set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enter-press callback.
    pub fn on_enter_press(
        mut self,
        f: impl FnMut(&ExtraProps, &KeyPressDetails) + Send + 'static,
    ) -> Self {
        self.enter_press = Some(Box::new(f));
        self
    }

    /// Set the enter-release callback.
    pub fn on_enter_release(mut self, f: impl FnMut(&ExtraProps) + Send + 'static) -> Self {
        self.enter_release = Some(Box::new(f));
        self
    }

    /// Set the arrow-press callback.
    pub fn on_arrow_press(
        mut self,
        f: impl FnMut(Direction, &ExtraProps, &KeyPressDetails) -> ArrowAction + Send + 'static,
    ) -> Self {
        self.arrow_press = Some(Box::new(f));
        self
    }

    /// Set the arrow-release callback.
    pub fn on_arrow_release(
        mut self,
        f: impl FnMut(Direction, &ExtraProps) + Send + 'static,
    ) -> Self {
        self.arrow_release = Some(Box::new(f));
        self
    }

    /// Set the focus callback.
    pub fn on_focus(
        mut self,
        f: impl FnMut(Option<Rect>, &ExtraProps, &FocusDetails) + Send + 'static,
    ) -> Self {
        self.focus = Some(Box::new(f));
        self
    }

    /// Set the blur callback.
    pub fn on_blur(
        mut self,
        f: impl FnMut(Option<Rect>, &ExtraProps, &FocusDetails) + Send + 'static,
    ) -> Self {
        self.blur = Some(Box::new(f));
        self
    }

    /// Observe the `focused` flag.
    pub fn on_update_focused(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.update_focused = Some(Box::new(f));
        self
    }

    /// Observe the `has_focused_child` flag.
    pub fn on_update_has_focused_child(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.update_has_focused_child = Some(Box::new(f));
        self
    }
}

impl FocusHandler for Handlers {
    fn on_enter_press(&mut self, props: &ExtraProps, details: &KeyPressDetails) {
        if let Some(f) = self.enter_press.as_mut() {
            f(props, details);
        }
    }

    fn on_enter_release(&mut self, props: &ExtraProps) {
        if let Some(f) = self.enter_release.as_mut() {
            f(props);
        }
    }

    fn on_arrow_press(
        &mut self,
        direction: Direction,
        props: &ExtraProps,
        details: &KeyPressDetails,
    ) -> ArrowAction {
        match self.arrow_press.as_mut() {
            Some(f) => f(direction, props, details),
            None => ArrowAction::Continue,
        }
    }

    fn on_arrow_release(&mut self, direction: Direction, props: &ExtraProps) {
        if let Some(f) = self.arrow_release.as_mut() {
            f(direction, props);
        }
    }

    fn on_focus(&mut self, layout: Option<Rect>, props: &ExtraProps, details: &FocusDetails) {
        if let Some(f) = self.focus.as_mut() {
            f(layout, props, details);
        }
    }

    fn on_blur(&mut self, layout: Option<Rect>, props: &ExtraProps, details: &FocusDetails) {
        if let Some(f) = self.blur.as_mut() {
            f(layout, props, details);
        }
    }

    fn on_update_focused(&mut self, focused: bool) {
        if let Some(f) = self.update_focused.as_mut() {
            f(focused);
        }
    }

    fn on_update_has_focused_child(&mut self, has_focused_child: bool) {
        if let Some(f) = self.update_has_focused_child.as_mut() {
            f(has_focused_child);
        }
    }
}
