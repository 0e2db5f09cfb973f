//! A handler that records every callback it receives.

use std::{
    collections::BTreeSet,
    mem,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    geom::{Direction, Rect},
    handler::{ArrowAction, ExtraProps, FocusDetails, FocusHandler, KeyPressDetails},
};

/// A recorded callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `on_enter_press`, with the repeat count of the enter input.
    EnterPress(u32),
    /// `on_enter_release`.
    EnterRelease,
    /// `on_arrow_press`, with the repeat count of that arrow.
    ArrowPress(Direction, u32),
    /// `on_arrow_release`.
    ArrowRelease(Direction),
    /// `on_focus`.
    Focus,
    /// `on_blur`.
    Blur,
    /// `on_update_focused`.
    Focused(bool),
    /// `on_update_has_focused_child`.
    HasFocusedChild(bool),
}

/// One entry in a [`Log`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Name of the recorder that saw the event.
    pub node: String,
    /// What happened.
    pub event: Event,
    /// The props the engine passed along.
    pub props: ExtraProps,
}

/// Shared, ordered log of callbacks across any number of recorders.
#[derive(Debug, Clone, Default)]
pub struct Log {
    /// Recorded entries.
    records: Arc<Mutex<Vec<Record>>>,
}

impl Log {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder writing to this log under `name`.
    pub fn recorder(&self, name: impl Into<String>) -> Recorder {
        Recorder {
            name: name.into(),
            log: self.clone(),
            consume: BTreeSet::new(),
        }
    }

    /// Lock the log.
    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All records so far.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Drain and return all records.
    pub fn take(&self) -> Vec<Record> {
        mem::take(&mut *self.lock())
    }

    /// Drain and return records as `(node, event)` pairs.
    pub fn take_events(&self) -> Vec<(String, Event)> {
        self.take().into_iter().map(|r| (r.node, r.event)).collect()
    }

    /// Events recorded for one node.
    pub fn events_for(&self, node: &str) -> Vec<Event> {
        self.lock()
            .iter()
            .filter(|r| r.node == node)
            .map(|r| r.event.clone())
            .collect()
    }

    /// Discard all records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Append a record.
    fn push(&self, node: &str, event: Event, props: &ExtraProps) {
        self.lock().push(Record {
            node: node.to_string(),
            event,
            props: props.clone(),
        });
    }
}

/// A [`FocusHandler`] that appends every callback to a [`Log`].
pub struct Recorder {
    /// Name used in records.
    name: String,
    /// Destination log.
    log: Log,
    /// Arrow directions this node consumes.
    consume: BTreeSet<Direction>,
}

impl Recorder {
    /// Consume arrow presses in these directions.
    pub fn consume(mut self, directions: impl IntoIterator<Item = Direction>) -> Self {
        self.consume.extend(directions);
        self
    }
}

impl FocusHandler for Recorder {
    fn on_enter_press(&mut self, props: &ExtraProps, details: &KeyPressDetails) {
        self.log
            .push(&self.name, Event::EnterPress(details.count("enter")), props);
    }

    fn on_enter_release(&mut self, props: &ExtraProps) {
        self.log.push(&self.name, Event::EnterRelease, props);
    }

    fn on_arrow_press(
        &mut self,
        direction: Direction,
        props: &ExtraProps,
        details: &KeyPressDetails,
    ) -> ArrowAction {
        self.log.push(
            &self.name,
            Event::ArrowPress(direction, details.count(direction.as_str())),
            props,
        );
        self.consume.contains(&direction).into()
    }

    fn on_arrow_release(&mut self, direction: Direction, props: &ExtraProps) {
        self.log
            .push(&self.name, Event::ArrowRelease(direction), props);
    }

    fn on_focus(&mut self, _layout: Option<Rect>, props: &ExtraProps, _details: &FocusDetails) {
        self.log.push(&self.name, Event::Focus, props);
    }

    fn on_blur(&mut self, _layout: Option<Rect>, props: &ExtraProps, _details: &FocusDetails) {
        self.log.push(&self.name, Event::Blur, props);
    }

    fn on_update_focused(&mut self, focused: bool) {
        self.log
            .push(&self.name, Event::Focused(focused), &ExtraProps::Null);
    }

    fn on_update_has_focused_child(&mut self, has_focused_child: bool) {
        self.log.push(
            &self.name,
            Event::HasFocusedChild(has_focused_child),
            &ExtraProps::Null,
        );
    }
}
