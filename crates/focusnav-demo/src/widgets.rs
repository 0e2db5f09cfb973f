//! Focus handlers for the elements of the home screen.
//!
//! Handlers run inside engine calls and cannot reach the engine, so they only
//! write to [`Shared`]. Anything that changes the focus tree is queued as an
//! [`Action`] and applied by [`crate::Home`] once the dispatch returns.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use focusnav::{
    ArrowAction, ExtraProps, FocusDetails, FocusHandler, KeyPressDetails,
    geom::{Direction, Rect},
};
use tracing::{debug, info};

use crate::page::Page;

/// Progress shown when the bar is not focused.
pub const DEFAULT_PERCENT: u32 = 10;
/// Progress change per arrow press.
pub const SEEK_PERCENT: u32 = 10;

/// A change requested by a handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Swap the content rows for another page.
    Navigate(Page),
    /// Scroll a row so the asset focused at `rect` is in view.
    RevealAsset {
        /// Title of the row holding the asset.
        row: &'static str,
        /// Where the asset was when it took focus.
        rect: Rect,
    },
    /// Scroll the page so the row focused at this rect is in view.
    RevealRow(Rect),
}

/// Screen state written by handlers.
#[derive(Debug)]
pub struct Shared {
    /// Pending tree changes.
    pub actions: Vec<Action>,
    /// The menu is expanded while one of its items is focused.
    pub menu_expanded: bool,
    /// Progress bar position, in percent.
    pub progress: u32,
    /// Title of the last asset chosen with enter.
    pub selected: Option<String>,
    /// Times the profile button was pressed.
    pub profile_opens: u32,
}

impl Default for Shared {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            menu_expanded: false,
            progress: DEFAULT_PERCENT,
            selected: None,
            profile_opens: 0,
        }
    }
}

/// Handle to [`Shared`] held by every handler.
pub type SharedState = Arc<Mutex<Shared>>;

/// Lock the shared state. A panicking handler does not poison the screen.
pub fn lock(state: &SharedState) -> MutexGuard<'_, Shared> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The side menu container. Expands while it holds focus.
pub struct Menu {
    /// Screen state.
    state: SharedState,
}

impl Menu {
    /// Create a menu handler.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl FocusHandler for Menu {
    fn on_update_has_focused_child(&mut self, has_focused_child: bool) {
        lock(&self.state).menu_expanded = has_focused_child;
    }
}

/// One menu entry. Enter switches to the page named in its props.
pub struct MenuItem {
    /// Screen state.
    state: SharedState,
}

impl MenuItem {
    /// Create a menu item handler.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl FocusHandler for MenuItem {
    fn on_enter_press(&mut self, props: &ExtraProps, _details: &KeyPressDetails) {
        match props["page"].as_str().map(str::parse::<Page>) {
            Some(Ok(page)) => lock(&self.state).actions.push(Action::Navigate(page)),
            _ => debug!(%props, "menu item without a page"),
        }
    }
}

/// A content row. The page scrolls to it when focus enters.
pub struct ContentRow {
    /// Screen state.
    state: SharedState,
}

impl ContentRow {
    /// Create a row handler.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl FocusHandler for ContentRow {
    fn on_focus(&mut self, layout: Option<Rect>, _props: &ExtraProps, _details: &FocusDetails) {
        if let Some(rect) = layout {
            lock(&self.state).actions.push(Action::RevealRow(rect));
        }
    }
}

/// A content tile. Enter selects it, and its row scrolls to it on focus.
pub struct Asset {
    /// Screen state.
    state: SharedState,
    /// Title of the row the asset sits in.
    row: &'static str,
}

impl Asset {
    /// Create an asset handler.
    pub fn new(state: SharedState, row: &'static str) -> Self {
        Self { state, row }
    }
}

impl FocusHandler for Asset {
    fn on_focus(&mut self, layout: Option<Rect>, _props: &ExtraProps, _details: &FocusDetails) {
        if let Some(rect) = layout {
            lock(&self.state).actions.push(Action::RevealAsset { row: self.row, rect });
        }
    }

    fn on_enter_press(&mut self, props: &ExtraProps, _details: &KeyPressDetails) {
        let title = props["title"].as_str().map(String::from);
        info!(title = title.as_deref().unwrap_or("?"), "asset selected");
        lock(&self.state).selected = title;
    }
}

/// A seek bar that handles left and right itself, so focus never leaves it
/// sideways.
pub struct ProgressBar {
    /// Screen state.
    state: SharedState,
}

impl ProgressBar {
    /// Create a progress bar handler.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl FocusHandler for ProgressBar {
    fn on_arrow_press(
        &mut self,
        direction: Direction,
        _props: &ExtraProps,
        _details: &KeyPressDetails,
    ) -> ArrowAction {
        let mut state = lock(&self.state);
        match direction {
            Direction::Right => {
                state.progress = (state.progress + SEEK_PERCENT).min(100);
                ArrowAction::Handled
            }
            Direction::Left => {
                state.progress = state.progress.saturating_sub(SEEK_PERCENT);
                ArrowAction::Handled
            }
            Direction::Up | Direction::Down => ArrowAction::Continue,
        }
    }

    fn on_update_focused(&mut self, focused: bool) {
        if !focused {
            lock(&self.state).progress = DEFAULT_PERCENT;
        }
    }
}

/// The profile button in the top bar.
pub struct Profile {
    /// Screen state.
    state: SharedState,
}

impl Profile {
    /// Create a profile button handler.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl FocusHandler for Profile {
    fn on_enter_press(&mut self, props: &ExtraProps, _details: &KeyPressDetails) {
        info!(user = props["name"].as_str().unwrap_or("?"), "profile opened");
        lock(&self.state).profile_opens += 1;
    }
}
