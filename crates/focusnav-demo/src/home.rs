//! The home screen: a profile button in the top bar, a side menu, and a
//! content area with a progress bar above rows of assets.
//!
//! Vertical moves never enter or leave the menu; it only opens to left and
//! right. The progress bar sits in a player strip, and the profile button in
//! a navbar strip, that only open to up and down, so sideways moves along the
//! rows never jump into them.
//!
//! Each page mounts as a focusable container under the content area and takes
//! focus when it is switched to. Rows scroll sideways to keep the focused
//! asset in view, and the page scrolls to keep the focused row in view.
//!
//! Geometry is that of a 1920x1080 screen. The menu is 80 units wide when
//! collapsed and 246 when expanded, and everything right of it moves with
//! it, so the screen re-measures every node after each key.

use std::{
    mem,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use focusnav::{
    Engine, EventDispatch, FocusKey, FocusableSpec, Navigation, NavigationConfig, NodeUpdate,
    geom::{Direction, Rect},
};
use serde_json::json;
use tracing::info;

use crate::{
    input::Stroke,
    page::Page,
    widgets::{
        self, Action, Asset, ContentRow, Menu, MenuItem, Profile, ProgressBar, Shared,
        SharedState,
    },
};

/// Key of the top bar holding the profile button.
pub const NAVBAR: &str = "NAVBAR";
/// Key of the profile button.
pub const PROFILE: &str = "PROFILE";
/// Key of the side menu.
pub const MENU: &str = "MENU";
/// Key of the content area.
pub const CONTENT: &str = "CONTENT";
/// Key of the player strip holding the progress bar.
pub const PLAYER: &str = "PLAYER";
/// Key of the progress bar.
pub const PROGRESS: &str = "PROGRESS";
/// Assets in every content row.
pub const ASSETS_PER_ROW: usize = 8;

/// Screen width.
const SCREEN_WIDTH: f64 = 1920.0;
/// Screen height.
const SCREEN_HEIGHT: f64 = 1080.0;
/// Height of the top bar.
const NAVBAR_HEIGHT: f64 = 80.0;
/// Menu width when collapsed.
const MENU_COLLAPSED: f64 = 80.0;
/// Menu width when expanded.
const MENU_EXPANDED: f64 = 246.0;
/// Top of the first menu item.
const MENU_ITEM_TOP: f64 = 117.0;
/// Vertical distance between menu items.
const MENU_ITEM_PITCH: f64 = 100.0;
/// Menu item height.
const MENU_ITEM_HEIGHT: f64 = 80.0;
/// Left padding of the content area.
const CONTENT_PADDING: f64 = 60.0;
/// Top of the player strip.
const PLAYER_TOP: f64 = 170.0;
/// Height of the player strip.
const PLAYER_HEIGHT: f64 = 64.0;
/// Top of the progress bar.
const PROGRESS_TOP: f64 = 190.0;
/// Progress bar size.
const PROGRESS_SIZE: (f64, f64) = (540.0, 24.0);
/// Top of the first content row.
const ROWS_TOP: f64 = 240.0;
/// Vertical distance between rows.
const ROW_PITCH: f64 = 230.0;
/// Row height, title included.
const ROW_HEIGHT: f64 = 200.0;
/// Offset of the assets below the row title.
const ASSET_OFFSET: f64 = 40.0;
/// Asset size.
const ASSET_SIZE: (f64, f64) = (225.0, 127.0);
/// Space between assets.
const ASSET_GAP: f64 = 22.0;
/// Asset colors, cycled along each row.
const PALETTE: [&str; 3] = ["#714ADD", "#AB8DFF", "#512EB0"];

/// Focus key of a content row.
pub fn row_key(title: &str) -> String {
    format!("ROW_{title}")
}

/// Focus key of the `index`th asset in a row.
pub fn asset_key(title: &str, index: usize) -> String {
    format!("{title}-{index}")
}

/// A mounted content row.
#[derive(Debug)]
struct Row {
    /// Row title.
    title: &'static str,
    /// Indices of the assets still mounted, left to right.
    assets: Vec<usize>,
    /// Horizontal scroll offset.
    scroll: f64,
}

/// The home screen and the engine that drives its focus.
pub struct Home {
    /// Focus engine.
    engine: Engine,
    /// Page whose rows are mounted.
    page: Page,
    /// Mounted content rows, top to bottom.
    rows: Vec<Row>,
    /// Vertical scroll offset of the rows.
    page_scroll: f64,
    /// State written by handlers.
    state: SharedState,
}

impl Home {
    /// Build the screen on the home page and focus the menu.
    pub fn new(config: NavigationConfig) -> Result<Self> {
        let mut home = Self {
            engine: Engine::init(config),
            page: Page::Home,
            rows: Vec::new(),
            page_scroll: 0.0,
            state: Arc::new(Mutex::new(Shared::default())),
        };
        home.mount()?;
        home.relayout()?;
        home.engine.focus_self(MENU)?;
        home.relayout()?;
        Ok(home)
    }

    /// Register the fixed parts of the screen and the current page.
    fn mount(&mut self) -> Result<()> {
        let state = &self.state;
        let e = &mut self.engine;
        e.add(
            FocusableSpec::keyed(NAVBAR)
                .focusable(false)
                .focus_boundary([Direction::Left, Direction::Right]),
        )?;
        e.add(
            FocusableSpec::keyed(PROFILE)
                .parent(NAVBAR)
                .extra_props(json!({"name": "John Doe"}))
                .handler(Profile::new(state.clone())),
        )?;
        e.add(
            FocusableSpec::keyed(MENU)
                .save_last_focused_child(false)
                .track_children(true)
                .focus_boundary([Direction::Up, Direction::Down])
                .preferred_child(self.page.menu_key())
                .extra_props(json!({"foo": "bar"}))
                .handler(Menu::new(state.clone())),
        )?;
        for page in Page::ALL {
            e.add(
                FocusableSpec::keyed(page.menu_key())
                    .parent(MENU)
                    .extra_props(json!({"title": page.title(), "page": page.as_str()}))
                    .handler(MenuItem::new(state.clone())),
            )?;
        }
        e.add(FocusableSpec::keyed(CONTENT).focusable(false))?;
        e.add(
            FocusableSpec::keyed(PLAYER)
                .parent(CONTENT)
                .focusable(false)
                .focus_boundary([Direction::Left, Direction::Right]),
        )?;
        e.add(
            FocusableSpec::keyed(PROGRESS)
                .parent(PLAYER)
                .handler(ProgressBar::new(state.clone())),
        )?;
        self.mount_rows()
    }

    /// Register the current page and its rows.
    fn mount_rows(&mut self) -> Result<()> {
        let page_key = self.page.page_key();
        self.engine.add(
            FocusableSpec::keyed(page_key.as_str())
                .parent(CONTENT)
                .auto_restore_focus(true)
                .track_children(true),
        )?;
        for &title in self.page.rows() {
            self.engine.add(
                FocusableSpec::keyed(row_key(title))
                    .parent(page_key.as_str())
                    .focusable(false)
                    .save_last_focused_child(false)
                    .preferred_child(asset_key(title, 0))
                    .handler(ContentRow::new(self.state.clone())),
            )?;
            for i in 0..ASSETS_PER_ROW {
                self.engine.add(
                    FocusableSpec::keyed(asset_key(title, i))
                        .parent(row_key(title))
                        .extra_props(json!({
                            "title": format!("{title} {}", i + 1),
                            "color": PALETTE[i % PALETTE.len()],
                        }))
                        .handler(Asset::new(self.state.clone(), title)),
                )?;
            }
            self.rows.push(Row {
                title,
                assets: (0..ASSETS_PER_ROW).collect(),
                scroll: 0.0,
            });
        }
        Ok(())
    }

    /// Unregister the current page and its rows.
    fn unmount_rows(&mut self) {
        for row in mem::take(&mut self.rows) {
            for i in row.assets {
                self.engine.remove(&asset_key(row.title, i));
            }
            self.engine.remove(&row_key(row.title));
        }
        self.engine.remove(&self.page.page_key());
        self.page_scroll = 0.0;
    }

    /// Current menu width.
    fn menu_width(&self) -> f64 {
        if widgets::lock(&self.state).menu_expanded {
            MENU_EXPANDED
        } else {
            MENU_COLLAPSED
        }
    }

    /// Push current geometry for every node.
    fn relayout(&mut self) -> Result<()> {
        let width = self.menu_width();
        let body = SCREEN_HEIGHT - NAVBAR_HEIGHT;
        let e = &mut self.engine;
        e.update_layout(NAVBAR, Rect::new(0.0, 0.0, SCREEN_WIDTH, NAVBAR_HEIGHT))?;
        e.update_layout(PROFILE, Rect::new(SCREEN_WIDTH - 240.0, 15.0, 200.0, 50.0))?;
        e.update_layout(MENU, Rect::new(0.0, NAVBAR_HEIGHT, width, body))?;
        for (i, page) in Page::ALL.iter().enumerate() {
            e.update_layout(
                &page.menu_key(),
                Rect::new(
                    0.0,
                    MENU_ITEM_TOP + i as f64 * MENU_ITEM_PITCH,
                    width,
                    MENU_ITEM_HEIGHT,
                ),
            )?;
        }
        e.update_layout(
            CONTENT,
            Rect::new(width, NAVBAR_HEIGHT, SCREEN_WIDTH - width, body),
        )?;
        e.update_layout(
            PLAYER,
            Rect::new(width, PLAYER_TOP, SCREEN_WIDTH - width, PLAYER_HEIGHT),
        )?;
        e.update_layout(
            PROGRESS,
            Rect::new(
                width + CONTENT_PADDING,
                PROGRESS_TOP,
                PROGRESS_SIZE.0,
                PROGRESS_SIZE.1,
            ),
        )?;
        e.update_layout(
            &self.page.page_key(),
            Rect::new(width, ROWS_TOP, SCREEN_WIDTH - width, SCREEN_HEIGHT - ROWS_TOP),
        )?;
        for (r, row) in self.rows.iter().enumerate() {
            let top = ROWS_TOP + r as f64 * ROW_PITCH - self.page_scroll;
            e.update_layout(
                &row_key(row.title),
                Rect::new(width, top, SCREEN_WIDTH - width, ROW_HEIGHT),
            )?;
            for (slot, i) in row.assets.iter().enumerate() {
                e.update_layout(
                    &asset_key(row.title, *i),
                    Rect::new(
                        width + CONTENT_PADDING + slot as f64 * (ASSET_SIZE.0 + ASSET_GAP)
                            - row.scroll,
                        top + ASSET_OFFSET,
                        ASSET_SIZE.0,
                        ASSET_SIZE.1,
                    ),
                )?;
            }
        }
        Ok(())
    }

    /// Apply queued actions until none are left, then re-measure. Switching
    /// pages moves focus, which can queue more.
    fn settle(&mut self) -> Result<()> {
        loop {
            let actions = mem::take(&mut widgets::lock(&self.state).actions);
            if actions.is_empty() {
                break;
            }
            for action in actions {
                match action {
                    Action::Navigate(page) => self.switch_page(page)?,
                    Action::RevealAsset { row, rect } => self.reveal_asset(row, rect),
                    Action::RevealRow(rect) => self.reveal_row(rect),
                }
            }
        }
        self.relayout()
    }

    /// Scroll a row so an asset measured at `rect` fits between the content
    /// padding and the right edge of the screen.
    fn reveal_asset(&mut self, title: &str, rect: Rect) {
        let Some(row_rect) = self.engine.layout(&row_key(title)) else {
            return;
        };
        let view = SCREEN_WIDTH - self.menu_width() - CONTENT_PADDING;
        if let Some(row) = self.rows.iter_mut().find(|r| r.title == title) {
            let start = rect.x - row_rect.x - CONTENT_PADDING;
            row.scroll = scroll_into_view(row.scroll, start, rect.width, view);
        }
    }

    /// Scroll the page so a row measured at `rect` fits below the player.
    fn reveal_row(&mut self, rect: Rect) {
        self.page_scroll = scroll_into_view(
            self.page_scroll,
            rect.y - ROWS_TOP,
            rect.height,
            SCREEN_HEIGHT - ROWS_TOP,
        );
    }

    /// Swap the mounted page for `page` and focus it.
    pub fn switch_page(&mut self, page: Page) -> Result<()> {
        if page == self.page {
            return Ok(());
        }
        self.unmount_rows();
        self.page = page;
        self.mount_rows()?;
        self.engine.update(
            MENU,
            NodeUpdate::new().preferred_child(Some(page.menu_key())),
        )?;
        info!(%page, "switched page");
        self.relayout()?;
        self.engine.focus_self(&page.page_key())?;
        Ok(())
    }

    /// Send a key stroke. Returns the outcome of the last arrow press, or
    /// `None` for enter.
    pub fn press(&mut self, stroke: impl Into<Stroke>) -> Result<Option<Navigation>> {
        let stroke = stroke.into();
        let outcome = match stroke.key.direction() {
            Some(dir) => {
                let mut last = Navigation::NoFocus;
                for _ in 0..stroke.repeat {
                    last = self.engine.dispatch_arrow(dir);
                    self.settle()?;
                }
                self.engine.dispatch_arrow_release(dir);
                Some(last)
            }
            None => {
                for _ in 0..stroke.repeat {
                    self.engine.dispatch_enter_press();
                }
                self.engine.dispatch_enter_release();
                None
            }
        };
        self.settle()?;
        Ok(outcome)
    }

    /// Unmount one asset, as when a row drops an item.
    pub fn remove_asset(&mut self, key: &str) -> Result<()> {
        for row in &mut self.rows {
            row.assets.retain(|i| asset_key(row.title, *i) != key);
        }
        self.engine.remove(key);
        self.settle()
    }

    /// The engine, for queries.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The current page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Titles of the mounted rows.
    pub fn row_titles(&self) -> Vec<&'static str> {
        self.rows.iter().map(|r| r.title).collect()
    }

    /// Key of the focused node.
    pub fn focused(&self) -> Option<&str> {
        self.engine.current_focus_key().map(FocusKey::as_str)
    }

    /// Is the menu expanded?
    pub fn menu_expanded(&self) -> bool {
        widgets::lock(&self.state).menu_expanded
    }

    /// Progress bar position, in percent.
    pub fn progress(&self) -> u32 {
        widgets::lock(&self.state).progress
    }

    /// Title of the last selected asset.
    pub fn selected(&self) -> Option<String> {
        widgets::lock(&self.state).selected.clone()
    }

    /// Times the profile button was pressed.
    pub fn profile_opens(&self) -> u32 {
        widgets::lock(&self.state).profile_opens
    }

    /// A short text summary of the screen.
    pub fn render(&self) -> String {
        let path: Vec<&str> = self
            .engine
            .focus_path()
            .into_iter()
            .map(FocusKey::as_str)
            .collect();
        format!(
            "page: {}\nfocus: {}\nmenu: {}\nprogress: {}%\nselected: {}\n",
            self.page,
            if path.is_empty() {
                "-".to_string()
            } else {
                path.join(" > ")
            },
            if self.menu_expanded() {
                "expanded"
            } else {
                "collapsed"
            },
            self.progress(),
            self.selected().as_deref().unwrap_or("-"),
        )
    }
}

/// New scroll offset that brings a span starting `start` into a viewport of
/// length `view`. `start` is relative to the viewport at the current offset.
fn scroll_into_view(scroll: f64, start: f64, len: f64, view: f64) -> f64 {
    let shift = if start < 0.0 {
        start
    } else if start + len > view {
        (start + len - view).min(start)
    } else {
        0.0
    };
    (scroll + shift).max(0.0)
}
