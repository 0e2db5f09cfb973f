use anyhow::Result;
use focusnav::{Navigation, NavigationConfig, testing::check_focus_flags};

use crate::{
    Home, Key, Page, Stroke,
    home::{CONTENT, MENU, PROFILE, PROGRESS, asset_key, row_key},
};

fn home() -> Result<Home> {
    Home::new(NavigationConfig::default())
}

fn moved(key: &str) -> Option<Navigation> {
    Some(Navigation::Moved(key.parse().expect("valid key")))
}

fn consistent(home: &Home) {
    assert_eq!(check_focus_flags(home.engine()), Ok(()));
}

#[test]
fn test_startup_focuses_current_page_menu_item() -> Result<()> {
    let home = home()?;
    assert_eq!(home.focused(), Some("MENU_ITEM_HOME"));
    assert!(home.engine().has_focused_child(MENU));
    assert!(home.menu_expanded());
    assert_eq!(home.page(), Page::Home);
    assert_eq!(home.row_titles().len(), 7);
    assert_eq!(
        home.engine().layout(MENU).map(|r| r.width),
        Some(246.0)
    );
    consistent(&home);
    Ok(())
}

#[test]
fn test_menu_collapses_when_focus_leaves() -> Result<()> {
    let mut home = home()?;
    assert_eq!(home.press(Key::Right)?, moved("Recommended-0"));
    assert!(!home.menu_expanded());
    assert!(home.engine().has_focused_child(CONTENT));
    assert_eq!(home.engine().layout(MENU).map(|r| r.width), Some(80.0));
    assert_eq!(
        home.engine().layout("Recommended-0").map(|r| r.x),
        Some(140.0)
    );
    consistent(&home);
    Ok(())
}

#[test]
fn test_left_and_right_cross_between_menu_and_assets() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Right)?;
    // The item level with the first row is the nearest.
    assert_eq!(home.press(Key::Left)?, moved("MENU_ITEM_SERIES"));
    assert!(home.menu_expanded());
    assert_eq!(home.press(Key::Right)?, moved("Recommended-0"));
    assert!(!home.menu_expanded());
    Ok(())
}

#[test]
fn test_vertical_moves_stay_inside_menu() -> Result<()> {
    let mut home = home()?;
    assert_eq!(home.press(Key::Up)?, Some(Navigation::NoCandidate));
    assert_eq!(home.press(Key::Down)?, moved("MENU_ITEM_MOVIES"));
    assert_eq!(home.press("down*3".parse::<Stroke>()?)?, moved("MENU_ITEM_SETTINGS"));
    assert_eq!(home.press(Key::Down)?, Some(Navigation::NoCandidate));
    assert!(home.menu_expanded());
    Ok(())
}

#[test]
fn test_rows_do_not_fall_into_menu() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Right)?;
    assert_eq!(home.press(Key::Down)?, moved("Trending Now-0"));
    assert_eq!(home.press(Key::Up)?, moved("Recommended-0"));
    assert_eq!(home.press(Key::Up)?, moved(PROGRESS));
    assert_eq!(home.press(Key::Up)?, moved(PROFILE));
    assert_eq!(home.press(Key::Up)?, Some(Navigation::NoCandidate));
    Ok(())
}

#[test]
fn test_progress_bar_consumes_left_and_right() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Right)?;
    home.press(Key::Up)?;
    assert_eq!(home.focused(), Some(PROGRESS));
    assert_eq!(home.progress(), 10);

    assert_eq!(home.press("right*3".parse::<Stroke>()?)?, Some(Navigation::Handled));
    assert_eq!(home.progress(), 40);
    assert_eq!(home.press(Key::Left)?, Some(Navigation::Handled));
    assert_eq!(home.progress(), 30);
    assert_eq!(home.focused(), Some(PROGRESS));

    // Leaving resets the bar.
    assert_eq!(home.press(Key::Down)?, moved("Recommended-1"));
    assert_eq!(home.progress(), 10);
    Ok(())
}

#[test]
fn test_menu_enter_switches_page_and_focuses_it() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Down)?;
    assert_eq!(home.press(Key::Enter)?, None);
    assert_eq!(home.page(), Page::Movies);
    assert_eq!(
        home.row_titles(),
        vec!["Movies", "Action Movies", "Comedy Movies"]
    );
    // The new page takes focus and enters its first row.
    assert_eq!(home.focused(), Some("Movies-0"));
    assert!(home.engine().has_focused_child("PAGE_MOVIES"));
    assert!(!home.menu_expanded());
    assert!(home.engine().get("PAGE_HOME").is_none());
    assert!(home.engine().get("Recommended-0").is_none());
    assert_eq!(
        home.engine()
            .get(MENU)
            .and_then(|n| n.preferred_child_key())
            .map(|k| k.as_str()),
        Some("MENU_ITEM_MOVIES")
    );
    assert_eq!(
        home.engine().layout("Movies-0").map(|r| (r.x, r.y)),
        Some((140.0, 280.0))
    );
    assert_eq!(home.press(Key::Left)?, moved("MENU_ITEM_SERIES"));
    consistent(&home);
    Ok(())
}

#[test]
fn test_empty_page_takes_focus_itself() -> Result<()> {
    let mut home = home()?;
    home.press("down*4".parse::<Stroke>()?)?;
    home.press(Key::Enter)?;
    assert_eq!(home.page(), Page::Settings);
    assert!(home.row_titles().is_empty());
    assert_eq!(home.focused(), Some("PAGE_SETTINGS"));
    // The player and the navbar only open vertically.
    assert_eq!(home.press(Key::Right)?, Some(Navigation::NoCandidate));
    assert_eq!(home.press(Key::Up)?, moved(PROGRESS));
    assert_eq!(home.press(Key::Up)?, moved(PROFILE));
    assert_eq!(home.press(Key::Down)?, moved(PROGRESS));
    assert_eq!(home.press(Key::Down)?, moved("PAGE_SETTINGS"));
    consistent(&home);
    Ok(())
}

#[test]
fn test_row_scrolls_to_keep_focused_asset_in_view() -> Result<()> {
    // Zero tolerance keeps sideways moves inside the row once rows are
    // scrolled apart.
    let strict = NavigationConfig::from_json(r#"{"perpendicularTolerance": 0.0}"#)?;
    let mut home = Home::new(strict)?;
    home.press("down*2".parse::<Stroke>()?)?;
    assert_eq!(home.press(Key::Right)?, moved("Recommended-0"));
    assert_eq!(home.press("right*6".parse::<Stroke>()?)?, moved("Recommended-6"));
    // Still fully on screen.
    assert_eq!(
        home.engine().layout("Recommended-6").map(|r| r.x),
        Some(1622.0)
    );
    assert_eq!(home.press(Key::Right)?, moved("Recommended-7"));
    // The row shifts so the last asset ends at the screen edge.
    assert_eq!(
        home.engine().layout("Recommended-7").map(|r| r.right()),
        Some(1920.0)
    );
    assert_eq!(
        home.engine().layout("Recommended-0").map(|r| r.x),
        Some(-34.0)
    );
    // Other rows keep their own offset.
    assert_eq!(
        home.engine().layout("Trending Now-0").map(|r| r.x),
        Some(140.0)
    );
    assert_eq!(home.press(Key::Right)?, Some(Navigation::NoCandidate));

    assert_eq!(home.press("left*7".parse::<Stroke>()?)?, moved("Recommended-0"));
    assert_eq!(
        home.engine().layout("Recommended-0").map(|r| r.x),
        Some(140.0)
    );
    Ok(())
}

#[test]
fn test_page_scrolls_to_keep_focused_row_in_view() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Right)?;
    assert_eq!(home.press("down*2".parse::<Stroke>()?)?, moved("Movies-0"));
    assert_eq!(
        home.engine().layout(&row_key("Recommended")).map(|r| r.y),
        Some(240.0)
    );
    assert_eq!(home.press(Key::Down)?, moved("New Releases-0"));
    assert_eq!(
        home.engine().layout(&row_key("New Releases")).map(|r| r.bottom()),
        Some(1080.0)
    );
    assert_eq!(
        home.engine().layout(&row_key("Recommended")).map(|r| r.y),
        Some(190.0)
    );
    assert_eq!(home.press("up*3".parse::<Stroke>()?)?, moved("Recommended-0"));
    assert_eq!(
        home.engine().layout(&row_key("Recommended")).map(|r| r.y),
        Some(240.0)
    );
    Ok(())
}

#[test]
fn test_enter_selects_asset_and_opens_profile() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Right)?;
    home.press(Key::Enter)?;
    assert_eq!(home.selected().as_deref(), Some("Recommended 1"));

    home.press(Key::Up)?;
    home.press(Key::Up)?;
    assert_eq!(home.focused(), Some(PROFILE));
    home.press(Key::Enter)?;
    assert_eq!(home.profile_opens(), 1);
    assert_eq!(home.selected().as_deref(), Some("Recommended 1"));
    Ok(())
}

#[test]
fn test_removing_focused_asset_restores_in_row() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Right)?;
    assert_eq!(home.press(Key::Right)?, moved("Recommended-1"));
    home.remove_asset("Recommended-1")?;
    assert_eq!(home.focused(), Some("Recommended-0"));
    assert!(home.engine().has_focused_child(CONTENT));
    // The row closes the gap.
    assert_eq!(
        home.engine().layout(&asset_key("Recommended", 2)).map(|r| r.x),
        Some(387.0)
    );
    consistent(&home);
    Ok(())
}

#[test]
fn test_perpendicular_tolerance_from_config() -> Result<()> {
    let strict = NavigationConfig::from_json(r#"{"perpendicularTolerance": 0.0}"#)?;
    let mut home = Home::new(strict)?;
    // No asset overlaps the first menu item vertically.
    assert_eq!(home.press(Key::Right)?, Some(Navigation::NoCandidate));
    assert_eq!(home.focused(), Some("MENU_ITEM_HOME"));

    let loose = NavigationConfig::from_json(r#"{"perpendicularTolerance": 90.0}"#)?;
    let mut home = Home::new(loose)?;
    assert_eq!(home.press(Key::Right)?, moved("Recommended-0"));
    Ok(())
}

#[test]
fn test_render_and_dump() -> Result<()> {
    let mut home = home()?;
    home.press(Key::Right)?;
    let text = home.render();
    assert!(text.contains("page: home"));
    assert!(text.contains("focus: CONTENT > PAGE_HOME > ROW_Recommended > Recommended-0"));
    assert!(text.contains("menu: collapsed"));
    let dump = home.engine().dump()?;
    assert!(dump.contains("MENU_ITEM_HOME"));
    assert!(dump.contains("Recommended-0"));
    Ok(())
}
