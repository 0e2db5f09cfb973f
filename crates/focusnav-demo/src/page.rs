use std::{fmt, str::FromStr};

use anyhow::{Error, Result, bail};

/// A top-level page, chosen from the side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// The landing page.
    #[default]
    Home,
    /// Movies.
    Movies,
    /// Series.
    Series,
    /// Sports.
    Sports,
    /// Settings. Has no content rows.
    Settings,
}

impl Page {
    /// Every page, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Movies,
        Self::Series,
        Self::Sports,
        Self::Settings,
    ];

    /// Lower-case name, as used in menu item props.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Movies => "movies",
            Self::Series => "series",
            Self::Sports => "sports",
            Self::Settings => "settings",
        }
    }

    /// Menu label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Movies => "Movies",
            Self::Series => "Series",
            Self::Sports => "Sports",
            Self::Settings => "Settings",
        }
    }

    /// Focus key of this page's menu item.
    pub fn menu_key(self) -> String {
        format!("MENU_ITEM_{}", self.as_str().to_uppercase())
    }

    /// Focus key of this page's container.
    pub fn page_key(self) -> String {
        format!("PAGE_{}", self.as_str().to_uppercase())
    }

    /// Titles of the content rows on this page, top to bottom.
    pub fn rows(self) -> &'static [&'static str] {
        match self {
            Self::Home => &[
                "Recommended",
                "Trending Now",
                "Movies",
                "New Releases",
                "Series",
                "TV Channels",
                "Sport",
            ],
            Self::Movies => &["Movies", "Action Movies", "Comedy Movies"],
            Self::Series => &["Series", "Netflix Originals", "HBO Series"],
            Self::Sports => &["Sport", "Live Events"],
            Self::Settings => &[],
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
        {
            Some(p) => Ok(p),
            None => bail!("unknown page: {s}"),
        }
    }
}
