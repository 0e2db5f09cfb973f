use std::{fmt, str::FromStr};

use anyhow::{Error, Result, bail};
use focusnav::geom::Direction;

/// A remote-control key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// OK / select.
    Enter,
}

impl Key {
    /// Navigation direction of an arrow key. `None` for enter.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Enter => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(d) => f.write_str(d.as_str()),
            None => f.write_str("enter"),
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "up" | "k" => Self::Up,
            "down" | "j" => Self::Down,
            "left" | "h" => Self::Left,
            "right" | "l" => Self::Right,
            "enter" | "ok" | "select" => Self::Enter,
            _ => bail!("unknown key: {s}"),
        })
    }
}

/// A key held through `repeat` presses before it is released. Scripts write
/// it as `right` or `right*3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    /// The key.
    pub key: Key,
    /// Number of presses before the release.
    pub repeat: u32,
}

impl From<Key> for Stroke {
    fn from(key: Key) -> Self {
        Self { key, repeat: 1 }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeat == 1 {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}*{}", self.key, self.repeat)
        }
    }
}

impl FromStr for Stroke {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, repeat) = match s.split_once('*') {
            Some((k, n)) => (k, n.trim().parse::<u32>()?),
            None => (s, 1),
        };
        if repeat == 0 {
            bail!("repeat count must be positive: {s}");
        }
        Ok(Self {
            key: key.trim().parse()?,
            repeat,
        })
    }
}
