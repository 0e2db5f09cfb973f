//! Drive the headless home screen from a key script.

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use focusnav::{Navigation, NavigationConfig};
use focusnav_demo::{Home, Stroke};
use tracing::Level;

/// Send remote-control strokes to a television home screen and print where
/// focus goes.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Strokes to send: up, down, left, right or enter, optionally held with
    /// a repeat count, e.g. `right*3`.
    keys: Vec<Stroke>,

    /// Navigation configuration, as a JSON file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Print the focus tree after the script.
    #[clap(short, long)]
    dump: bool,

    /// Log engine transitions to stderr.
    #[clap(short, long)]
    verbose: bool,
}

/// Describe a dispatch outcome.
fn outcome(nav: Option<&Navigation>) -> String {
    match nav {
        None => "pressed".into(),
        Some(Navigation::Moved(key)) => format!("moved to {key}"),
        Some(Navigation::Handled) => "handled".into(),
        Some(Navigation::NoCandidate) => "no candidate".into(),
        Some(Navigation::NoFocus) => "no focus".into(),
        Some(Navigation::Paused) => "paused".into(),
    }
}

pub fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(Level::DEBUG)
            .without_time()
            .compact()
            .init();
    }

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            NavigationConfig::from_json(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => NavigationConfig::default(),
    };

    let mut home = Home::new(config)?;
    let mut out = io::stdout().lock();
    write!(out, "{}", home.render())?;
    for stroke in &args.keys {
        let nav = home.press(*stroke)?;
        writeln!(out, "\n{stroke}: {}", outcome(nav.as_ref()))?;
        write!(out, "{}", home.render())?;
    }
    if args.dump {
        writeln!(out)?;
        write!(out, "{}", home.engine().dump()?)?;
    }
    Ok(())
}
