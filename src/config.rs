//! Settings file and command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps_cap: u32,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// World units per terminal column.
    pub cell_width: f32,
    /// World units per terminal row.
    pub cell_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            seed: None,
            cell_width: 10.0,
            cell_height: 20.0,
        }
    }
}

impl Settings {
    /// Read settings, falling back to defaults on a missing or bad file.
    pub fn load(path: &Path) -> Settings {
        let Ok(raw) = fs::read_to_string(path) else {
            return Settings::default();
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring malformed settings at {}: {e}", path.display());
                Settings::default()
            }
        }
    }

    /// Command-line flags win over the file.
    pub fn apply(&mut self, args: &Args) {
        if let Some(fps) = args.fps {
            self.fps_cap = fps.max(1);
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
    }
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "chicken_chop")]
#[command(about = "Click the chickens, shoot down the eggs, catch the buckets", long_about = None)]
pub struct Args {
    /// Frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the menus and start this level (1 or 2).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub level: Option<u8>,

    /// Don't persist the player name.
    #[arg(long, default_value_t = false)]
    pub no_save: bool,
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub name_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "chicken_chop", "ChickenChop")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        name_path: dir.join("name.json"),
        log_path: dir.join("chicken_chop.log"),
    })
}
