//! Persistence for the one thing that outlives a session: the player's name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub trait NameStore {
    /// The stored name, or an empty string.
    fn get(&self) -> String;
    fn set(&mut self, name: &str);
}

/// Keeps the name in memory only.  Used by tests and `--no-save`.
#[derive(Clone, Debug, Default)]
pub struct MemoryNameStore {
    name: String,
}

impl MemoryNameStore {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl NameStore for MemoryNameStore {
    fn get(&self) -> String {
        self.name.clone()
    }

    fn set(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NameFile {
    name: String,
}

/// JSON file in the user's data directory.
#[derive(Clone, Debug)]
pub struct FileNameStore {
    path: PathBuf,
}

impl FileNameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<String> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let file: NameFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(file.name)
    }

    fn save(&self, name: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(&NameFile { name: name.to_string() })?;
        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl NameStore for FileNameStore {
    fn get(&self) -> String {
        if !self.path.exists() {
            return String::new();
        }
        self.load().unwrap_or_else(|e| {
            warn!("could not load player name: {e:#}");
            String::new()
        })
    }

    fn set(&mut self, name: &str) {
        if let Err(e) = self.save(name) {
            warn!("could not save player name: {e:#}");
        }
    }
}
