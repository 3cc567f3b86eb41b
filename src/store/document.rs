use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Universe;
use crate::errors::{parse_context, read_context, write_context};

/// Owns the universe file on disk. Loads it wholesale and replaces it
/// wholesale; a failed save leaves the previous file in place.
pub struct UniverseStore {
    path: PathBuf,
    division_threshold: i32,
}

impl UniverseStore {
    pub fn new<P: AsRef<Path>>(path: P, division_threshold: i32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            division_threshold,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Universe> {
        let json = fs::read_to_string(&self.path).with_context(|| read_context(&self.path))?;
        let mut universe = Self::parse(&json).with_context(|| parse_context(&self.path))?;
        universe.normalize(self.division_threshold);

        info!(
            "Loaded universe from {} ({} wrestlers, {} championships)",
            self.path.display(),
            universe.players.len(),
            universe.championships.len()
        );
        Ok(universe)
    }

    pub fn save(&self, universe: &Universe) -> Result<()> {
        let temp_path = self.temp_path();
        debug!("Writing universe to temp file {}", temp_path.display());

        self.write_json(&temp_path, universe)?;

        // Atomic swap
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e).with_context(|| write_context(&self.path));
        }
        info!("Universe updated and saved to {}", self.path.display());
        Ok(())
    }

    // --- Helper Methods ---

    fn parse(json: &str) -> Result<Universe> {
        serde_json::from_str(json).with_context(|| {
            format!("Invalid universe document. First 200 chars: {}", preview(json))
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_json(&self, path: &Path, universe: &Universe) -> Result<()> {
        let json = serde_json::to_string_pretty(universe).context("Failed to serialize universe")?;
        if let Err(e) = fs::write(path, json) {
            let _ = fs::remove_file(path);
            return Err(e).with_context(|| write_context(path));
        }
        Ok(())
    }
}

fn preview(json: &str) -> String {
    json.chars().take(200).collect()
}
