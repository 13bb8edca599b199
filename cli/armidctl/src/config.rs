//! Configuration and schema definition discovery.
//!
//! Handles:
//! - The optional `config.toml` in the platform config directory
//! - Locating the schema definitions file
//! - Building the identity registry from built-in types plus definitions

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use armid::{IdRegistry, SchemaDefinitions};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Definitions file looked up in the config directory when none is given.
const DEFINITIONS_FILE: &str = "definitions.toml";

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "armid", "armid")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema definitions file, relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        let dir = config_dir()?;
        Self::load_from(&dir)
    }

    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        config.definitions = config.definitions.map(|p| dir.join(p));
        Ok(config)
    }

    /// Picks the definitions file: the explicit flag, then the configured
    /// path, then `definitions.toml` in the config directory if it exists.
    pub fn definitions_path(&self, flag: Option<&Path>) -> Result<Option<PathBuf>> {
        let dir = config_dir()?;
        Ok(self.definitions_path_in(flag, &dir))
    }

    fn definitions_path_in(&self, flag: Option<&Path>, dir: &Path) -> Option<PathBuf> {
        if let Some(path) = flag {
            return Some(path.to_path_buf());
        }
        if let Some(path) = &self.definitions {
            return Some(path.clone());
        }
        let default = dir.join(DEFINITIONS_FILE);
        default.exists().then_some(default)
    }
}

/// Builds the registry from the built-in types and an optional definitions file.
pub fn load_registry(definitions: Option<&Path>) -> Result<IdRegistry> {
    let mut builder = IdRegistry::builder().with_builtin_types();

    if let Some(path) = definitions {
        let defs = SchemaDefinitions::load(path)
            .with_context(|| format!("Failed to load schema definitions from {:?}", path))?;
        debug!(path = %path.display(), types = defs.len(), "loaded schema definitions");
        builder = builder
            .with_definitions(&defs)
            .with_context(|| format!("Invalid schema definitions in {:?}", path))?;
    }

    builder.build().context("Failed to build the identity registry")
}
