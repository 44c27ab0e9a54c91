//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/blocktree/blocktree.toml`
//! 3. Local config: `<project_dir>/.blocktree.toml`
//! 4. Environment variables: `BLOCKTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{BlockCatalog, BlockTypeSpec};

/// Merged settings controlling document output and the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Pretty-print saved documents
    pub pretty_json: bool,
    /// Additional block types registered into the catalog
    pub types: Vec<BlockTypeSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pretty_json: true,
            types: Vec::new(),
        }
    }
}

/// Raw settings for intermediate parsing (scalars are Option to
/// distinguish "not specified" from an explicit value).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub pretty_json: Option<bool>,
    pub types: Option<Vec<BlockTypeSpec>>,
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load(project_dir: &Path) -> ApplicationResult<Self> {
        let mut builder = Config::builder();

        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        builder = builder.add_source(File::from(Self::local_config_path(project_dir)).required(false));
        builder = builder.add_source(Environment::with_prefix("BLOCKTREE"));

        let raw: RawSettings = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ApplicationError::Config {
                message: e.to_string(),
            })?;

        Ok(Self::default().merge(raw))
    }

    /// Merge raw overlay onto self: scalars win if specified, custom
    /// types are appended.
    pub fn merge(mut self, overlay: RawSettings) -> Self {
        if let Some(pretty) = overlay.pretty_json {
            self.pretty_json = pretty;
        }
        if let Some(types) = overlay.types {
            self.types.extend(types);
        }
        self
    }

    /// Build the catalog: built-in palette plus configured types.
    pub fn catalog(&self) -> ApplicationResult<BlockCatalog> {
        let mut catalog = BlockCatalog::builtin();
        for spec in &self.types {
            catalog.register(spec.clone())?;
        }
        Ok(catalog)
    }

    /// Path of the global config file, if a home directory exists.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "blocktree").map(|dirs| dirs.config_dir().join("blocktree.toml"))
    }

    /// Path of the local (per-project) config file.
    pub fn local_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(".blocktree.toml")
    }

    /// Template for a fresh config file.
    pub fn template() -> &'static str {
        r#"# blocktree configuration

# Pretty-print saved documents (default: true)
# pretty_json = true

# Additional block types for the palette:
# [[types]]
# name = "quote"
# label = "Quote"
# accepts_children = false
# [types.default_props]
# text = "..."
# author = ""
"#
    }
}
