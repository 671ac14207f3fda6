//! Configuration file support for cost-optimizer.
//!
//! Provides YAML-based configuration through `cost-optimizer.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::resource_analysis::domain::ResourceKind;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cost-optimizer.config.yml";

/// Upper bound on the worker count
pub const MAX_CONCURRENCY: usize = 64;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub table: Option<String>,
    pub store_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub max_retries: Option<u32>,
    /// Kinds run by `all`, in order
    pub kinds: Option<Vec<ResourceKind>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    info!(path = %config_path.display(), "Auto-discovered config file");
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref table) = config.table {
        if table.trim().is_empty() {
            bail!(
                "Invalid config: table must not be empty.\n\n\
                 💡 Hint: Omit 'table' to use the default findings table."
            );
        }
    }

    if let Some(concurrency) = config.concurrency {
        if concurrency == 0 || concurrency > MAX_CONCURRENCY {
            bail!(
                "Invalid config: concurrency must be between 1 and {}, got {}.",
                MAX_CONCURRENCY,
                concurrency
            );
        }
    }

    if config.max_retries == Some(0) {
        bail!(
            "Invalid config: max_retries must be at least 1.\n\n\
             💡 Hint: Use 1 to disable retries."
        );
    }

    if let Some(ref kinds) = config.kinds {
        if kinds.is_empty() {
            bail!("Invalid config: kinds must list at least one resource kind.");
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "Unknown config field '{}' will be ignored", key);
    }
}
