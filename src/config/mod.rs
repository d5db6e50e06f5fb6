//! Configuration loading.
//!
//! Sources, highest priority first: CLI flags (applied by the caller),
//! `FLOWGRAPH_*` environment variables, an explicit `--config` file, the
//! per-user `flowgraph.yaml`, built-in defaults.

pub mod schema;

use std::path::{Path, PathBuf};

pub use schema::{FlowGraphConfig, SelectionConfig, ServerConfig};

use crate::error::{FlowGraphError, Result};

/// File name looked up in the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "flowgraph.yaml";

pub const ENV_DATA: &str = "FLOWGRAPH_DATA";
pub const ENV_DEPTH: &str = "FLOWGRAPH_DEPTH";
pub const ENV_PORT: &str = "FLOWGRAPH_PORT";

/// Per-user config file location, e.g. `~/.config/flowgraph/flowgraph.yaml`.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "flowgraph")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read and parse a YAML config file.
pub fn load_file(path: &Path) -> Result<FlowGraphConfig> {
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| {
        FlowGraphError::Config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Resolve the effective config.
///
/// An explicit path must exist; the per-user file is optional.
pub fn load(explicit: Option<&Path>) -> Result<FlowGraphConfig> {
    let mut config = match explicit {
        Some(path) => load_file(path)?,
        None => match user_config_path().filter(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using user config");
                load_file(&path)?
            }
            None => FlowGraphConfig::default(),
        },
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Overlay environment variables, looked up through `lookup`.
pub fn apply_env<F>(config: &mut FlowGraphConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(data) = lookup(ENV_DATA).filter(|v| !v.trim().is_empty()) {
        config.data = Some(PathBuf::from(data));
    }
    if let Some(depth) = lookup(ENV_DEPTH) {
        config.selection.default_depth = depth.trim().parse().map_err(|_| {
            FlowGraphError::Config(format!("{ENV_DEPTH} must be a non-negative integer, got {depth:?}"))
        })?;
    }
    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port.trim().parse().map_err(|_| {
            FlowGraphError::Config(format!("{ENV_PORT} must be a port number, got {port:?}"))
        })?;
    }
    Ok(())
}

/// Reject configs whose defaults contradict their own limits.
pub fn validate(config: &FlowGraphConfig) -> Result<()> {
    let sel = &config.selection;
    if sel.default_depth > sel.max_depth_limit {
        return Err(FlowGraphError::Config(format!(
            "default_depth {} exceeds max_depth_limit {}",
            sel.default_depth, sel.max_depth_limit
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
