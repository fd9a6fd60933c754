//! Configuration for the newsdesk workflow.
//!
//! # Security
//!
//! - Config file permission validation on Unix systems
//! - Rejects world-readable files containing API keys
//! - Warns about API keys stored in config files

use std::path::Path;

use newsdesk_llm::LlmConfig;
use newsdesk_lookup::LookupConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classify::DEFAULT_MARKERS;

/// Top-level configuration: `[llm]`, `[lookup]` and `[workflow]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsdeskConfig {
    pub llm: LlmConfig,
    pub lookup: LookupConfig,
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Headlines the news scout presents
    pub max_candidates: usize,

    /// Phrases that mark a coordinator message as a question for the human
    pub solicitation_markers: Vec<String>,

    /// Delegate calls the manager may make per invocation
    pub max_tool_calls: usize,

    /// Publication name the manager writes for
    pub publication: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_candidates: newsdesk_agents::DEFAULT_MAX_CANDIDATES,
            solicitation_markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            max_tool_calls: 4,
            publication: "Daily Danny".into(),
        }
    }
}

impl NewsdeskConfig {
    /// Load configuration from a TOML file.
    ///
    /// On Unix the file must be a regular file, must not be world-writable,
    /// and must not be world-readable if it holds an API key.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        #[cfg(unix)]
        validate_config_file_permissions(path)?;

        let config = Self::from_file_unchecked(path)?;

        if config.llm.api_key.is_some() || config.lookup.api_key.is_some() {
            warn!(
                "API key found in config file '{}'. Prefer environment variables \
                 (OPENAI_API_KEY, NEWSAPI_KEY).",
                path.display()
            );
        }

        Ok(config)
    }

    /// Load configuration from a TOML file without permission checks.
    pub fn from_file_unchecked(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(unix)]
fn validate_config_file_permissions(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

    if !metadata.is_file() {
        anyhow::bail!(
            "Config path '{}' is not a regular file. Symlinks and directories are not allowed.",
            path.display()
        );
    }

    let permission_bits = metadata.permissions().mode() & 0o777;

    if permission_bits & 0o002 != 0 {
        anyhow::bail!(
            "Config file '{}' is world-writable (mode {:04o}). Fix with: chmod o-w {}",
            path.display(),
            permission_bits,
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)?;
    let has_api_key = content.lines().any(|line| {
        let line = line.trim_start();
        !line.starts_with('#') && line.starts_with("api_key")
    });

    if has_api_key && permission_bits & 0o004 != 0 {
        anyhow::bail!(
            "Config file '{}' contains an API key but is world-readable (mode {:04o}). \
             Fix with: chmod 600 {}",
            path.display(),
            permission_bits,
            path.display()
        );
    }

    if has_api_key && permission_bits & 0o040 != 0 {
        warn!(
            "Config file '{}' contains an API key and is group-readable (mode {:04o}).",
            path.display(),
            permission_bits
        );
    }

    Ok(())
}
