//! Config file loading

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Stays under the 65536-character body limit common hosting APIs enforce.
pub const DEFAULT_MAX_COMMENT_SIZE: usize = 65_000;

const SECTION: &str = "pr-comments";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Environment tag printed in every comment.
    pub env: String,
    /// Upper bound, in bytes, of one posted comment.
    pub max_comment_size: usize,
    /// Comment-command prefix shown in help comments.
    pub command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: "default".to_string(),
            max_comment_size: DEFAULT_MAX_COMMENT_SIZE,
            command: "clusterbot".to_string(),
        }
    }
}

pub fn load_settings(work_dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(work_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_settings(&content, &config_file),
        "yaml" | "yml" => parse_yaml_settings(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(settings) => {
            tracing::debug!("loaded settings from {}", config_file.display());
            Ok(settings)
        }
        Err(e) if !config_path_provided => {
            tracing::warn!(
                "Ignoring auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Settings::default())
        }
        Err(e) => Err(e),
    }
}

/// Parse TOML settings, optionally nested under a `[pr-comments]` table.
fn parse_toml_settings(content: &str, config_file: &Path) -> Result<Settings> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let value = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    value
        .try_into()
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML settings, optionally nested under a `pr-comments` key.
fn parse_yaml_settings(content: &str, config_file: &Path) -> Result<Settings> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let value = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(value)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(work_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "pr-comments.toml",
        ".pr-comments.toml",
        "pr-comments.yaml",
        ".pr-comments.yaml",
        "pr-comments.yml",
        ".pr-comments.yml",
    ];

    candidates
        .iter()
        .map(|candidate| work_dir.join(candidate))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_comment_size, DEFAULT_MAX_COMMENT_SIZE);
    }

    #[test]
    fn test_discovers_toml_settings() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("pr-comments.toml"),
            "env = 'stage'\nmax_comment_size = 1000\n",
        )
        .expect("write");

        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings.env, "stage");
        assert_eq!(settings.max_comment_size, 1000);
        assert_eq!(settings.command, "clusterbot");
    }

    #[test]
    fn test_nested_toml_section() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[pr-comments]\ncommand = 'kbot'\n").expect("write");

        let settings = load_settings(tmp.path(), Some(&path)).expect("settings");
        assert_eq!(settings.command, "kbot");
    }

    #[test]
    fn test_discovers_hidden_yaml_settings() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".pr-comments.yml"),
            "pr-comments:\n  env: prod\n",
        )
        .expect("write");

        let settings = load_settings(tmp.path(), None).expect("settings");
        assert_eq!(settings.env, "prod");
    }

    #[test]
    fn test_explicit_invalid_config_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "max_comment_size = 'huge'\n").expect("write");

        assert!(load_settings(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "env=stage\n").expect("write");

        let err = load_settings(tmp.path(), Some(&path)).expect_err("unsupported");
        assert!(err.to_string().contains("Unsupported config extension"));
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("pr-comments.yaml"),
            "max_comment_size: [1, 2]\n",
        )
        .expect("write");

        let settings = load_settings(tmp.path(), None).expect("should not error on discovery");
        assert_eq!(settings, Settings::default());
    }
}
