//! Configuration management module
//!
//! YAML file at `--config` (or the user config dir), then `SOUL_PAGE_*` environment
//! overrides on top.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use soulbrowser_snapshot_paging::PagingPolicyView;
use tokio::fs;
use tracing::{info, warn};

pub const ENV_MAX_TOKENS: &str = "SOUL_PAGE_MAX_TOKENS";
pub const ENV_CHARS_PER_TOKEN: &str = "SOUL_PAGE_CHARS_PER_TOKEN";
pub const ENV_DIGEST: &str = "SOUL_PAGE_DIGEST";

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageStateConfig {
    pub paging: PagingPolicyView,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("soulbrowser").join("pagestate.yaml"))
}

/// Loads the configuration file, falling back to defaults when it does not exist.
pub async fn load_config(config_path: Option<&Path>) -> Result<PageStateConfig> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let mut config = match path {
        Some(path) if path.exists() => {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: PageStateConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        Some(path) => {
            warn!("Config file not found, using defaults: {}", path.display());
            PageStateConfig::default()
        }
        None => {
            warn!("No config directory available, using defaults");
            PageStateConfig::default()
        }
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn apply_env_overrides(config: &mut PageStateConfig) {
    if let Some(max_tokens) = env_value::<i64>(ENV_MAX_TOKENS) {
        config.paging.default_max_tokens = max_tokens;
        info!("Default maxTokens overridden to {} ({})", max_tokens, ENV_MAX_TOKENS);
    }
    if let Some(ratio) = env_value::<usize>(ENV_CHARS_PER_TOKEN) {
        config.paging.chars_per_token = ratio;
    }
    if let Some(show_digest) = env_value::<bool>(ENV_DIGEST) {
        config.paging.show_digest = show_digest;
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        env::remove_var(ENV_MAX_TOKENS);
        env::remove_var(ENV_CHARS_PER_TOKEN);
        env::remove_var(ENV_DIGEST);
    }

    #[tokio::test]
    #[serial]
    async fn missing_file_yields_defaults() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path().join("absent.yaml").as_path()))
            .await
            .unwrap();
        assert_eq!(config, PageStateConfig::default());
        assert_eq!(config.paging.default_max_tokens, 24_000);
    }

    #[tokio::test]
    #[serial]
    async fn yaml_file_is_merged_over_defaults() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "paging:\n  default_max_tokens: 5000\n  show_digest: false"
        )
        .unwrap();

        let config = load_config(Some(file.path())).await.unwrap();
        assert_eq!(config.paging.default_max_tokens, 5000);
        assert!(!config.paging.show_digest);
        assert!(config.paging.enabled);
        assert_eq!(config.paging.chars_per_token, 4);
    }

    #[tokio::test]
    #[serial]
    async fn malformed_yaml_is_an_error() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "paging: [not, a, map]").unwrap();
        let err = load_config(Some(file.path())).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    #[serial]
    fn env_overrides_apply_and_bad_values_are_ignored() {
        clear_env();
        env::set_var(ENV_MAX_TOKENS, "1200");
        env::set_var(ENV_CHARS_PER_TOKEN, "three");
        env::set_var(ENV_DIGEST, "false");

        let mut config = PageStateConfig::default();
        apply_env_overrides(&mut config);
        assert_eq!(config.paging.default_max_tokens, 1200);
        assert_eq!(config.paging.chars_per_token, 4);
        assert!(!config.paging.show_digest);
        clear_env();
    }
}
