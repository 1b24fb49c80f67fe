mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

use crate::fetch::{MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::listing::MAX_RECENTLY_ADDED_DAYS;

/// Environment variable that overrides `provider.api_key`.
pub const API_KEY_ENV: &str = "MARQUEE_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./marquee.toml",
        "./config.toml",
        "~/.config/marquee/config.toml",
        "/etc/marquee/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if let Some(provider) = config.provider.as_mut() {
            provider.api_key = key;
        }
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if let Some(provider) = &config.provider {
        if provider.url.trim().is_empty() {
            anyhow::bail!("Provider url cannot be empty");
        }
        reqwest::Url::parse(&provider.url)
            .with_context(|| format!("Provider url is invalid: {}", provider.url))?;

        if provider.api_key.trim().is_empty() {
            anyhow::bail!(
                "Provider '{}' has no api_key (set it in the file or via {})",
                provider.kind,
                API_KEY_ENV
            );
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&provider.timeout_secs) {
            anyhow::bail!(
                "Provider timeout_secs must be between {} and {}, got {}",
                MIN_TIMEOUT_SECS,
                MAX_TIMEOUT_SECS,
                provider.timeout_secs
            );
        }
    }

    if let Some(days) = config.on_demand.filters.recently_added_days {
        if days > MAX_RECENTLY_ADDED_DAYS {
            anyhow::bail!(
                "on_demand.recently_added_days must be at most {}, got {}",
                MAX_RECENTLY_ADDED_DAYS,
                days
            );
        }
    }

    if config.on_demand.count < 0 {
        tracing::warn!(
            "on_demand.count is negative ({}), it will be treated as 0",
            config.on_demand.count
        );
    }

    Ok(())
}
