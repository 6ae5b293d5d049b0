mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{Config, SessionConfig, StoreConfig};

use anyhow::{Context, Result};
use chrono::Duration;
use std::fs;
use std::path::PathBuf;

use crate::achievements::AchievementSchema;
use crate::session::DEFAULT_TTL_SECS;

/// Environment variable that overrides `store.api_key` from the config file
pub const ENV_API_KEY_VAR: &str = "FACDASH_API_KEY";

/// Get the config directory path (~/.config/facdash/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("facdash")
}

/// Get the default config file path (~/.config/facdash/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory at {}",
                config_dir.display()
            )
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/facdash/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `facdash init` to create one.",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Resolve the API key: environment variable first, then config file.
pub fn effective_api_key(config: &Config) -> Option<String> {
    if let Ok(val) = std::env::var(ENV_API_KEY_VAR) {
        let trimmed = val.trim().to_string();
        if !trimmed.is_empty() {
            return Some(trimmed);
        }
    }
    config.store.api_key.clone()
}

/// Build the effective achievement schema: the config override when present,
/// otherwise the default set.
pub fn effective_schema(config: &Config) -> AchievementSchema {
    match &config.achievements {
        Some(fields) => AchievementSchema::new(fields.clone()),
        None => AchievementSchema::default(),
    }
}

/// Parse the session TTL (humantime format), defaulting to 7 days.
pub fn session_ttl(config: &Config) -> Result<Duration> {
    let ttl_str = config
        .session
        .as_ref()
        .and_then(|s| s.ttl.as_deref());

    let std_duration = match ttl_str {
        Some(s) => humantime::parse_duration(s)
            .with_context(|| format!("session.ttl: invalid duration '{}'", s))?,
        None => std::time::Duration::from_secs(DEFAULT_TTL_SECS),
    };

    Duration::from_std(std_duration).context("session.ttl: duration out of range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_config(yaml: &str) -> Config {
        serde_saphyr::from_str(yaml).unwrap()
    }

    #[test]
    fn test_minimal_config_parse() {
        let config = parse_config(
            r#"
store:
  url: "https://example.supabase.co"
  api_key: "anon-key"
"#,
        );
        assert_eq!(
            config.store.url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert!(config.session.is_none());
        assert!(config.achievements.is_none());
    }

    #[test]
    fn test_full_config_parse() {
        let config = parse_config(
            r#"
store:
  data_file: "/tmp/faculty.json"
session:
  ttl: "12h"
achievements:
  - key: journalpublications
    label: Journal Publications
    short_label: Journals
  - key: patents
    label: Patents
    short_label: Patents
"#,
        );
        assert!(config.store.data_file.is_some());
        assert_eq!(
            config.session.as_ref().unwrap().ttl.as_deref(),
            Some("12h")
        );
        assert_eq!(config.achievements.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_session_ttl_default() {
        let config = parse_config("store:\n  url: \"https://example.supabase.co\"\n");
        assert_eq!(session_ttl(&config).unwrap(), Duration::days(7));
    }

    #[test]
    fn test_session_ttl_parsed() {
        let config = parse_config(
            "store:\n  url: \"https://example.supabase.co\"\nsession:\n  ttl: \"12h\"\n",
        );
        assert_eq!(session_ttl(&config).unwrap(), Duration::hours(12));
    }

    #[test]
    fn test_session_ttl_invalid() {
        let config = parse_config(
            "store:\n  url: \"https://example.supabase.co\"\nsession:\n  ttl: \"soon\"\n",
        );
        assert!(session_ttl(&config).is_err());
    }

    #[test]
    fn test_effective_schema_default_and_override() {
        let default_config = parse_config("store:\n  url: \"https://example.supabase.co\"\n");
        assert_eq!(effective_schema(&default_config).len(), 14);

        let override_config = parse_config(
            r#"
store:
  url: "https://example.supabase.co"
achievements:
  - key: patents
    label: Patents
    short_label: Patents
"#,
        );
        let schema = effective_schema(&override_config);
        assert_eq!(schema.len(), 1);
        assert!(schema.field("patents").is_some());
    }
}
