use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::achievements::AchievementField;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub session: Option<SessionConfig>,
    /// Optional override of the achievement schema (subset/reorder of the
    /// canonical keys). Absent means the full default schema.
    #[serde(default)]
    pub achievements: Option<Vec<AchievementField>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Record store root URL, e.g. "https://myproject.supabase.co"
    #[serde(default)]
    pub url: Option<String>,
    /// API key for the record store. The FACDASH_API_KEY environment
    /// variable takes precedence when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// JSON file with a faculty record array; used instead of `url` when set.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Rolling session window in humantime format (e.g. "7d", "12h")
    #[serde(default)]
    pub ttl: Option<String>,
}
