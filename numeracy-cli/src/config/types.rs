use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawNumeracyConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub rules: RawRulesConfig,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    /// Host address for the numeracy server
    pub host: Option<String>,

    /// Port for the numeracy server
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawRulesConfig {
    /// Directory holding task rule files
    pub dir: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumeracyConfig {
    pub server: ServerConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RulesConfig {
    pub dir: PathBuf,
}

/// Default host for the numeracy server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for the numeracy server
pub const DEFAULT_PORT: u16 = 7450;
