use super::types::{
    DEFAULT_HOST, DEFAULT_PORT, NumeracyConfig, RawNumeracyConfig, RawRulesConfig,
    RawServerConfig, RulesConfig, ServerConfig,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Rules directory looked up relative to the working directory
const LOCAL_RULES_DIR: &str = "rules";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<NumeracyConfig> {
        let mut raw = RawNumeracyConfig::default();

        // Layer 1: User config
        let user_path = Self::user_config_path();
        if user_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path (`$XDG_CONFIG_HOME/numeracy/config.toml`)
    pub fn user_config_path() -> PathBuf {
        numeracy_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with NUMERACY_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("NUMERACY_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".numeracy/config.toml")
        }
    }

    /// Rules directory used when no config layer names one
    pub fn default_rules_dir() -> PathBuf {
        let local = PathBuf::from(LOCAL_RULES_DIR);
        if local.is_dir() {
            local
        } else {
            numeracy_paths::rules_dir()
        }
    }

    fn read_raw(path: &Path) -> Result<RawNumeracyConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawNumeracyConfig, overlay: RawNumeracyConfig) -> RawNumeracyConfig {
        RawNumeracyConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            rules: RawRulesConfig {
                dir: overlay.rules.dir.or(base.rules.dir),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawNumeracyConfig) -> NumeracyConfig {
        NumeracyConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            rules: RulesConfig {
                dir: raw.rules.dir.unwrap_or_else(Self::default_rules_dir),
            },
        }
    }

    /// Load config from a specific path (for testing)
    #[cfg(test)]
    pub fn load_from_path(path: &Path) -> Result<NumeracyConfig> {
        let raw = if path.exists() {
            Self::read_raw(path)?
        } else {
            RawNumeracyConfig::default()
        };
        Ok(Self::finalize(raw))
    }
}
