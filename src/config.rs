//! Configuration management for profilefinder
//!
//! All configuration is loaded from `./config/profilefinder.toml`.
//! No hardcoded defaults exist in source code - all defaults are in the config template.

use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::score::ScoreWeights;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/profilefinder.toml";

/// Default configuration file content - this is the ONLY place defaults exist
pub const DEFAULT_CONFIG: &str = include_str!("../config/profilefinder.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Invalid path in '{field}': {path} (expected a leading '/')")]
    InvalidPath { field: String, path: String },

    #[error("Invalid weight in '{field}': {value} (must be finite and non-negative)")]
    InvalidWeight { field: String, value: f64 },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub scoring: ScoreWeights,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the trade data site
    pub base_url: String,
    /// Path of the search endpoint; the company name goes in the `q` parameter
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Anchor href prefixes treated as profile-shaped links
    #[serde(default = "default_profile_prefixes")]
    pub profile_prefixes: Vec<String>,
    /// Maximum profile links collected from one results page
    #[serde(default = "default_max_search_links")]
    pub max_search_links: usize,
}

fn default_search_path() -> String {
    "/search".to_string()
}

fn default_profile_prefixes() -> Vec<String> {
    vec!["/company/".to_string(), "/supplier/".to_string()]
}

fn default_max_search_links() -> usize {
    12
}

/// Resolver behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Maximum candidates returned per company
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Short brand names that bypass the token-overlap pre-filter
    #[serde(default = "default_short_brand_allowlist")]
    pub short_brand_allowlist: Vec<String>,
}

fn default_max_candidates() -> usize {
    12
}

fn default_short_brand_allowlist() -> Vec<String> {
    ["vf", "lg", "3m", "bp", "ge"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
            short_brand_allowlist: default_short_brand_allowlist(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.user_agent.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "http.user_agent".to_string(),
            });
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "http.request_timeout_secs".to_string(),
            });
        }

        if !self.site.base_url.starts_with("https://") && !self.site.base_url.starts_with("http://")
        {
            return Err(ConfigError::InvalidUrl {
                field: "site.base_url".to_string(),
                url: self.site.base_url.clone(),
            });
        }
        if !self.site.search_path.starts_with('/') {
            return Err(ConfigError::InvalidPath {
                field: "site.search_path".to_string(),
                path: self.site.search_path.clone(),
            });
        }
        if self.site.profile_prefixes.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "site.profile_prefixes".to_string(),
            });
        }
        for (i, prefix) in self.site.profile_prefixes.iter().enumerate() {
            if !prefix.starts_with('/') {
                return Err(ConfigError::InvalidPath {
                    field: format!("site.profile_prefixes[{}]", i),
                    path: prefix.clone(),
                });
            }
        }
        if self.site.max_search_links == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "site.max_search_links".to_string(),
            });
        }

        let weights = [
            ("scoring.jaccard_weight", self.scoring.jaccard_weight),
            ("scoring.sequence_weight", self.scoring.sequence_weight),
            ("scoring.containment_bonus", self.scoring.containment_bonus),
            ("scoring.profile_path_bias", self.scoring.profile_path_bias),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.resolver.max_candidates == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "resolver.max_candidates".to_string(),
            });
        }

        Ok(())
    }

    /// Create default configuration file at the standard location
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = Path::new(CONFIG_PATH);

        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write default config
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;

        Ok(path.to_path_buf())
    }

    /// Check if stdin is a TTY (interactive terminal)
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Prompt user to create default config (only in interactive mode)
    pub fn prompt_create_config() -> Result<Option<PathBuf>, ConfigError> {
        if !Self::is_interactive() {
            return Ok(None);
        }

        print!("Configuration file not found. Create default config? [Y/n] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input.is_empty() || input == "y" || input == "yes" {
            let path = Self::create_default_config()?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}
