use std::collections::HashMap;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{connection::tester::DEFAULT_TIMEOUT_SECS, listing::link::LinkConfig};

pub const DEFAULT_CONFIG_PATH: &str = "content-mapping.yaml";
pub const ENDPOINT_ENV: &str = "CONTENT_MAPPING_ENDPOINT";
pub const API_KEY_ENV: &str = "CONTENT_MAPPING_API_KEY";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "content-mapping",
    version,
    about = "Content-type field mapping tools for CMS integrations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: content-mapping.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten a mapping definition into a flat field list
    Flatten {
        /// Mapping definition file (YAML, or JSON by extension)
        #[arg(long)]
        mapping: String,

        /// Expand nested components at every depth
        #[arg(long, default_value_t = false)]
        deep: bool,

        /// Output format: console, json
        #[arg(long, default_value = "console")]
        format: String,
    },

    /// Check whether the remote API connection succeeds
    TestConnection {
        /// API endpoint to probe
        #[arg(long)]
        endpoint: Option<String>,

        /// Bearer token sent with the probe
        #[arg(long)]
        api_key: Option<String>,

        /// Request timeout in seconds (at least 1)
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Output format: console, json
        #[arg(long, default_value = "console")]
        format: String,
    },

    /// Render the entity link column for listing rows
    RenderLinks {
        /// Rows file: list of objects (YAML, or JSON by extension)
        #[arg(long)]
        rows: String,

        /// Emit absolute links
        #[arg(long, default_value_t = false)]
        absolute: bool,

        /// Base URL for absolute links
        #[arg(long)]
        base_url: Option<String>,

        /// Output format: text, html, json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `content-mapping.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default)]
    pub links: LinkConfig,

    /// Template -> localized template
    #[serde(default)]
    pub translations: HashMap<String, String>,

    /// JSONL audit trail; disabled when unset
    #[serde(default)]
    pub audit_log: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub endpoint: Option<String>,

    pub api_key: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_timeout() -> u64 { DEFAULT_TIMEOUT_SECS }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = config_path, error = %e, "ignoring malformed config file");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (CLI > config > env > defaults)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnection {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

pub fn resolve_connection(
    config: &ConnectionConfig,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout_secs: Option<u64>,
) -> ResolvedConnection {
    let endpoint = endpoint
        .map(str::to_string)
        .or_else(|| config.endpoint.clone())
        .or_else(|| std::env::var(ENDPOINT_ENV).ok())
        .unwrap_or_default();
    let api_key = api_key
        .map(str::to_string)
        .or_else(|| config.api_key.clone())
        .or_else(|| std::env::var(API_KEY_ENV).ok());

    ResolvedConnection {
        endpoint,
        api_key,
        timeout_secs: timeout_secs.unwrap_or(config.timeout_secs),
    }
}

/// Apply CLI overrides to the configured link settings.
pub fn resolve_links(config: &LinkConfig, absolute: bool, base_url: Option<&str>) -> LinkConfig {
    let mut links = config.clone();
    if absolute {
        links.absolute = true;
    }
    if let Some(url) = base_url {
        links.base_url = url.to_string();
    }
    links
}
