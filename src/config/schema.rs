/// Configuration schema and defaults for scorecard.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[api]`, `[web]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

/// Default prediction service base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default bind address of the local web host.
pub const DEFAULT_WEB_ADDR: &str = "127.0.0.1:8088";

/// Default client log location. `~` is expanded to the home directory.
pub const DEFAULT_LOG_PATH: &str = "~/.scorecard/client-log.jsonl";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level scorecard configuration.
///
/// Maps directly to the `~/.scorecard/config.toml` and `.scorecard.toml`
/// file schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
    pub api: ApiConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Prediction service connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the prediction service, without a trailing path.
    pub base_url: String,
    /// Request timeout in milliseconds. `0` waits for the service
    /// indefinitely.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Local web host settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address the form page is served on.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_WEB_ADDR.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Client log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether console lines are appended to the log file.
    pub enabled: bool,
    /// Path to the log file. `~` is expanded to the home directory.
    pub path: String,
    /// Echo console lines to stderr.
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_LOG_PATH.to_string(),
            console: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl ScorecardConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `scorecard config init` to create a starting config file with
    /// all settings documented.
    pub fn default_toml() -> String {
        r#"# scorecard configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (SCORECARD_*)
#   2. Project config (.scorecard.toml in current directory)
#   3. User global config (~/.scorecard/config.toml)
#   4. Built-in defaults

[api]
base_url = "http://localhost:5000"    # Prediction service
timeout_ms = 0                        # 0 = wait indefinitely

[web]
addr = "127.0.0.1:8088"               # scorecard serve

[logging]
enabled = true
path = "~/.scorecard/client-log.jsonl"
console = true                        # Echo console lines to stderr
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
