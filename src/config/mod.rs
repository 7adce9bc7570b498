/// Configuration system for scorecard.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::ScorecardConfig::default()`]
/// 2. **User global config** — `~/.scorecard/config.toml`
/// 3. **Project local config** — `.scorecard.toml` in the current working directory
/// 4. **Environment variables** — `SCORECARD_*` overrides (highest precedence)
///
/// # Usage
///
/// ```rust,ignore
/// use scorecard::config;
///
/// let cfg = config::load();
/// let client = HttpClient::from_config(&cfg.api);
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::ScorecardConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved scorecard configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> ScorecardConfig {
    let mut config = ScorecardConfig::default();

    // Layer 2: user global config (~/.scorecard/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    // Layer 3: project local config (.scorecard.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. A broken config file falls back to the previous
/// layer instead of aborting the command.
///
/// Each file is deserialized with `serde(default)`, so a layer replaces the
/// previous one wholesale; keys a file leaves unset come back as defaults.
fn load_toml_file(path: Option<PathBuf>) -> Option<ScorecardConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.scorecard/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".scorecard").join("config.toml"))
}

/// Path to the project local config: `.scorecard.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".scorecard.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None if path == "~" => dirs::home_dir(),
        None => Some(Path::new(path).to_path_buf()),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `SCORECARD_API_URL` — prediction service base URL
/// - `SCORECARD_TIMEOUT_MS` — request timeout (`0` = none)
/// - `SCORECARD_WEB_ADDR` — bind address for `scorecard serve`
/// - `SCORECARD_LOG` — file logging (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut ScorecardConfig) {
    if let Ok(val) = std::env::var("SCORECARD_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("SCORECARD_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("SCORECARD_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("SCORECARD_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.scorecard/config.toml`.
///
/// Creates the `~/.scorecard/` directory if it doesn't exist. Returns an
/// error if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.scorecard/ directory")?;
    }

    fs::write(&path, ScorecardConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Reads the current global config (or defaults), updates the dotted key
/// (e.g. `api.base_url`), and writes the result back.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&ScorecardConfig::default())
            .context("failed to serialize default config")?
    };

    let output = apply_config_value(&content, key, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Update one dotted key inside TOML text and return the new text.
///
/// The result must still deserialize into [`ScorecardConfig`], so a value
/// of the wrong shape is rejected before anything is written.
fn apply_config_value(content: &str, key: &str, value: &str) -> Result<String> {
    let mut root: toml::Value =
        toml::from_str(content).context("failed to parse config as TOML value")?;

    // Keys missing from a hand-edited file are resolved against the schema
    let defaults: toml::Value = toml::Value::try_from(ScorecardConfig::default())
        .context("failed to serialize default config")?;
    ensure_key_exists(&defaults, key)?;
    fill_missing_sections(&mut root, &defaults, key);

    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    toml::from_str::<ScorecardConfig>(&output)
        .with_context(|| format!("invalid value for '{key}': '{value}'"))?;

    Ok(output)
}

/// Fail unless `key` names a leaf in the schema.
fn ensure_key_exists(defaults: &toml::Value, key: &str) -> Result<()> {
    let mut current = defaults;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("unknown config key '{key}'"))?;
    }
    if current.is_table() {
        anyhow::bail!("'{key}' is a section, not a key");
    }
    Ok(())
}

/// Copy the default section and leaf for `key` into `root` where absent.
fn fill_missing_sections(root: &mut toml::Value, defaults: &toml::Value, key: &str) {
    let mut current = root;
    let mut default = defaults;
    for part in key.split('.') {
        let Some(next_default) = default.get(part) else {
            return;
        };
        let Some(table) = current.as_table_mut() else {
            return;
        };
        let entry = table
            .entry(part.to_string())
            .or_insert_with(|| next_default.clone());
        current = entry;
        default = next_default;
    }
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.is_empty() {
        anyhow::bail!("empty config key");
    }

    // Navigate to the parent table
    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    // The existing value decides how the raw string is parsed
    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn expand_home_handles_tilde() {
        let home = dirs::home_dir();
        assert_eq!(expand_home("~"), home);
        assert_eq!(
            expand_home("~/.scorecard/x.jsonl"),
            home.map(|h| h.join(".scorecard/x.jsonl"))
        );
        assert_eq!(
            expand_home("/var/log/scorecard.jsonl"),
            Some(PathBuf::from("/var/log/scorecard.jsonl"))
        );
    }

    #[test]
    fn apply_config_value_updates_string() {
        let toml_str = r#"
[api]
base_url = "http://localhost:5000"
"#;
        let out = apply_config_value(toml_str, "api.base_url", "http://10.1.1.1:5000").unwrap();
        let config: ScorecardConfig = toml::from_str(&out).unwrap();
        assert_eq!(config.api.base_url, "http://10.1.1.1:5000");
    }

    #[test]
    fn apply_config_value_updates_integer() {
        let toml_str = r#"
[api]
timeout_ms = 0
"#;
        let out = apply_config_value(toml_str, "api.timeout_ms", "1500").unwrap();
        let config: ScorecardConfig = toml::from_str(&out).unwrap();
        assert_eq!(config.api.timeout_ms, 1500);
    }

    #[test]
    fn apply_config_value_updates_bool() {
        let toml_str = r#"
[logging]
enabled = true
"#;
        let out = apply_config_value(toml_str, "logging.enabled", "off").unwrap();
        let config: ScorecardConfig = toml::from_str(&out).unwrap();
        assert!(!config.logging.enabled);
    }

    #[test]
    fn apply_config_value_fills_missing_section() {
        let out = apply_config_value("", "web.addr", "0.0.0.0:9999").unwrap();
        let config: ScorecardConfig = toml::from_str(&out).unwrap();
        assert_eq!(config.web.addr, "0.0.0.0:9999");
        assert_eq!(config.api.base_url, schema::DEFAULT_BASE_URL);
    }

    #[test]
    fn apply_config_value_rejects_unknown_key() {
        assert!(apply_config_value("", "api.retries", "3").is_err());
        assert!(apply_config_value("", "nonexistent.key", "x").is_err());
    }

    #[test]
    fn apply_config_value_rejects_section() {
        assert!(apply_config_value("", "api", "x").is_err());
    }

    #[test]
    fn apply_config_value_rejects_bad_integer() {
        assert!(apply_config_value("", "api.timeout_ms", "soon").is_err());
    }

    #[test]
    fn show_effective_config_returns_toml() {
        let toml_str = show_effective_config().unwrap();
        let _: ScorecardConfig = toml::from_str(&toml_str).unwrap();
    }
}
