use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use toml::Value;

use crate::cli::enhanced_parser::parse_comma_separated;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "GITFAME_CONFIG";

/// Section holding the attribution options
pub const FAME_SECTION: &str = "fame";

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load the first configuration file found by discovery, or nothing
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.is_file() {
                return Self::load_from_file(path);
            }
        }

        debug!("No configuration file found, using built-in defaults");
        Ok(Self::from_config(Configuration::new()))
    }

    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Get value from configuration with section fallback
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        // Priority: selected_section -> specified section -> base
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get("base").and_then(|s| s.get(key))
    }

    /// Select configuration section for --config-name
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(
                crate::logging::parse_log_level(value)
                    .with_context(|| format!("Invalid log level for {}.{}", section, key))?,
            )),
            None => Ok(None),
        }
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// List value; TOML arrays and comma-separated strings are both accepted
    pub fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.get_value(section, key)
            .map(|value| parse_comma_separated(vec![value.clone()]))
    }
}

/// Configuration files in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("gitfame").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".gitfame.toml"));
    }

    paths.push(PathBuf::from("./.gitfame.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML content to string-based configuration
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let toml_value: Value = content.parse().context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    if let Value::Table(table) = toml_value {
        flatten_toml_table(&table, String::new(), &mut config);
    }

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Flatten nested tables into dotted section names
fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    for (key, value) in table {
        let section_name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Table(subtable) if subtable.values().any(|v| matches!(v, Value::Table(_))) => {
                flatten_toml_table(subtable, section_name, config);
            }
            Value::Table(subtable) => {
                let section_map = subtable
                    .iter()
                    .map(|(subkey, subvalue)| (subkey.clone(), toml_value_to_string(subvalue)))
                    .collect();
                config.insert(section_name, section_map);
            }
            _ => {
                // top-level scalar outside any section
                config
                    .entry("base".to_string())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(toml_value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Datetime(d) => d.to_string(),
        Value::Table(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[base]
console-level = "warn"
log-format = "json"

[fame]
order-by = "commits"
use-committer = true
languages = ["Go", "Rust"]
exclude = "vendor/*, third_party/*"

[ci]
format = "json-lines"
"#;

    #[test]
    fn test_toml_value_to_string_conversion() {
        assert_eq!(toml_value_to_string(&Value::String("lines".to_string())), "lines");
        assert_eq!(toml_value_to_string(&Value::Integer(42)), "42");
        assert_eq!(toml_value_to_string(&Value::Boolean(false)), "false");
        let array = Value::Array(vec![Value::String("*.go".to_string()), Value::String("*.rs".to_string())]);
        assert_eq!(toml_value_to_string(&array), "*.go,*.rs");
    }

    #[test]
    fn test_parse_toml_config() {
        let config = parse_toml_config(SAMPLE).unwrap();

        assert_eq!(config["base"]["console-level"], "warn");
        assert_eq!(config["fame"]["order-by"], "commits");
        assert_eq!(config["fame"]["use-committer"], "true");
        assert_eq!(config["ci"]["format"], "json-lines");
    }

    #[test]
    fn test_top_level_keys_land_in_base() {
        let config = parse_toml_config("log-format = \"json\"\n[fame]\nformat = \"csv\"\n").unwrap();
        assert_eq!(config["base"]["log-format"], "json");
        assert_eq!(config["fame"]["format"], "csv");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(parse_toml_config("[fame\norder-by = ").is_err());
    }

    #[test]
    fn test_section_fallback_and_selection() {
        let mut manager = ConfigManager::from_config(parse_toml_config(SAMPLE).unwrap());

        assert_eq!(manager.get_value(FAME_SECTION, "order-by").unwrap(), "commits");
        assert_eq!(manager.get_value(FAME_SECTION, "log-format").unwrap(), "json");
        assert!(manager.get_value(FAME_SECTION, "format").is_none());

        manager.select_section("ci".to_string());
        assert_eq!(manager.get_value(FAME_SECTION, "format").unwrap(), "json-lines");
        assert_eq!(manager.get_value(FAME_SECTION, "order-by").unwrap(), "commits");
    }

    #[test]
    fn test_list_values() {
        let manager = ConfigManager::from_config(parse_toml_config(SAMPLE).unwrap());

        assert_eq!(manager.get_list(FAME_SECTION, "languages").unwrap(), vec!["Go", "Rust"]);
        assert_eq!(
            manager.get_list(FAME_SECTION, "exclude").unwrap(),
            vec!["vendor/*", "third_party/*"]
        );
        assert!(manager.get_list(FAME_SECTION, "restrict-to").is_none());
    }

    #[test]
    fn test_type_conversion() {
        let mut section = HashMap::new();
        section.insert("use-committer".to_string(), "TRUE".to_string());
        section.insert("bad-bool".to_string(), "maybe".to_string());
        section.insert("console-level".to_string(), "debug".to_string());
        section.insert("bad-level".to_string(), "chatty".to_string());
        section.insert("languages-file".to_string(), "/etc/langs.json".to_string());
        let mut config = Configuration::new();
        config.insert("fame".to_string(), section);
        let manager = ConfigManager::from_config(config);

        assert_eq!(manager.get_bool("fame", "use-committer").unwrap(), Some(true));
        assert!(manager.get_bool("fame", "bad-bool").is_err());
        assert!(manager.get_bool("fame", "missing").unwrap().is_none());
        assert_eq!(manager.get_log_level("fame", "console-level").unwrap(), Some(log::LevelFilter::Debug));
        assert!(manager.get_log_level("fame", "bad-level").is_err());
        assert_eq!(manager.get_path("fame", "languages-file").unwrap(), PathBuf::from("/etc/langs.json"));
    }

    #[test]
    fn test_config_file_loading() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, SAMPLE).unwrap();

        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        assert_eq!(manager.get_value("base", "console-level").unwrap(), "warn");
        assert_eq!(manager.config_file_path().unwrap(), temp_file.path());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(ConfigManager::load_from_file(PathBuf::from("/nonexistent/gitfame.toml")).is_err());
    }

    #[test]
    fn test_discovery_ends_with_project_local_file() {
        let paths = discover_config_files();
        assert_eq!(paths.last().unwrap(), &PathBuf::from("./.gitfame.toml"));
    }
}
