// Mon Jan 19 2026 - Alex

use crate::render::LabelPolicy;
use crate::resolve::{PathFilter, ResolveError};
use crate::structure::{TypeSize, TypeTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "STRUCT_VISUALIZER_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub type_table: TypeTable,
    #[serde(alias = "gui")]
    pub display: DisplayConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(alias = "byte_width_px")]
    pub byte_width: f64,
    pub pack_value: Option<usize>,
    pub label_policy: LabelPolicy,
    pub tail_padding: bool,
    pub use_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub exclude_paths: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            byte_width: 80.0,
            pack_value: None,
            label_policy: LabelPolicy::Adaptive,
            tail_padding: true,
            use_color: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            type_table: TypeTable::default(),
            display: DisplayConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config. Keys that are missing keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!(
            "Loaded config from {} with {} types",
            path.as_ref().display(),
            config.type_table.len()
        );
        Ok(config)
    }

    /// Loads the file named by `STRUCT_VISUALIZER_CONFIG`, or the defaults when unset or absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if Path::new(&path).exists() => Self::load(path),
            Some(path) => {
                log::info!("Config {:?} does not exist, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn with_type(mut self, name: &str, size: TypeSize) -> Self {
        self.type_table.insert(name, size);
        self
    }

    pub fn with_pointer(mut self, pointer: TypeSize) -> Self {
        self.type_table = self.type_table.with_pointer(pointer);
        self
    }

    pub fn with_byte_width(mut self, byte_width: f64) -> Self {
        self.display.byte_width = byte_width;
        self
    }

    pub fn with_label_policy(mut self, policy: LabelPolicy) -> Self {
        self.display.label_policy = policy;
        self
    }

    pub fn with_exclude_paths(mut self, patterns: Vec<String>) -> Self {
        self.resolver.exclude_paths = patterns;
        self
    }

    pub fn path_filter(&self) -> Result<PathFilter, ResolveError> {
        PathFilter::from_patterns(&self.resolver.exclude_paths)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.display.byte_width.is_finite() && self.display.byte_width > 0.0) {
            return Err(ConfigError::Invalid("byte_width must be greater than 0".to_string()));
        }
        if self.display.pack_value == Some(0) {
            return Err(ConfigError::Invalid("pack_value must be greater than 0".to_string()));
        }
        let pointer = self.type_table.pointer();
        if pointer.size == 0 || pointer.align == 0 {
            return Err(ConfigError::Invalid("pointer size and align must be greater than 0".to_string()));
        }
        if let Some((name, _)) = self.type_table.types.iter().find(|(_, size)| size.align == 0) {
            return Err(ConfigError::Invalid(format!("type {} has zero alignment", name)));
        }
        if let Err(e) = self.path_filter() {
            return Err(ConfigError::Invalid(e.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.display.byte_width, 80.0);
        assert_eq!(config.type_table.get("int"), Some(TypeSize::new(4, 4)));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "types": {{"Widget": {{"size": 12, "align": 4}}}},
                "pointer": {{"size": 8, "align": 8}},
                "gui": {{"byte_width_px": 40}},
                "resolver": {{"exclude_paths": ["**/backup/**"]}}
            }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.type_table.get("Widget"), Some(TypeSize::new(12, 4)));
        assert!(config.type_table.get("int").is_none());
        assert_eq!(config.type_table.pointer(), TypeSize::new(8, 8));
        assert_eq!(config.display.byte_width, 40.0);
        assert_eq!(config.display.label_policy, LabelPolicy::Adaptive);
        assert_eq!(config.path_filter().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::new().with_byte_width(0.0).validate().is_err());
        assert!(Config::new().with_pointer(TypeSize::new(8, 0)).validate().is_err());
        assert!(Config::new().with_type("Odd", TypeSize::new(3, 0)).validate().is_err());
        assert!(Config::new().with_exclude_paths(vec!["**/ok/**".to_string()]).validate().is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Json(_))));
    }
}
