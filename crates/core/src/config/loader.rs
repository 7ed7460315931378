//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(String::from).or_else(find_config_file);

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };
        schema.ensure_default_build_types();

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        let mut schema = ConfigSchema::default();
        schema.ensure_default_build_types();
        Self { schema, path: None }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".apkforge.toml",
        "apkforge.toml",
        ".config/apkforge.toml",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    if !Path::new(path).exists() {
        return Err(Error::config_not_found(path));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse config file {}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.sdk.compile, 34);
        assert!(config.schema.build_types.contains_key("release"));
    }

    #[test]
    fn test_config_load_missing_file() {
        // No path and no config file in cwd: defaults, not an error
        let config = Config::load(None);
        assert!(config.is_ok());
    }

    #[test]
    fn test_config_load_explicit_missing_path() {
        let result = Config::load(Some("/nonexistent/apkforge.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[sdk]\ncompile = 35\nmin = 26\ntarget = 35\n\n[signing.upload]\nstore_file = \"ks.jks\"\nstore_password = \"pw\"\nkey_password = \"pw\""
        )
        .unwrap();

        let config = Config::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.schema.sdk.compile, 35);
        assert!(config.schema.signing.contains_key("upload"));
        // Defaults are injected even when the file declares none
        assert!(config.schema.build_types.contains_key("debug"));
    }
}
