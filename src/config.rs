//! Analyzer configuration
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! window_capacity = 4096
//! chunk_size = 8192
//! ```

use crate::analyzer::DEFAULT_WINDOW_CAPACITY;
use crate::error::{Error, Result};
use crate::mp3::frame::HEADER_LEN;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Sliding window size in bytes
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
    /// Read size used when pulling from files and other blocking readers
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_capacity: default_window_capacity(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_window_capacity() -> usize {
    DEFAULT_WINDOW_CAPACITY
}

fn default_chunk_size() -> usize {
    8192
}

impl AnalyzerConfig {
    /// Read and validate a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_capacity < HEADER_LEN {
            return Err(Error::InvalidConfig(format!(
                "window_capacity must be at least {} bytes, got {}",
                HEADER_LEN, self.window_capacity
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.window_capacity, 4096);
        assert_eq!(config.chunk_size, 8192);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AnalyzerConfig::from_toml("").expect("empty config is valid");
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = AnalyzerConfig::from_toml("chunk_size = 1").expect("valid");
        assert_eq!(config.chunk_size, 1);
        assert_eq!(config.window_capacity, 4096);
    }

    #[test]
    fn test_rejects_tiny_window() {
        let err = AnalyzerConfig::from_toml("window_capacity = 3").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        let err = AnalyzerConfig::from_toml("chunk_size = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = AnalyzerConfig::from_toml("window = 10").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "window_capacity = 8192").expect("write config");

        let config = AnalyzerConfig::load(file.path()).expect("load config");
        assert_eq!(config.window_capacity, 8192);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnalyzerConfig::load("/nonexistent/mp3-frames.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
