//! Export configuration.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default output directory, matching the exporter's historical layout.
pub const DEFAULT_OUTPUT_DIR: &str = "notion_data";

/// Configuration for one export run.
///
/// Credentials and the target collection come from the caller (the CLI reads
/// them from flags or environment variables); the library never looks at the
/// process environment itself.
///
/// # Example
///
/// ```
/// use unnotion::ExportConfig;
///
/// let config = ExportConfig::new("secret_token", "a1b2c3")
///     .with_output_dir("./export");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Bearer token used to authenticate against the remote API.
    pub auth_token: String,

    /// Identifier of the collection (database) whose pages are exported.
    pub collection_id: String,

    /// Directory that receives the generated Markdown files.
    pub output_dir: PathBuf,
}

impl ExportConfig {
    /// Create a configuration with the default output directory.
    pub fn new(auth_token: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            collection_id: collection_id.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Check that the configuration can drive an export.
    pub fn validate(&self) -> Result<()> {
        if self.auth_token.trim().is_empty() {
            return Err(Error::InvalidConfig("auth token is empty".to_string()));
        }
        if self.collection_id.trim().is_empty() {
            return Err(Error::InvalidConfig("collection id is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ExportConfig::new("tok", "db");
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_with_output_dir() {
        let config = ExportConfig::new("tok", "db").with_output_dir("/tmp/out");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_config_rejects_blank_credentials() {
        assert!(ExportConfig::new("", "db").validate().is_err());
        assert!(ExportConfig::new("tok", "  ").validate().is_err());
    }
}
