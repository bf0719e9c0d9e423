//! Error types for the notesite core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors from configuration loading and validation.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A configuration file exists but is not valid TOML.
    #[error("malformed configuration in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Validation error for a configuration value.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid(message.into())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = CoreError::invalid("site.title cannot be empty");
        assert!(err.to_string().starts_with("invalid configuration"));
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_config_not_found_names_path() {
        let err = CoreError::ConfigNotFound {
            path: Path::new("missing/config.toml").to_path_buf(),
        };
        assert!(err.to_string().contains("missing/config.toml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
