//! Error types for the install wizard

use crate::config::ConfigError;
use thiserror::Error;

/// Result type alias for install wizard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the install wizard
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal is not interactive")]
    NotInteractive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_error_is_transparent() {
        let err: Error = ConfigError::Invalid {
            field: "bar_width",
            message: "must be greater than zero".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'bar_width': must be greater than zero"
        );

        let err: Error = ConfigError::ReadError {
            path: PathBuf::from("wizard.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert!(err.to_string().starts_with("Failed to read config file 'wizard.toml'"));
    }

    #[test]
    fn test_io_error_conversion() {
        fn open() -> Result<()> {
            let failed: std::io::Result<()> = Err(std::io::Error::other("no tty"));
            failed?;
            Ok(())
        }
        let err = open().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "IO error: no tty");
    }
}
