//! Error type for the fallible edges of generation.
//!
//! Generation itself never fails: malformed schema input degrades the output.
//! Only reading the descriptor set, reading the config and writing artifacts do.

use std::path::PathBuf;

/// Errors surfaced by the loader, the config reader and artifact writing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The descriptor-set document is not valid JSON, or has the wrong shape.
    #[error("invalid descriptor set: {0}")]
    DescriptorSet(#[from] serde_json::Error),

    /// The options file is not valid TOML, or has unknown keys.
    #[error("invalid generator options: {0}")]
    Options(#[from] toml::de::Error),

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = Error::io(
            "out/greeter.d.ts",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "out/greeter.d.ts: denied");
    }

    #[test]
    fn test_json_error_converts() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("invalid descriptor set:"));
    }
}
