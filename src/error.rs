//! Error types for taxonkit-rs

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for TaxonKit operations
#[derive(Error, Debug)]
pub enum TaxonKitError {
    /// taxonkit exited with a nonzero status; carries its stderr verbatim
    #[error("taxonkit CLI error: {0}")]
    Cli(String),

    /// The taxonomy data directory has no usable nodes.dmp
    #[error("NCBI taxonomy dump not found: {}", .0.display())]
    DumpNotFound(PathBuf),

    #[error("taxonkit binary not found: {0}")]
    BinaryNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),
}

/// Result type alias for TaxonKit operations
pub type TaxonKitResult<T> = Result<T, TaxonKitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let cli = TaxonKitError::Cli("[ERRO] taxid 0 not found\n".to_string());
        assert_eq!(format!("{}", cli), "taxonkit CLI error: [ERRO] taxid 0 not found\n");

        let dump = TaxonKitError::DumpNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(format!("{}", dump), "NCBI taxonomy dump not found: /no/such/dir");

        let parse = TaxonKitError::Parse("bad taxid".to_string());
        assert_eq!(format!("{}", parse), "Parsing error: bad taxid");

        let config = TaxonKitError::Config("missing field".to_string());
        assert_eq!(format!("{}", config), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: TaxonKitError = io_err.into();

        match err {
            TaxonKitError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_result: Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("{invalid json}");

        let err: TaxonKitError = parse_result.unwrap_err().into();
        assert!(matches!(err, TaxonKitError::Json(_)));
    }
}
