use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("File discovery error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Invalid DAT filename: {0}")]
    InvalidFilename(String),

    #[error("{} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("Output directory already exists: {}", .0.display())]
    OutputAlreadyExists(PathBuf),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ProcessingError {
    /// Errors the converter logs and steps over instead of aborting the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProcessingError::MissingFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_file_is_recoverable() {
        assert!(ProcessingError::MissingFile(PathBuf::from("MSPR2001.dat")).is_recoverable());
        assert!(!ProcessingError::InvalidFilename("foo.dat".to_string()).is_recoverable());
        assert!(!ProcessingError::OutputAlreadyExists(PathBuf::from("out")).is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = ProcessingError::OutputAlreadyExists(PathBuf::from("out"));
        assert_eq!(err.to_string(), "Output directory already exists: out");

        let err = ProcessingError::MissingFile(PathBuf::from("dat/MSSD2001.dat"));
        assert_eq!(err.to_string(), "dat/MSSD2001.dat does not exist");
    }
}
