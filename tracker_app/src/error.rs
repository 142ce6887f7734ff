//! Error types for the tracking application

use roitrack::TrackError;
use thiserror::Error;

/// Result type alias for the tracking application
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that can occur while running a tracking session
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Video source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Tracking(#[from] TrackError),

    #[error("Vision backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::BackendError(msg.into())
    }

    /// Process exit status for this error
    ///
    /// Usage mistakes (bad configuration, unknown algorithm) exit with 2,
    /// everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ConfigError(_)
            | AppError::SerializationError(_)
            | AppError::Tracking(TrackError::UnknownAlgorithm(_)) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::unavailable("camera 0").exit_code(), 1);
        assert_eq!(AppError::backend("imshow failed").exit_code(), 1);
        assert_eq!(AppError::config("wait_ms must be positive").exit_code(), 2);
        assert_eq!(
            AppError::from(TrackError::UnknownAlgorithm("FOO".into())).exit_code(),
            2
        );
        assert_eq!(AppError::from(TrackError::NoRegions).exit_code(), 1);
    }

    #[test]
    fn test_unknown_algorithm_message() {
        let err = AppError::from(TrackError::UnknownAlgorithm("FOO".into()));
        assert_eq!(err.to_string(), "Invalid tracking algorithm name: FOO");
    }
}
