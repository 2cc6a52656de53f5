//! Error types for the wall_colors library

use thiserror::Error;

/// Result type alias for wall_colors operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color analysis, replacement and masking
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Pixel buffer length does not match the declared dimensions
    #[error("Buffer size mismatch: {width}x{height} RGB image needs {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Color string is not a 6-digit hex RGB value
    #[error("Invalid hex color: {value:?}")]
    InvalidHexColor { value: String },

    /// Clustering produced no clusters (e.g. empty image)
    #[error("Color clustering produced no clusters")]
    EmptyClusterSet,

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Image file could not be loaded, decoded or written
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An external collaborator (vision seed or inpainting service) failed
    #[error("{collaborator} failed: {message}")]
    CollaboratorError {
        collaborator: String,
        message: String,
    },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid hex color error
    pub fn invalid_hex(value: impl Into<String>) -> Self {
        Self::InvalidHexColor {
            value: value.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error indicates a condition the caller can substitute a
    /// fallback for (constant palette, local replacement engine)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyClusterSet | AnalysisError::CollaboratorError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_mismatch_message() {
        let err = AnalysisError::BufferSizeMismatch {
            width: 2,
            height: 2,
            expected: 12,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("2x2"));
        assert!(msg.contains("12"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(AnalysisError::EmptyClusterSet.is_recoverable());
        assert!(AnalysisError::CollaboratorError {
            collaborator: "inpainting".into(),
            message: "timeout".into(),
        }
        .is_recoverable());
        assert!(!AnalysisError::invalid_hex("red").is_recoverable());
    }

    #[test]
    fn test_image_load_keeps_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AnalysisError::image_load("room.jpg", io);
        assert!(err.source().is_some());
    }
}
