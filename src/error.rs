use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for scenemark operations.
#[derive(Debug, Error)]
pub enum ScenemarkError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Cannot combine scenes with different dimensions: {left_width}x{left_height} vs {right_width}x{right_height}"
    )]
    DimensionMismatch {
        left_width: i32,
        left_height: i32,
        right_width: i32,
        right_height: i32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene JSON from {path}: {source}")]
    SceneJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write scene JSON to {path}: {source}")]
    SceneJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse scene YAML from {path}: {source}")]
    SceneYamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write scene YAML to {path}: {source}")]
    SceneYamlWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl ScenemarkError {
    /// Builds the error returned when a transform receives non-positive image dimensions.
    pub(crate) fn invalid_dimensions(image_width: i32, image_height: i32) -> Self {
        ScenemarkError::InvalidArgument(format!(
            "image dimensions must be positive, got {}x{}",
            image_width, image_height
        ))
    }
}
