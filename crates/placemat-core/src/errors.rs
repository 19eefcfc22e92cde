//! Error types for the placemat engine.

use thiserror::Error;

/// Top-level error type for the placemat engine.
#[derive(Debug, Error)]
pub enum PlacematError {
    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors while reading a placemat description or resolving its theme.
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("Malformed placemat description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Style '{style}' references unknown color '{name}'")]
    UnknownColor { style: String, name: String },

    #[error("Invalid color format: {value}")]
    InvalidColor { value: String },

    #[error("Invalid style '{style}': {reason}")]
    InvalidStyle { style: String, reason: String },

    #[error("Unknown style: {name}")]
    UnknownStyle { name: String },
}

/// Errors during layout computation.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Invalid layout argument: {reason}")]
    InvalidArgument { reason: String },
}

impl LayoutError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        LayoutError::InvalidArgument { reason: reason.into() }
    }

    /// Prefix the reason with the path of the node that failed.
    pub fn at(self, path: &str) -> Self {
        match self {
            LayoutError::InvalidArgument { reason } => LayoutError::InvalidArgument {
                reason: format!("{path}: {reason}"),
            },
        }
    }
}

/// Errors during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write package archive: {reason}")]
    Archive { reason: String },

    #[error("Slide cannot be exported: {reason}")]
    InvalidSlide { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_path_prefix() {
        let err = LayoutError::invalid("cols must be at least 1").at("root/grid");
        assert_eq!(
            err.to_string(),
            "Invalid layout argument: root/grid: cols must be at least 1"
        );
    }

    #[test]
    fn test_top_level_is_transparent() {
        let err: PlacematError = DescriptionError::UnknownStyle { name: "cell".into() }.into();
        assert_eq!(err.to_string(), "Unknown style: cell");
    }
}
