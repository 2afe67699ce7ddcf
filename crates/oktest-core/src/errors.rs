//! Error types for loading, validating and persisting grading tests.

use std::path::PathBuf;

/// Structural errors. Ordinary grading failures are never reported here;
/// they are folded into [`crate::suite::Tally`] counters.
#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    /// A suite entry in the declaration is not a mapping.
    #[error("suite {index}: test suites must be mappings")]
    MalformedSuite { index: usize },

    /// A suite entry has no string `type` field.
    #[error("suite {index}: suites must have field \"type\"")]
    MissingSuiteType { index: usize },

    /// A suite `type` that no registered strategy handles.
    #[error("suite {index}: invalid suite type: {kind}")]
    UnknownSuiteType { index: usize, kind: String },

    /// A declaration whose fields do not match the expected schema.
    #[error("invalid declaration: {message}")]
    InvalidDeclaration { message: String },

    /// A backing file that is not of the form `test = <data>`.
    #[error("invalid test file {}: {message}", path.display())]
    TestFile { path: PathBuf, message: String },

    /// Reading or writing a backing file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GradingError {
    pub fn invalid_declaration(message: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            message: message.into(),
        }
    }

    /// Whether the error comes from bad input (declaration, test file or
    /// config) rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedSuite { .. }
                | Self::MissingSuiteType { .. }
                | Self::UnknownSuiteType { .. }
                | Self::InvalidDeclaration { .. }
                | Self::TestFile { .. }
                | Self::Config { .. }
        )
    }
}

/// Result type for grading operations.
pub type GradingResult<T> = Result<T, GradingError>;
