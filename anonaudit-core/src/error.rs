//! Error types for the anonymization audit engine.
//!
//! Error messages never include raw cell values from quasi-identifying
//! or sensitive columns. Only column names, counts, and already-rendered
//! violation keys (which are QI values the report format itself exposes)
//! may appear in error text.

use thiserror::Error;

/// Main error type for anonaudit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnonAuditError {
    /// Both the input and output datasets failed to load; nothing to analyze.
    #[error("no usable dataset: {context}")]
    NoUsableInput { context: String },

    /// A dataset required to be non-empty by a component had zero rows.
    #[error("{which} dataset has no rows")]
    EmptyDataset { which: String },

    /// Mode detection found a column with no rows to inspect.
    #[error("cannot determine mode for column '{column}': no rows")]
    ModeNotDetected { column: String },

    /// Configuration section or value could not be parsed.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// CSV ingestion failed.
    #[error("failed to ingest '{path}': {context}")]
    Ingestion { path: String, context: String },

    /// I/O operation failed.
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with `AnonAuditError`.
pub type Result<T> = std::result::Result<T, AnonAuditError>;

impl AnonAuditError {
    /// Creates a fatal "no usable input" error.
    pub fn no_usable_input(context: impl Into<String>) -> Self {
        Self::NoUsableInput {
            context: context.into(),
        }
    }

    /// Creates an empty-dataset precondition error.
    pub fn empty_dataset(which: impl Into<String>) -> Self {
        Self::EmptyDataset {
            which: which.into(),
        }
    }

    /// Creates a mode-not-detected error for the named column.
    pub fn mode_not_detected(column: impl Into<String>) -> Self {
        Self::ModeNotDetected {
            column: column.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an ingestion error for the given file path.
    pub fn ingestion(path: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Ingestion {
            path: path.into(),
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for AnonAuditError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            context: "JSON (de)serialization".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_carries_message() {
        let error = AnonAuditError::configuration("threshold 'k' is not a positive integer");
        assert!(error.to_string().contains("threshold 'k'"));
    }

    #[test]
    fn empty_dataset_error_names_which_dataset() {
        let error = AnonAuditError::empty_dataset("Output");
        assert!(error.to_string().contains("Output"));
    }

    #[test]
    fn mode_not_detected_names_column_not_values() {
        let error = AnonAuditError::mode_not_detected("ehak");
        let msg = error.to_string();
        assert!(msg.contains("ehak"));
    }

    #[test]
    fn ingestion_error_names_path() {
        let error = AnonAuditError::ingestion("input.csv", "no separator detected");
        let msg = error.to_string();
        assert!(msg.contains("input.csv"));
        assert!(msg.contains("no separator detected"));
    }

    #[test]
    fn no_usable_input_error_is_fatal_context() {
        let error = AnonAuditError::no_usable_input("both input and output failed to load");
        assert!(error.to_string().contains("both input and output"));
    }
}
