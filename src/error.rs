//! Unified error types for spdx-tagvalue.
//!
//! Parsing either succeeds with a complete [`Document`](crate::model::Document)
//! or fails with the full ordered list of structural errors. Fatal conditions
//! (unknown tags, malformed lines) abort the parse immediately and carry their
//! own variants.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spdx-tagvalue operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TagValueError {
    /// One or more structural errors were recorded while building the document.
    ///
    /// `messages` holds every error in the order it was encountered; the parse
    /// ran to the end of the input before failing.
    #[error("Document parsing failed:\n{}", .messages.join("\n"))]
    Parse { messages: Vec<String> },

    /// A line could not be classified as a tag-value record. Fatal.
    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// A tag name is not part of the tag-value vocabulary. Fatal.
    #[error("Unknown tag: '{tag}'. Line: {line}{}", suggestion_hint(.suggestion))]
    UnknownTag {
        tag: String,
        line: usize,
        /// Nearest known tag by string similarity, when one is close enough.
        suggestion: Option<String>,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors while emitting a document
    #[error("Failed to write document: {0}")]
    Write(String),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(tag) => format!(" (did you mean '{tag}'?)"),
        None => String::new(),
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for spdx-tagvalue operations
pub type Result<T> = std::result::Result<T, TagValueError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl TagValueError {
    /// Create an aggregated parse failure from recorded messages
    pub fn parse(messages: Vec<String>) -> Self {
        Self::Parse { messages }
    }

    /// Create a malformed-line error
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create an unknown-tag error
    pub fn unknown_tag(tag: impl Into<String>, line: usize, suggestion: Option<String>) -> Self {
        Self::UnknownTag {
            tag: tag.into(),
            line,
            suggestion,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Every error message this failure carries, in order.
    ///
    /// For [`TagValueError::Parse`] this is the recorded list; fatal variants
    /// report themselves as a single message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Parse { messages } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<std::io::Error> for TagValueError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
