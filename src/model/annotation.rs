//! Annotations and legacy reviews.

use super::Actor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `AnnotationType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationType {
    Review,
    Other,
}

impl AnnotationType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Review => "REVIEW",
            Self::Other => "OTHER",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "REVIEW" => Some(Self::Review),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One annotation.
///
/// The annotator is inherent to the opening `Annotator` tag; date, type,
/// comment, and the target id (`SPDXREF`) are all required by close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub annotator: Actor,
    pub date: Option<DateTime<Utc>>,
    pub annotation_type: Option<AnnotationType>,
    pub comment: Option<String>,
    /// Id of the element this annotation applies to
    pub spdx_ref: Option<String>,
}

impl Annotation {
    /// Create an annotation with only its annotator set.
    #[must_use]
    pub fn new(annotator: Actor) -> Self {
        Self {
            annotator,
            date: None,
            annotation_type: None,
            comment: None,
            spdx_ref: None,
        }
    }
}

/// One legacy review block (`Reviewer` / `ReviewDate` / `ReviewComment`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: Actor,
    pub date: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl Review {
    /// Create a review with only its reviewer set.
    #[must_use]
    pub fn new(reviewer: Actor) -> Self {
        Self {
            reviewer,
            date: None,
            comment: None,
        }
    }
}
