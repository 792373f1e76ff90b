//! Snippet declarations.

use super::LicenseField;
use serde::{Deserialize, Serialize};

/// One snippet declaration.
///
/// The id is inherent to the opening `SnippetSPDXID` tag; the from-file id
/// and byte range are required by the time the snippet closes. Ranges are
/// `start:end` pairs with `start <= end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub spdx_id: String,
    pub file_spdx_id: Option<String>,
    pub byte_range: Option<(u64, u64)>,
    pub line_range: Option<(u64, u64)>,
    pub name: Option<String>,
    pub license_concluded: Option<LicenseField>,
    pub license_info_in_snippet: Vec<LicenseField>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<String>,
    pub comment: Option<String>,
    pub attribution_texts: Vec<String>,
}

impl Snippet {
    /// Create a snippet with only its id set.
    #[must_use]
    pub fn new(spdx_id: impl Into<String>) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            file_spdx_id: None,
            byte_range: None,
            line_range: None,
            name: None,
            license_concluded: None,
            license_info_in_snippet: Vec::new(),
            license_comment: None,
            copyright_text: None,
            comment: None,
            attribution_texts: Vec::new(),
        }
    }
}
