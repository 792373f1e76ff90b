//! The document root and its creation information.

use super::{
    Actor, Annotation, Checksum, ExtractedLicensingInfo, File, Package, Relationship, Review,
    Snippet,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference to another SPDX document, from a single
/// `ExternalDocumentRef` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocumentRef {
    /// `DocumentRef-` identifier
    pub document_ref_id: String,
    /// Namespace URI of the referenced document
    pub document_uri: String,
    pub checksum: Checksum,
}

/// Who created the document, when, and with which license list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreationInfo {
    /// `Creator` tags in declaration order
    pub creators: Vec<Actor>,
    pub created: Option<DateTime<Utc>>,
    pub creator_comment: Option<String>,
    pub license_list_version: Option<String>,
}

/// A fully parsed tag-value document.
///
/// Only handed out when the parse recorded zero errors, so the document-scope
/// fields required by SPDX (version, data license, id, name, namespace,
/// created timestamp) are present even though they are typed `Option` for the
/// build phase. Entity collections keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub spdx_version: Option<String>,
    pub data_license: Option<String>,
    pub spdx_id: Option<String>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub comment: Option<String>,
    pub external_document_refs: Vec<ExternalDocumentRef>,
    pub creation_info: CreationInfo,
    pub packages: Vec<Package>,
    pub files: Vec<File>,
    pub snippets: Vec<Snippet>,
    pub extracted_licensing_infos: Vec<ExtractedLicensingInfo>,
    pub relationships: Vec<Relationship>,
    pub annotations: Vec<Annotation>,
    pub reviews: Vec<Review>,
}

impl Document {
    /// One-line entity count summary, used by the CLI.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} package(s), {} file(s), {} snippet(s), {} relationship(s), \
             {} annotation(s), {} extracted license(s)",
            self.packages.len(),
            self.files.len(),
            self.snippets.len(),
            self.relationships.len(),
            self.annotations.len(),
            self.extracted_licensing_infos.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_collections() {
        let mut doc = Document::default();
        doc.packages.push(Package::new("pkg"));
        doc.files.push(File::new("file"));
        doc.files.push(File::new("other"));
        assert!(doc.summary().starts_with("1 package(s), 2 file(s)"));
    }
}
