//! Parse-time state: the tag inventory, per-entity field records, and the
//! error log.
//!
//! All mutable parse state lives in one [`ParseContext`] value constructed
//! per invocation and moved through the parse; there is no hidden singleton
//! and no reset step. "Already set" bookkeeping is a single [`FieldSet`]
//! bitset per open entity, checked by one assign-once operation in the
//! builder instead of per-field booleans.

use crate::model::{
    Annotation, Document, ExtractedLicensingInfo, File, Package, Relationship, Review, Snippet,
};
use std::fmt;

/// Every tag the grammar knows. The discriminant doubles as the tag's bit in
/// a [`FieldSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    // Document scope
    SpdxVersion,
    DataLicense,
    DocumentName,
    DocumentNamespace,
    DocumentComment,
    ExternalDocumentRef,
    SpdxId,
    Creator,
    Created,
    CreatorComment,
    LicenseListVersion,
    // Package
    PackageName,
    PackageVersion,
    PackageFileName,
    PackageSupplier,
    PackageOriginator,
    PackageDownloadLocation,
    FilesAnalyzed,
    PackageVerificationCode,
    PackageChecksum,
    PackageHomePage,
    PackageSourceInfo,
    PackageLicenseConcluded,
    PackageLicenseInfoFromFiles,
    PackageLicenseDeclared,
    PackageLicenseComments,
    PackageCopyrightText,
    PackageSummary,
    PackageDescription,
    PackageComment,
    PackageAttributionText,
    ExternalRef,
    ExternalRefComment,
    PrimaryPackagePurpose,
    BuiltDate,
    ReleaseDate,
    ValidUntilDate,
    // File
    FileName,
    FileType,
    FileChecksum,
    LicenseConcluded,
    LicenseInfoInFile,
    LicenseComments,
    FileCopyrightText,
    FileComment,
    FileNotice,
    FileContributor,
    FileAttributionText,
    // Snippet
    SnippetSpdxId,
    SnippetName,
    SnippetComment,
    SnippetCopyrightText,
    SnippetLicenseComments,
    SnippetFromFileSpdxId,
    SnippetLicenseConcluded,
    LicenseInfoInSnippet,
    SnippetByteRange,
    SnippetLineRange,
    SnippetAttributionText,
    // Annotation
    Annotator,
    AnnotationDate,
    AnnotationComment,
    AnnotationType,
    SpdxRef,
    // Review
    Reviewer,
    ReviewDate,
    ReviewComment,
    // Extracted licensing info
    LicenseId,
    ExtractedText,
    LicenseName,
    LicenseCrossReference,
    LicenseComment,
    // Relationship
    Relationship,
    RelationshipComment,
}

impl Tag {
    /// Every tag with its tag-value spelling.
    pub const ALL: [(Tag, &'static str); 74] = [
        (Self::SpdxVersion, "SPDXVersion"),
        (Self::DataLicense, "DataLicense"),
        (Self::DocumentName, "DocumentName"),
        (Self::DocumentNamespace, "DocumentNamespace"),
        (Self::DocumentComment, "DocumentComment"),
        (Self::ExternalDocumentRef, "ExternalDocumentRef"),
        (Self::SpdxId, "SPDXID"),
        (Self::Creator, "Creator"),
        (Self::Created, "Created"),
        (Self::CreatorComment, "CreatorComment"),
        (Self::LicenseListVersion, "LicenseListVersion"),
        (Self::PackageName, "PackageName"),
        (Self::PackageVersion, "PackageVersion"),
        (Self::PackageFileName, "PackageFileName"),
        (Self::PackageSupplier, "PackageSupplier"),
        (Self::PackageOriginator, "PackageOriginator"),
        (Self::PackageDownloadLocation, "PackageDownloadLocation"),
        (Self::FilesAnalyzed, "FilesAnalyzed"),
        (Self::PackageVerificationCode, "PackageVerificationCode"),
        (Self::PackageChecksum, "PackageChecksum"),
        (Self::PackageHomePage, "PackageHomePage"),
        (Self::PackageSourceInfo, "PackageSourceInfo"),
        (Self::PackageLicenseConcluded, "PackageLicenseConcluded"),
        (Self::PackageLicenseInfoFromFiles, "PackageLicenseInfoFromFiles"),
        (Self::PackageLicenseDeclared, "PackageLicenseDeclared"),
        (Self::PackageLicenseComments, "PackageLicenseComments"),
        (Self::PackageCopyrightText, "PackageCopyrightText"),
        (Self::PackageSummary, "PackageSummary"),
        (Self::PackageDescription, "PackageDescription"),
        (Self::PackageComment, "PackageComment"),
        (Self::PackageAttributionText, "PackageAttributionText"),
        (Self::ExternalRef, "ExternalRef"),
        (Self::ExternalRefComment, "ExternalRefComment"),
        (Self::PrimaryPackagePurpose, "PrimaryPackagePurpose"),
        (Self::BuiltDate, "BuiltDate"),
        (Self::ReleaseDate, "ReleaseDate"),
        (Self::ValidUntilDate, "ValidUntilDate"),
        (Self::FileName, "FileName"),
        (Self::FileType, "FileType"),
        (Self::FileChecksum, "FileChecksum"),
        (Self::LicenseConcluded, "LicenseConcluded"),
        (Self::LicenseInfoInFile, "LicenseInfoInFile"),
        (Self::LicenseComments, "LicenseComments"),
        (Self::FileCopyrightText, "FileCopyrightText"),
        (Self::FileComment, "FileComment"),
        (Self::FileNotice, "FileNotice"),
        (Self::FileContributor, "FileContributor"),
        (Self::FileAttributionText, "FileAttributionText"),
        (Self::SnippetSpdxId, "SnippetSPDXID"),
        (Self::SnippetName, "SnippetName"),
        (Self::SnippetComment, "SnippetComment"),
        (Self::SnippetCopyrightText, "SnippetCopyrightText"),
        (Self::SnippetLicenseComments, "SnippetLicenseComments"),
        (Self::SnippetFromFileSpdxId, "SnippetFromFileSPDXID"),
        (Self::SnippetLicenseConcluded, "SnippetLicenseConcluded"),
        (Self::LicenseInfoInSnippet, "LicenseInfoInSnippet"),
        (Self::SnippetByteRange, "SnippetByteRange"),
        (Self::SnippetLineRange, "SnippetLineRange"),
        (Self::SnippetAttributionText, "SnippetAttributionText"),
        (Self::Annotator, "Annotator"),
        (Self::AnnotationDate, "AnnotationDate"),
        (Self::AnnotationComment, "AnnotationComment"),
        (Self::AnnotationType, "AnnotationType"),
        (Self::SpdxRef, "SPDXREF"),
        (Self::Reviewer, "Reviewer"),
        (Self::ReviewDate, "ReviewDate"),
        (Self::ReviewComment, "ReviewComment"),
        (Self::LicenseId, "LicenseID"),
        (Self::ExtractedText, "ExtractedText"),
        (Self::LicenseName, "LicenseName"),
        (Self::LicenseCrossReference, "LicenseCrossReference"),
        (Self::LicenseComment, "LicenseComment"),
        (Self::Relationship, "Relationship"),
        (Self::RelationshipComment, "RelationshipComment"),
    ];

    /// Tag-value spelling.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(tag, _)| *tag == self)
            .map_or("", |(_, name)| name)
    }

    /// Resolve a tag name, exact match.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, tag_name)| *tag_name == name)
            .map(|(tag, _)| *tag)
    }

    /// Nearest known tag by Jaro-Winkler similarity, for unknown-tag hints.
    /// Returns `None` when nothing is close enough.
    #[must_use]
    pub fn suggest(name: &str) -> Option<&'static str> {
        const MIN_SIMILARITY: f64 = 0.85;
        Self::ALL
            .iter()
            .map(|(_, tag_name)| (*tag_name, strsim::jaro_winkler(name, tag_name)))
            .filter(|(_, score)| *score >= MIN_SIMILARITY)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(tag_name, _)| tag_name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The set of fields already assigned on one open entity instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet(u128);

impl FieldSet {
    /// Whether `tag` has been assigned.
    #[must_use]
    pub fn contains(self, tag: Tag) -> bool {
        self.0 & (1u128 << (tag as u32)) != 0
    }

    /// Mark `tag` assigned. Returns `false` if it already was.
    pub fn insert(&mut self, tag: Tag) -> bool {
        let bit = 1u128 << (tag as u32);
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }
}

/// The entity kinds the scope tracker distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Document,
    CreationInfo,
    Package,
    File,
    Snippet,
    Relationship,
    Annotation,
    Review,
    ExternalDocumentRef,
    ExtractedLicensingInfo,
}

impl EntityKind {
    /// Name used in error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::CreationInfo => "CreationInfo",
            Self::Package => "Package",
            Self::File => "File",
            Self::Snippet => "Snippet",
            Self::Relationship => "Relationship",
            Self::Annotation => "Annotation",
            Self::Review => "Review",
            Self::ExternalDocumentRef => "ExternalDocumentRef",
            Self::ExtractedLicensingInfo => "ExtractedLicensingInfo",
        }
    }

    /// The tag that opens an entity of this kind, named in order errors.
    #[must_use]
    pub const fn opening_tag(self) -> &'static str {
        match self {
            Self::Document | Self::CreationInfo | Self::ExternalDocumentRef => "SPDXID",
            Self::Package => "PackageName",
            Self::File => "FileName",
            Self::Snippet => "SnippetSPDXID",
            Self::Relationship => "Relationship",
            Self::Annotation => "Annotator",
            Self::Review => "Reviewer",
            Self::ExtractedLicensingInfo => "LicenseID",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Identifies one entity instance in the error log, so that all details for
/// the same instance render as one grouped message.
pub type GroupId = u32;

#[derive(Debug)]
enum LogEntry {
    Scoped {
        kind: EntityKind,
        group: GroupId,
        details: Vec<String>,
    },
    Bare(String),
}

/// Accumulates error messages in first-error order without aborting the
/// parse. Grouped entries collect every detail for one entity instance;
/// bare entries (order errors, inference failures) stand alone.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Vec<LogEntry>,
    next_group: GroupId,
}

impl ErrorLog {
    /// Allocate a group id for a new entity instance.
    pub fn new_group(&mut self) -> GroupId {
        let group = self.next_group;
        self.next_group += 1;
        group
    }

    /// Record a detail against an entity instance.
    pub fn scoped(&mut self, kind: EntityKind, group: GroupId, detail: String) {
        tracing::warn!(kind = kind.label(), %detail, "recorded parse error");
        for entry in &mut self.entries {
            if let LogEntry::Scoped {
                kind: entry_kind,
                group: entry_group,
                details,
            } = entry
            {
                if *entry_kind == kind && *entry_group == group {
                    details.push(detail);
                    return;
                }
            }
        }
        self.entries.push(LogEntry::Scoped {
            kind,
            group,
            details: vec![detail],
        });
    }

    /// Record a standalone message.
    pub fn bare(&mut self, message: String) {
        tracing::warn!(%message, "recorded parse error");
        self.entries.push(LogEntry::Bare(message));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the ordered message list.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match entry {
                LogEntry::Scoped { kind, details, .. } => {
                    let quoted: Vec<String> = details.iter().map(|d| quote(d)).collect();
                    format!("Error while parsing {kind}: [{}]", quoted.join(", "))
                }
                LogEntry::Bare(message) => message.clone(),
            })
            .collect()
    }
}

/// Quote a detail string for the grouped list rendering, repr-style: single
/// quotes by default, double quotes when the detail contains a single quote,
/// and single quotes with `\'` escapes when it contains both kinds.
fn quote(detail: &str) -> String {
    if detail.contains('\'') {
        if detail.contains('"') {
            format!("'{}'", detail.replace('\'', "\\'"))
        } else {
            format!("\"{detail}\"")
        }
    } else {
        format!("'{detail}'")
    }
}

/// Which entity a bare `SPDXID` tag addresses: the most recently opened of
/// Document, Package, File.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScope {
    #[default]
    Document,
    Package,
    File,
}

/// One open entity of some kind: its index in the owning collection, its
/// assigned-field record, its error group, and when it was opened.
///
/// `index` is `None` for an entity whose opening tag itself failed (a bad
/// `Annotator` value): the scope stays addressable so later field errors
/// still group with the opening error, but there is nothing to mutate.
#[derive(Debug, Clone, Copy)]
pub struct Scope {
    pub index: Option<usize>,
    pub fields: FieldSet,
    pub group: GroupId,
    pub opened: usize,
    /// Whether any error was recorded against this instance; suppresses the
    /// missing-required-field check at close.
    pub errored: bool,
}

/// A relationship list slot: an explicit edge, or a CONTAINS candidate
/// recorded at `FileName` while a package was open. Candidates materialize
/// at end of input, keeping declaration order.
#[derive(Debug)]
pub enum RelationshipSlot {
    Explicit(Relationship),
    Candidate { package: usize, file: usize },
}

/// All state for one parse invocation.
pub struct ParseContext {
    pub document: Document,
    /// Assigned-field record shared by the document and creation-info
    /// scopes; their tag sets are disjoint.
    pub doc_fields: FieldSet,
    pub doc_group: GroupId,
    pub creation_group: GroupId,
    /// Whether any document-scope tag has been seen.
    pub doc_seen: bool,
    pub doc_errored: bool,
    pub creation_errored: bool,

    pub relationship_slots: Vec<RelationshipSlot>,
    /// Required-field outcome per package, parallel to `document.packages`,
    /// filled at close. Consulted by the CONTAINS inferencer.
    pub package_ok: Vec<bool>,

    pub current_package: Option<Scope>,
    pub current_file: Option<Scope>,
    pub current_snippet: Option<Scope>,
    pub current_relationship: Option<Scope>,
    pub current_annotation: Option<Scope>,
    pub current_review: Option<Scope>,
    pub current_license: Option<Scope>,
    pub id_scope: IdScope,

    pub errors: ErrorLog,
    /// Monotonic open counter, orders entity closes at end of input.
    pub sequence: usize,
}

impl ParseContext {
    /// Fresh context for one parse invocation.
    #[must_use]
    pub fn new() -> Self {
        let mut errors = ErrorLog::default();
        let doc_group = errors.new_group();
        let creation_group = errors.new_group();
        Self {
            document: Document::default(),
            doc_fields: FieldSet::default(),
            doc_group,
            creation_group,
            doc_seen: false,
            doc_errored: false,
            creation_errored: false,
            relationship_slots: Vec::new(),
            package_ok: Vec::new(),
            current_package: None,
            current_file: None,
            current_snippet: None,
            current_relationship: None,
            current_annotation: None,
            current_review: None,
            current_license: None,
            id_scope: IdScope::default(),
            errors,
            sequence: 0,
        }
    }

    /// Open a scope for a newly appended entity.
    pub fn open_scope(&mut self, index: Option<usize>) -> Scope {
        self.sequence += 1;
        Scope {
            index,
            fields: FieldSet::default(),
            group: self.errors.new_group(),
            opened: self.sequence,
            errored: false,
        }
    }

    pub fn package_mut(&mut self, index: usize) -> &mut Package {
        &mut self.document.packages[index]
    }

    pub fn file_mut(&mut self, index: usize) -> &mut File {
        &mut self.document.files[index]
    }

    pub fn snippet_mut(&mut self, index: usize) -> &mut Snippet {
        &mut self.document.snippets[index]
    }

    pub fn annotation_mut(&mut self, index: usize) -> &mut Annotation {
        &mut self.document.annotations[index]
    }

    pub fn review_mut(&mut self, index: usize) -> &mut Review {
        &mut self.document.reviews[index]
    }

    pub fn license_mut(&mut self, index: usize) -> &mut ExtractedLicensingInfo {
        &mut self.document.extracted_licensing_infos[index]
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}
