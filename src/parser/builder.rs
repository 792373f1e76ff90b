//! The scope-tracking document builder.
//!
//! Records stream through [`Builder::handle_record`] in input order. Entity
//! tags open scopes, field tags mutate the entity their scope points at, and
//! every structural problem lands in the error log instead of aborting, so a
//! single run reports everything wrong with a document. Only unknown tags and
//! malformed lines are fatal.
//!
//! An entity closes when the next entity of a kind that displaces it opens,
//! or at end of input; required fields are checked at close. The check is
//! skipped for an instance that already logged an error, which keeps the
//! report focused on the first problem per instance.

use super::context::{EntityKind, IdScope, ParseContext, RelationshipSlot, Scope, Tag};
use super::tokenizer::Record;
use super::values::{
    parse_actor, parse_checksum, parse_date, parse_external_document_ref, parse_range,
    parse_relationship, parse_verification_code, ActorError, RelationshipError,
};
use crate::error::{Result, TagValueError};
use crate::model::{
    ActorOrNoAssertion, Annotation, AnnotationType, Document, DownloadLocation,
    ExternalPackageRef, ExternalPackageRefCategory, ExtractedLicensingInfo, File, FileType,
    LicenseField, Package, PackagePurpose, Relationship, RelationshipTarget, RelationshipType,
    Review, Snippet,
};
use crate::validate::{validate_document_namespace, validate_spdx_id};

/// Builds a [`Document`] from a record stream.
pub struct Builder {
    ctx: ParseContext,
}

impl Builder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ctx: ParseContext::new(),
        }
    }

    /// Feed one record. `Err` only for fatal conditions (unknown tag);
    /// recoverable problems go to the error log.
    pub fn handle_record(&mut self, record: &Record) -> Result<()> {
        let Some(tag) = Tag::from_name(&record.tag) else {
            return Err(TagValueError::unknown_tag(
                record.tag.clone(),
                record.line,
                Tag::suggest(&record.tag).map(String::from),
            ));
        };
        self.dispatch(tag, &record.value, record.line);
        Ok(())
    }

    /// Close open scopes, materialize inferred relationships, and hand out
    /// the document, or fail with every recorded message.
    pub fn finish(mut self) -> Result<Document> {
        self.close_all();
        self.materialize_relationships();

        if !self.ctx.errors.is_empty() {
            return Err(TagValueError::parse(self.ctx.errors.messages()));
        }

        if !self.ctx.doc_seen {
            return Err(TagValueError::parse(vec![
                "No document found. A document must contain at least one document-scope tag."
                    .to_string(),
            ]));
        }
        let doc = &self.ctx.document;
        let required = [
            (doc.spdx_version.is_some(), Tag::SpdxVersion),
            (doc.data_license.is_some(), Tag::DataLicense),
            (doc.name.is_some(), Tag::DocumentName),
            (doc.spdx_id.is_some(), Tag::SpdxId),
            (doc.namespace.is_some(), Tag::DocumentNamespace),
            (doc.creation_info.created.is_some(), Tag::Created),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|(present, _)| !present)
            .map(|(_, tag)| format!("Missing required field {tag} for Document."))
            .collect();
        if !missing.is_empty() {
            return Err(TagValueError::parse(missing));
        }

        tracing::debug!(summary = %self.ctx.document.summary(), "document built");
        Ok(self.ctx.document)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    #[allow(clippy::too_many_lines)]
    fn dispatch(&mut self, tag: Tag, value: &str, line: usize) {
        use EntityKind as K;
        match tag {
            // Document scope
            Tag::SpdxVersion => {
                if self.doc_once(tag, line) {
                    self.ctx.document.spdx_version = Some(value.to_string());
                }
            }
            Tag::DataLicense => {
                if self.doc_once(tag, line) {
                    self.ctx.document.data_license = Some(value.to_string());
                }
            }
            Tag::DocumentName => {
                if self.doc_once(tag, line) {
                    self.ctx.document.name = Some(value.to_string());
                }
            }
            Tag::DocumentNamespace => {
                if self.doc_once(tag, line) {
                    if validate_document_namespace(value) {
                        self.ctx.document.namespace = Some(value.to_string());
                    } else {
                        self.doc_error(grammar(tag, line));
                    }
                }
            }
            Tag::DocumentComment => {
                if self.doc_once(tag, line) {
                    self.ctx.document.comment = Some(value.to_string());
                }
            }
            Tag::ExternalDocumentRef => {
                self.ctx.doc_seen = true;
                match parse_external_document_ref(value) {
                    Some(ext_ref) => self.ctx.document.external_document_refs.push(ext_ref),
                    None => self.doc_error(grammar(tag, line)),
                }
            }
            Tag::SpdxId => self.handle_spdx_id(value, line),

            // Creation info scope
            Tag::Creator => {
                self.ctx.doc_seen = true;
                match parse_actor(value) {
                    Ok(actor) => self.ctx.document.creation_info.creators.push(actor),
                    Err(err) => self.creation_error(actor_detail(&err, value)),
                }
            }
            Tag::Created => {
                if self.creation_once(tag, line) {
                    match parse_date(value) {
                        Some(date) => self.ctx.document.creation_info.created = Some(date),
                        None => self.creation_error(grammar(tag, line)),
                    }
                }
            }
            Tag::CreatorComment => {
                if self.creation_once(tag, line) {
                    self.ctx.document.creation_info.creator_comment = Some(value.to_string());
                }
            }
            Tag::LicenseListVersion => {
                if self.creation_once(tag, line) {
                    self.ctx.document.creation_info.license_list_version =
                        Some(value.to_string());
                }
            }

            // Package scope
            Tag::PackageName => self.open_package(value),
            Tag::PackageVersion => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).version = Some(value.to_string());
                }
            }
            Tag::PackageFileName => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).file_name = Some(value.to_string());
                }
            }
            Tag::PackageSupplier => self.handle_package_actor(tag, value, line),
            Tag::PackageOriginator => self.handle_package_actor(tag, value, line),
            Tag::PackageDownloadLocation => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).download_location =
                        Some(DownloadLocation::parse(value));
                }
            }
            Tag::FilesAnalyzed => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    let analyzed = match value {
                        "true" => Some(true),
                        "false" => Some(false),
                        other => {
                            self.entity_error(
                                K::Package,
                                format!(
                                    "The value of FilesAnalyzed must be either \"true\" or \
                                     \"false\", but is: {other}"
                                ),
                            );
                            None
                        }
                    };
                    if let (Some(i), Some(analyzed)) = (index, analyzed) {
                        self.ctx.package_mut(i).files_analyzed = Some(analyzed);
                    }
                }
            }
            Tag::PackageVerificationCode => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    match parse_verification_code(value) {
                        Some(code) => {
                            if let Some(i) = index {
                                self.ctx.package_mut(i).verification_code = Some(code);
                            }
                        }
                        None => self.entity_error(
                            K::Package,
                            format!(
                                "Error while parsing PackageVerificationCode: Value did not \
                                 match expected format. Line: {line}"
                            ),
                        ),
                    }
                }
            }
            Tag::PackageChecksum => {
                if let Some(index) = self.entity_many(K::Package, tag, line) {
                    match parse_checksum(value) {
                        Some(checksum) => {
                            if let Some(i) = index {
                                self.ctx
                                    .package_mut(i)
                                    .checksums
                                    .insert(checksum.algorithm, checksum.value);
                            }
                        }
                        None => self.entity_error(K::Package, grammar(tag, line)),
                    }
                }
            }
            Tag::PackageHomePage => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).home_page = Some(value.to_string());
                }
            }
            Tag::PackageSourceInfo => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).source_info = Some(value.to_string());
                }
            }
            Tag::PackageLicenseConcluded => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    if let Some(license) = self.parse_license(K::Package, value) {
                        if let Some(i) = index {
                            self.ctx.package_mut(i).license_concluded = Some(license);
                        }
                    }
                }
            }
            Tag::PackageLicenseInfoFromFiles => {
                if let Some(index) = self.entity_many(K::Package, tag, line) {
                    if let Some(license) = self.parse_license(K::Package, value) {
                        if let Some(i) = index {
                            self.ctx.package_mut(i).license_info_from_files.push(license);
                        }
                    }
                }
            }
            Tag::PackageLicenseDeclared => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    if let Some(license) = self.parse_license(K::Package, value) {
                        if let Some(i) = index {
                            self.ctx.package_mut(i).license_declared = Some(license);
                        }
                    }
                }
            }
            Tag::PackageLicenseComments => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).license_comment = Some(value.to_string());
                }
            }
            Tag::PackageCopyrightText => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).copyright_text = Some(value.to_string());
                }
            }
            Tag::PackageSummary => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).summary = Some(value.to_string());
                }
            }
            Tag::PackageDescription => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).description = Some(value.to_string());
                }
            }
            Tag::PackageComment => {
                if let Some(Some(i)) = self.entity_once(K::Package, tag, line) {
                    self.ctx.package_mut(i).comment = Some(value.to_string());
                }
            }
            Tag::PackageAttributionText => {
                if let Some(Some(i)) = self.entity_many(K::Package, tag, line) {
                    self.ctx
                        .package_mut(i)
                        .attribution_texts
                        .push(value.to_string());
                }
            }
            Tag::ExternalRef => self.handle_external_ref(value, line),
            Tag::ExternalRefComment => self.handle_external_ref_comment(value, line),
            Tag::PrimaryPackagePurpose => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    match PackagePurpose::from_name(value) {
                        Some(purpose) => {
                            if let Some(i) = index {
                                self.ctx.package_mut(i).primary_purpose = Some(purpose);
                            }
                        }
                        None => self.entity_error(
                            K::Package,
                            format!("Invalid PrimaryPackagePurpose: {value}. Line: {line}"),
                        ),
                    }
                }
            }
            Tag::BuiltDate => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    match parse_date(value) {
                        Some(date) => {
                            if let Some(i) = index {
                                self.ctx.package_mut(i).built_date = Some(date);
                            }
                        }
                        None => self.entity_error(K::Package, grammar(tag, line)),
                    }
                }
            }
            Tag::ReleaseDate => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    match parse_date(value) {
                        Some(date) => {
                            if let Some(i) = index {
                                self.ctx.package_mut(i).release_date = Some(date);
                            }
                        }
                        None => self.entity_error(K::Package, grammar(tag, line)),
                    }
                }
            }
            Tag::ValidUntilDate => {
                if let Some(index) = self.entity_once(K::Package, tag, line) {
                    match parse_date(value) {
                        Some(date) => {
                            if let Some(i) = index {
                                self.ctx.package_mut(i).valid_until_date = Some(date);
                            }
                        }
                        None => self.entity_error(K::Package, grammar(tag, line)),
                    }
                }
            }

            // File scope
            Tag::FileName => self.open_file(value),
            Tag::FileType => {
                if let Some(index) = self.entity_many(K::File, tag, line) {
                    match FileType::from_name(value) {
                        Some(file_type) => {
                            if let Some(i) = index {
                                self.ctx.file_mut(i).add_file_type(file_type);
                            }
                        }
                        // note: no colon after the tag name in this one
                        None => self.entity_error(
                            K::File,
                            format!("Invalid FileType: {value}. Line {line}"),
                        ),
                    }
                }
            }
            Tag::FileChecksum => {
                if let Some(index) = self.entity_many(K::File, tag, line) {
                    match parse_checksum(value) {
                        Some(checksum) => {
                            if let Some(i) = index {
                                self.ctx
                                    .file_mut(i)
                                    .checksums
                                    .insert(checksum.algorithm, checksum.value);
                            }
                        }
                        None => self.entity_error(K::File, grammar(tag, line)),
                    }
                }
            }
            Tag::LicenseConcluded => {
                if let Some(index) = self.entity_once(K::File, tag, line) {
                    if let Some(license) = self.parse_license(K::File, value) {
                        if let Some(i) = index {
                            self.ctx.file_mut(i).license_concluded = Some(license);
                        }
                    }
                }
            }
            Tag::LicenseInfoInFile => {
                if let Some(index) = self.entity_many(K::File, tag, line) {
                    if let Some(license) = self.parse_license(K::File, value) {
                        if let Some(i) = index {
                            self.ctx.file_mut(i).license_info_in_file.push(license);
                        }
                    }
                }
            }
            Tag::LicenseComments => {
                if let Some(Some(i)) = self.entity_once(K::File, tag, line) {
                    self.ctx.file_mut(i).license_comment = Some(value.to_string());
                }
            }
            Tag::FileCopyrightText => {
                if let Some(Some(i)) = self.entity_once(K::File, tag, line) {
                    self.ctx.file_mut(i).copyright_text = Some(value.to_string());
                }
            }
            Tag::FileComment => {
                if let Some(Some(i)) = self.entity_once(K::File, tag, line) {
                    self.ctx.file_mut(i).comment = Some(value.to_string());
                }
            }
            Tag::FileNotice => {
                if let Some(Some(i)) = self.entity_once(K::File, tag, line) {
                    self.ctx.file_mut(i).notice = Some(value.to_string());
                }
            }
            Tag::FileContributor => {
                if let Some(Some(i)) = self.entity_many(K::File, tag, line) {
                    self.ctx.file_mut(i).contributors.push(value.to_string());
                }
            }
            Tag::FileAttributionText => {
                if let Some(Some(i)) = self.entity_many(K::File, tag, line) {
                    self.ctx
                        .file_mut(i)
                        .attribution_texts
                        .push(value.to_string());
                }
            }

            // Snippet scope
            Tag::SnippetSpdxId => self.open_snippet(value),
            Tag::SnippetFromFileSpdxId => {
                if let Some(Some(i)) = self.entity_once(K::Snippet, tag, line) {
                    self.ctx.snippet_mut(i).file_spdx_id = Some(value.to_string());
                }
            }
            Tag::SnippetByteRange => {
                if let Some(index) = self.entity_once(K::Snippet, tag, line) {
                    match parse_range(value) {
                        Some(range) => {
                            if let Some(i) = index {
                                self.ctx.snippet_mut(i).byte_range = Some(range);
                            }
                        }
                        None => self.entity_error(K::Snippet, range_detail(tag, line)),
                    }
                }
            }
            Tag::SnippetLineRange => {
                if let Some(index) = self.entity_once(K::Snippet, tag, line) {
                    match parse_range(value) {
                        Some(range) => {
                            if let Some(i) = index {
                                self.ctx.snippet_mut(i).line_range = Some(range);
                            }
                        }
                        None => self.entity_error(K::Snippet, range_detail(tag, line)),
                    }
                }
            }
            Tag::SnippetName => {
                if let Some(Some(i)) = self.entity_once(K::Snippet, tag, line) {
                    self.ctx.snippet_mut(i).name = Some(value.to_string());
                }
            }
            Tag::SnippetComment => {
                if let Some(Some(i)) = self.entity_once(K::Snippet, tag, line) {
                    self.ctx.snippet_mut(i).comment = Some(value.to_string());
                }
            }
            Tag::SnippetCopyrightText => {
                if let Some(Some(i)) = self.entity_once(K::Snippet, tag, line) {
                    self.ctx.snippet_mut(i).copyright_text = Some(value.to_string());
                }
            }
            Tag::SnippetLicenseComments => {
                if let Some(Some(i)) = self.entity_once(K::Snippet, tag, line) {
                    self.ctx.snippet_mut(i).license_comment = Some(value.to_string());
                }
            }
            Tag::SnippetLicenseConcluded => {
                if let Some(index) = self.entity_once(K::Snippet, tag, line) {
                    if let Some(license) = self.parse_license(K::Snippet, value) {
                        if let Some(i) = index {
                            self.ctx.snippet_mut(i).license_concluded = Some(license);
                        }
                    }
                }
            }
            Tag::LicenseInfoInSnippet => {
                if let Some(index) = self.entity_many(K::Snippet, tag, line) {
                    if let Some(license) = self.parse_license(K::Snippet, value) {
                        if let Some(i) = index {
                            self.ctx.snippet_mut(i).license_info_in_snippet.push(license);
                        }
                    }
                }
            }
            Tag::SnippetAttributionText => {
                if let Some(Some(i)) = self.entity_many(K::Snippet, tag, line) {
                    self.ctx
                        .snippet_mut(i)
                        .attribution_texts
                        .push(value.to_string());
                }
            }

            // Annotation scope
            Tag::Annotator => self.open_annotation(value, line),
            Tag::AnnotationDate => {
                if let Some(index) = self.entity_once(K::Annotation, tag, line) {
                    match parse_date(value) {
                        Some(date) => {
                            if let Some(i) = index {
                                self.ctx.annotation_mut(i).date = Some(date);
                            }
                        }
                        None => self.entity_error(K::Annotation, grammar(tag, line)),
                    }
                }
            }
            Tag::AnnotationType => {
                if let Some(index) = self.entity_once(K::Annotation, tag, line) {
                    match AnnotationType::from_name(value) {
                        Some(annotation_type) => {
                            if let Some(i) = index {
                                self.ctx.annotation_mut(i).annotation_type =
                                    Some(annotation_type);
                            }
                        }
                        None => self.entity_error(
                            K::Annotation,
                            format!("Invalid AnnotationType: {value}. Line: {line}"),
                        ),
                    }
                }
            }
            Tag::AnnotationComment => {
                if let Some(Some(i)) = self.entity_once(K::Annotation, tag, line) {
                    self.ctx.annotation_mut(i).comment = Some(value.to_string());
                }
            }
            Tag::SpdxRef => {
                if let Some(Some(i)) = self.entity_once(K::Annotation, tag, line) {
                    self.ctx.annotation_mut(i).spdx_ref = Some(value.to_string());
                }
            }

            // Review scope
            Tag::Reviewer => self.open_review(value, line),
            Tag::ReviewDate => {
                if let Some(index) = self.entity_once(K::Review, tag, line) {
                    match parse_date(value) {
                        Some(date) => {
                            if let Some(i) = index {
                                self.ctx.review_mut(i).date = Some(date);
                            }
                        }
                        None => self.entity_error(K::Review, grammar(tag, line)),
                    }
                }
            }
            Tag::ReviewComment => {
                if let Some(Some(i)) = self.entity_once(K::Review, tag, line) {
                    self.ctx.review_mut(i).comment = Some(value.to_string());
                }
            }

            // Extracted licensing info scope
            Tag::LicenseId => self.open_license(value),
            Tag::ExtractedText => {
                if let Some(Some(i)) = self.entity_once(K::ExtractedLicensingInfo, tag, line) {
                    self.ctx.license_mut(i).extracted_text = Some(value.to_string());
                }
            }
            Tag::LicenseName => {
                if let Some(Some(i)) = self.entity_once(K::ExtractedLicensingInfo, tag, line) {
                    self.ctx.license_mut(i).name = Some(value.to_string());
                }
            }
            Tag::LicenseCrossReference => {
                if let Some(Some(i)) = self.entity_many(K::ExtractedLicensingInfo, tag, line) {
                    self.ctx
                        .license_mut(i)
                        .cross_references
                        .push(value.trim().to_string());
                }
            }
            Tag::LicenseComment => {
                if let Some(Some(i)) = self.entity_once(K::ExtractedLicensingInfo, tag, line) {
                    self.ctx.license_mut(i).comment = Some(value.to_string());
                }
            }

            // Relationship scope
            Tag::Relationship => self.open_relationship(value, line),
            Tag::RelationshipComment => {
                if let Some(Some(slot)) = self.entity_once(K::Relationship, tag, line) {
                    if let RelationshipSlot::Explicit(rel) =
                        &mut self.ctx.relationship_slots[slot]
                    {
                        rel.comment = Some(value.to_string());
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Scope plumbing
    // ------------------------------------------------------------------

    fn scope_slot(&mut self, kind: EntityKind) -> &mut Option<Scope> {
        match kind {
            EntityKind::Package => &mut self.ctx.current_package,
            EntityKind::File => &mut self.ctx.current_file,
            EntityKind::Snippet => &mut self.ctx.current_snippet,
            EntityKind::Relationship => &mut self.ctx.current_relationship,
            EntityKind::Annotation => &mut self.ctx.current_annotation,
            EntityKind::Review => &mut self.ctx.current_review,
            EntityKind::ExtractedLicensingInfo => &mut self.ctx.current_license,
            EntityKind::Document | EntityKind::CreationInfo | EntityKind::ExternalDocumentRef => {
                unreachable!("{kind} has no entity scope")
            }
        }
    }

    /// Field-tag admission for the current entity of `kind`.
    ///
    /// `None` means the tag was rejected (no open scope, or a repeated
    /// set-once tag) and the value must not be interpreted. `Some(index)`
    /// means proceed; the index is `None` for a scope whose opening tag
    /// failed, in which case value errors still record but there is nothing
    /// to mutate.
    fn entity_field(
        &mut self,
        kind: EntityKind,
        tag: Tag,
        line: usize,
        once: bool,
    ) -> Option<Option<usize>> {
        let Some(mut scope) = *self.scope_slot(kind) else {
            self.order_error(kind, line);
            return None;
        };
        let fresh = scope.fields.insert(tag);
        let admitted = if once && !fresh {
            scope.errored = true;
            self.ctx.errors.scoped(
                kind,
                scope.group,
                format!("Multiple values for {tag} found. Line: {line}"),
            );
            None
        } else {
            Some(scope.index)
        };
        *self.scope_slot(kind) = Some(scope);
        admitted
    }

    fn entity_once(&mut self, kind: EntityKind, tag: Tag, line: usize) -> Option<Option<usize>> {
        self.entity_field(kind, tag, line, true)
    }

    fn entity_many(&mut self, kind: EntityKind, tag: Tag, line: usize) -> Option<Option<usize>> {
        self.entity_field(kind, tag, line, false)
    }

    /// Record a detail against the current entity of `kind`.
    fn entity_error(&mut self, kind: EntityKind, detail: String) {
        let Some(mut scope) = *self.scope_slot(kind) else {
            return;
        };
        scope.errored = true;
        self.ctx.errors.scoped(kind, scope.group, detail);
        *self.scope_slot(kind) = Some(scope);
    }

    fn order_error(&mut self, kind: EntityKind, line: usize) {
        self.ctx.errors.bare(format!(
            "Element {kind} is not the current element in scope, probably the expected tag \
             to start the element ({opening}) is missing. Line: {line}",
            opening = kind.opening_tag()
        ));
    }

    fn doc_once(&mut self, tag: Tag, line: usize) -> bool {
        self.ctx.doc_seen = true;
        if !self.ctx.doc_fields.insert(tag) {
            self.doc_error(format!("Multiple values for {tag} found. Line: {line}"));
            return false;
        }
        true
    }

    fn doc_error(&mut self, detail: String) {
        self.ctx.doc_errored = true;
        let group = self.ctx.doc_group;
        self.ctx.errors.scoped(EntityKind::Document, group, detail);
    }

    fn creation_once(&mut self, tag: Tag, line: usize) -> bool {
        self.ctx.doc_seen = true;
        if !self.ctx.doc_fields.insert(tag) {
            self.creation_error(format!("Multiple values for {tag} found. Line: {line}"));
            return false;
        }
        true
    }

    fn creation_error(&mut self, detail: String) {
        self.ctx.creation_errored = true;
        let group = self.ctx.creation_group;
        self.ctx
            .errors
            .scoped(EntityKind::CreationInfo, group, detail);
    }

    /// Interpret a license-valued field, recording a failure against the
    /// current entity of `kind`.
    fn parse_license(&mut self, kind: EntityKind, value: &str) -> Option<LicenseField> {
        match LicenseField::parse(value) {
            Ok(license) => Some(license),
            Err(reason) => {
                self.entity_error(
                    kind,
                    format!("Error while parsing license expression: {reason}"),
                );
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Entity opens
    // ------------------------------------------------------------------

    fn open_package(&mut self, name: &str) {
        self.close_snippet();
        self.close_file();
        self.close_package();
        tracing::debug!(package = name, "opening package scope");
        let index = self.ctx.document.packages.len();
        self.ctx.document.packages.push(Package::new(name));
        self.ctx.package_ok.push(true);
        let scope = self.ctx.open_scope(Some(index));
        self.ctx.current_package = Some(scope);
        self.ctx.id_scope = IdScope::Package;
    }

    fn open_file(&mut self, name: &str) {
        self.close_snippet();
        self.close_file();
        let index = self.ctx.document.files.len();
        // Remember the file as a CONTAINS candidate of the open package; the
        // slot keeps its place among explicit relationships.
        if let Some(package) = self.ctx.current_package.and_then(|scope| scope.index) {
            self.ctx
                .relationship_slots
                .push(RelationshipSlot::Candidate {
                    package,
                    file: index,
                });
        }
        self.ctx.document.files.push(File::new(name));
        let scope = self.ctx.open_scope(Some(index));
        self.ctx.current_file = Some(scope);
        self.ctx.id_scope = IdScope::File;
    }

    fn open_snippet(&mut self, spdx_id: &str) {
        self.close_snippet();
        let index = self.ctx.document.snippets.len();
        self.ctx.document.snippets.push(Snippet::new(spdx_id));
        let scope = self.ctx.open_scope(Some(index));
        self.ctx.current_snippet = Some(scope);
    }

    fn open_license(&mut self, license_id: &str) {
        self.ctx.current_license.take();
        let index = self.ctx.document.extracted_licensing_infos.len();
        self.ctx
            .document
            .extracted_licensing_infos
            .push(ExtractedLicensingInfo::new(license_id));
        let scope = self.ctx.open_scope(Some(index));
        self.ctx.current_license = Some(scope);
    }

    fn open_annotation(&mut self, value: &str, line: usize) {
        self.close_annotation();
        match parse_actor(value) {
            Ok(annotator) => {
                let index = self.ctx.document.annotations.len();
                self.ctx.document.annotations.push(Annotation::new(annotator));
                let scope = self.ctx.open_scope(Some(index));
                self.ctx.current_annotation = Some(scope);
            }
            Err(err) => {
                // Keep a scope without an entity so later annotation fields
                // group their errors with this one instead of raising order
                // errors.
                let mut scope = self.ctx.open_scope(None);
                scope.errored = true;
                let detail = match err {
                    ActorError::EmptyName(_) => actor_detail(&err, value),
                    ActorError::NoMatch => grammar(Tag::Annotator, line),
                };
                self.ctx
                    .errors
                    .scoped(EntityKind::Annotation, scope.group, detail);
                self.ctx.current_annotation = Some(scope);
            }
        }
    }

    fn open_review(&mut self, value: &str, line: usize) {
        self.close_review();
        match parse_actor(value) {
            Ok(reviewer) => {
                let index = self.ctx.document.reviews.len();
                self.ctx.document.reviews.push(Review::new(reviewer));
                let scope = self.ctx.open_scope(Some(index));
                self.ctx.current_review = Some(scope);
            }
            Err(err) => {
                let mut scope = self.ctx.open_scope(None);
                scope.errored = true;
                let detail = match err {
                    ActorError::EmptyName(_) => actor_detail(&err, value),
                    ActorError::NoMatch => grammar(Tag::Reviewer, line),
                };
                self.ctx
                    .errors
                    .scoped(EntityKind::Review, scope.group, detail);
                self.ctx.current_review = Some(scope);
            }
        }
    }

    fn open_relationship(&mut self, value: &str, line: usize) {
        self.ctx.current_relationship.take();
        match parse_relationship(value) {
            Ok((source, relationship_type, target)) => {
                let slot = self.ctx.relationship_slots.len();
                self.ctx
                    .relationship_slots
                    .push(RelationshipSlot::Explicit(Relationship::new(
                        source,
                        relationship_type,
                        target,
                    )));
                let scope = self.ctx.open_scope(Some(slot));
                self.ctx.current_relationship = Some(scope);
            }
            Err(err) => {
                let scope = self.ctx.open_scope(None);
                let detail = match err {
                    RelationshipError::SplitFailed => format!(
                        "Relationship couldn't be split in spdx_element_id, \
                         relationship_type and related_spdx_element. Line: {line}"
                    ),
                    RelationshipError::InvalidType(type_name) => {
                        format!("Invalid RelationshipType {type_name}. Line: {line}")
                    }
                };
                self.ctx
                    .errors
                    .scoped(EntityKind::Relationship, scope.group, detail);
                // A failed relationship leaves no scope: a following comment
                // has nothing to attach to.
                self.ctx.current_relationship = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Tag handlers with their own shape
    // ------------------------------------------------------------------

    /// `SPDXID` addresses the most recently opened of document, package, or
    /// file; snippets and annotations carry their ids in dedicated tags.
    fn handle_spdx_id(&mut self, value: &str, line: usize) {
        match self.ctx.id_scope {
            IdScope::Document => {
                if self.doc_once(Tag::SpdxId, line) {
                    if value == "SPDXRef-DOCUMENT" {
                        self.ctx.document.spdx_id = Some(value.to_string());
                    } else {
                        self.doc_error(grammar(Tag::SpdxId, line));
                    }
                }
            }
            IdScope::Package => {
                if let Some(index) = self.entity_once(EntityKind::Package, Tag::SpdxId, line) {
                    if !validate_spdx_id(value) {
                        self.entity_error(EntityKind::Package, grammar(Tag::SpdxId, line));
                    } else if let Some(i) = index {
                        self.ctx.package_mut(i).spdx_id = Some(value.to_string());
                    }
                }
            }
            IdScope::File => {
                if let Some(index) = self.entity_once(EntityKind::File, Tag::SpdxId, line) {
                    if !validate_spdx_id(value) {
                        self.entity_error(EntityKind::File, grammar(Tag::SpdxId, line));
                    } else if let Some(i) = index {
                        self.ctx.file_mut(i).spdx_id = Some(value.to_string());
                    }
                }
            }
        }
    }

    fn handle_package_actor(&mut self, tag: Tag, value: &str, line: usize) {
        if let Some(index) = self.entity_once(EntityKind::Package, tag, line) {
            let actor = if value.trim() == "NOASSERTION" {
                Some(ActorOrNoAssertion::NoAssertion)
            } else {
                match parse_actor(value) {
                    Ok(actor) => Some(ActorOrNoAssertion::Actor(actor)),
                    Err(_) => {
                        self.entity_error(EntityKind::Package, grammar(tag, line));
                        None
                    }
                }
            };
            if let (Some(i), Some(actor)) = (index, actor) {
                match tag {
                    Tag::PackageSupplier => self.ctx.package_mut(i).supplier = Some(actor),
                    _ => self.ctx.package_mut(i).originator = Some(actor),
                }
            }
        }
    }

    fn handle_external_ref(&mut self, value: &str, line: usize) {
        let Some(index) = self.entity_many(EntityKind::Package, Tag::ExternalRef, line) else {
            return;
        };
        let parts: Vec<&str> = value.split_whitespace().collect();
        let [category, ref_type, locator] = parts.as_slice() else {
            self.entity_error(
                EntityKind::Package,
                format!(
                    "Couldn't split PackageExternalRef in category, reference_type and \
                     locator. Line: {line}"
                ),
            );
            return;
        };
        let Some(category) = ExternalPackageRefCategory::from_name(category) else {
            self.entity_error(
                EntityKind::Package,
                format!("Invalid ExternalPackageRefCategory: {category}. Line: {line}"),
            );
            return;
        };
        if let Some(i) = index {
            let refs = &mut self.ctx.package_mut(i).external_refs;
            attach_ref_part(refs, |r| &mut r.category, category);
            attach_ref_part(refs, |r| &mut r.ref_type, (*ref_type).to_string());
            attach_ref_part(refs, |r| &mut r.locator, (*locator).to_string());
        }
    }

    /// `ExternalRefComment` attaches to the most recent `ExternalRef` of the
    /// open package.
    fn handle_external_ref_comment(&mut self, value: &str, line: usize) {
        let Some(index) = self.entity_many(EntityKind::Package, Tag::ExternalRefComment, line)
        else {
            return;
        };
        let Some(i) = index else { return };
        let last_state = self.ctx.document.packages[i]
            .external_refs
            .last()
            .map(|r| r.comment.is_some());
        match last_state {
            None => self.entity_error(
                EntityKind::Package,
                format!("ExternalRefComment has no preceding ExternalRef. Line: {line}"),
            ),
            Some(true) => self.entity_error(
                EntityKind::Package,
                format!("Multiple values for ExternalRefComment found. Line: {line}"),
            ),
            Some(false) => {
                if let Some(last) = self.ctx.package_mut(i).external_refs.last_mut() {
                    last.comment = Some(value.to_string());
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Entity closes
    // ------------------------------------------------------------------

    /// Close every open scope in the order it was opened.
    fn close_all(&mut self) {
        let mut open: Vec<(usize, EntityKind)> = [
            (self.ctx.current_package, EntityKind::Package),
            (self.ctx.current_file, EntityKind::File),
            (self.ctx.current_snippet, EntityKind::Snippet),
            (self.ctx.current_annotation, EntityKind::Annotation),
            (self.ctx.current_review, EntityKind::Review),
        ]
        .iter()
        .filter_map(|(scope, kind)| scope.map(|s| (s.opened, *kind)))
        .collect();
        open.sort_unstable_by_key(|entry| entry.0);
        for (_, kind) in open {
            match kind {
                EntityKind::Package => self.close_package(),
                EntityKind::File => self.close_file(),
                EntityKind::Snippet => self.close_snippet(),
                EntityKind::Annotation => self.close_annotation(),
                EntityKind::Review => self.close_review(),
                _ => {}
            }
        }
        self.ctx.current_license.take();
        self.ctx.current_relationship.take();
    }

    /// Report the required fields missing from a closing entity, unless the
    /// instance already logged an error.
    fn missing_fields(&mut self, kind: EntityKind, scope: Scope, missing: &[Tag]) {
        if scope.errored {
            return;
        }
        for tag in missing {
            self.ctx.errors.scoped(
                kind,
                scope.group,
                format!("Missing required field {tag}."),
            );
        }
    }

    fn close_package(&mut self) {
        let Some(scope) = self.ctx.current_package.take() else {
            return;
        };
        let Some(index) = scope.index else { return };
        let package = &self.ctx.document.packages[index];
        let mut missing = Vec::new();
        if package.spdx_id.is_none() {
            missing.push(Tag::SpdxId);
        }
        if package.download_location.is_none() {
            missing.push(Tag::PackageDownloadLocation);
        }
        self.ctx.package_ok[index] = missing.is_empty();
        self.missing_fields(EntityKind::Package, scope, &missing);
    }

    fn close_file(&mut self) {
        let Some(scope) = self.ctx.current_file.take() else {
            return;
        };
        let Some(index) = scope.index else { return };
        let file = &self.ctx.document.files[index];
        let mut missing = Vec::new();
        if file.spdx_id.is_none() {
            missing.push(Tag::SpdxId);
        }
        if file.checksums.is_empty() {
            missing.push(Tag::FileChecksum);
        }
        self.missing_fields(EntityKind::File, scope, &missing);
    }

    fn close_snippet(&mut self) {
        let Some(scope) = self.ctx.current_snippet.take() else {
            return;
        };
        let Some(index) = scope.index else { return };
        let snippet = &self.ctx.document.snippets[index];
        let mut missing = Vec::new();
        if snippet.file_spdx_id.is_none() {
            missing.push(Tag::SnippetFromFileSpdxId);
        }
        if snippet.byte_range.is_none() {
            missing.push(Tag::SnippetByteRange);
        }
        self.missing_fields(EntityKind::Snippet, scope, &missing);
    }

    fn close_annotation(&mut self) {
        let Some(scope) = self.ctx.current_annotation.take() else {
            return;
        };
        let Some(index) = scope.index else { return };
        let annotation = &self.ctx.document.annotations[index];
        let mut missing = Vec::new();
        if annotation.date.is_none() {
            missing.push(Tag::AnnotationDate);
        }
        if annotation.annotation_type.is_none() {
            missing.push(Tag::AnnotationType);
        }
        if annotation.comment.is_none() {
            missing.push(Tag::AnnotationComment);
        }
        if annotation.spdx_ref.is_none() {
            missing.push(Tag::SpdxRef);
        }
        self.missing_fields(EntityKind::Annotation, scope, &missing);
    }

    fn close_review(&mut self) {
        let Some(scope) = self.ctx.current_review.take() else {
            return;
        };
        let Some(index) = scope.index else { return };
        if self.ctx.document.reviews[index].date.is_none() {
            self.missing_fields(EntityKind::Review, scope, &[Tag::ReviewDate]);
        }
    }

    // ------------------------------------------------------------------
    // Relationship materialization
    // ------------------------------------------------------------------

    /// Turn the slot list into the document's relationship list. Explicit
    /// edges pass through; a candidate becomes a CONTAINS edge unless an
    /// explicit CONTAINS/CONTAINED_BY already covers the pair. A candidate
    /// under a package that failed its required-field check becomes an error;
    /// one whose file has no id is dropped.
    fn materialize_relationships(&mut self) {
        let slots = std::mem::take(&mut self.ctx.relationship_slots);

        let mut explicit_pairs: Vec<(String, String)> = Vec::new();
        for slot in &slots {
            if let RelationshipSlot::Explicit(rel) = slot {
                let Some(target) = rel.related_spdx_element.spdx_id() else {
                    continue;
                };
                match rel.relationship_type {
                    RelationshipType::Contains => {
                        explicit_pairs.push((rel.spdx_element_id.clone(), target.to_string()));
                    }
                    RelationshipType::ContainedBy => {
                        explicit_pairs.push((target.to_string(), rel.spdx_element_id.clone()));
                    }
                    _ => {}
                }
            }
        }

        for slot in slots {
            match slot {
                RelationshipSlot::Explicit(rel) => self.ctx.document.relationships.push(rel),
                RelationshipSlot::Candidate { package, file } => {
                    let Some(file_id) = self.ctx.document.files[file].spdx_id.clone() else {
                        continue;
                    };
                    if !self.ctx.package_ok[package] {
                        self.ctx.errors.bare(format!(
                            "Error while building contains relationship for file {file_id}, \
                             preceding package was not parsed successfully."
                        ));
                        continue;
                    }
                    let Some(package_id) = self.ctx.document.packages[package].spdx_id.clone()
                    else {
                        continue;
                    };
                    let covered = explicit_pairs
                        .iter()
                        .any(|(pkg, contained)| *pkg == package_id && *contained == file_id);
                    if covered {
                        continue;
                    }
                    self.ctx.document.relationships.push(Relationship::new(
                        package_id,
                        RelationshipType::Contains,
                        RelationshipTarget::SpdxId(file_id),
                    ));
                }
            }
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach one part of an `ExternalRef` to the last reference while its slot
/// is still empty, starting a new reference otherwise.
fn attach_ref_part<T>(
    refs: &mut Vec<ExternalPackageRef>,
    slot: impl Fn(&mut ExternalPackageRef) -> &mut Option<T>,
    part: T,
) {
    if let Some(last) = refs.last_mut() {
        let target = slot(last);
        if target.is_none() {
            *target = Some(part);
            return;
        }
    }
    let mut fresh = ExternalPackageRef::default();
    *slot(&mut fresh) = Some(part);
    refs.push(fresh);
}

fn grammar(tag: Tag, line: usize) -> String {
    format!("Error while parsing {tag}: Token did not match specified grammar rule. Line: {line}")
}

fn range_detail(tag: Tag, line: usize) -> String {
    format!("Value for {tag} doesn't match valid range pattern. Line: {line}")
}

fn actor_detail(err: &ActorError, value: &str) -> String {
    match err {
        ActorError::NoMatch => {
            format!("Actor {value} doesn't match any of person, organization or tool.")
        }
        ActorError::EmptyName(kind) => format!("No name for {kind} provided: {value}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenizer::tokenize;

    fn parse(text: &str) -> Result<Document> {
        let mut builder = Builder::new();
        for record in tokenize(text)? {
            builder.handle_record(&record)?;
        }
        builder.finish()
    }

    fn messages(text: &str) -> Vec<String> {
        parse(text).unwrap_err().messages()
    }

    const DOC_HEADER: &str = "SPDXVersion: SPDX-2.3\n\
         DataLicense: CC0-1.0\n\
         SPDXID: SPDXRef-DOCUMENT\n\
         DocumentName: Test\n\
         DocumentNamespace: https://example.org/spdxdocs/test\n\
         Created: 2010-01-29T18:30:22Z\n";

    #[test]
    fn test_minimal_document() {
        let doc = parse(DOC_HEADER).unwrap();
        assert_eq!(doc.spdx_version.as_deref(), Some("SPDX-2.3"));
        assert_eq!(doc.spdx_id.as_deref(), Some("SPDXRef-DOCUMENT"));
        assert_eq!(doc.namespace.as_deref(), Some("https://example.org/spdxdocs/test"));
    }

    #[test]
    fn test_empty_input_reports_no_document() {
        let messages = messages("");
        assert_eq!(
            messages,
            vec![
                "No document found. A document must contain at least one document-scope tag."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_missing_document_fields_reported_together() {
        let messages = messages("SPDXVersion: SPDX-2.3\n");
        assert_eq!(messages.len(), 5);
        assert!(messages.contains(&"Missing required field DataLicense for Document.".to_string()));
        assert!(messages.contains(&"Missing required field Created for Document.".to_string()));
    }

    #[test]
    fn test_unknown_tag_is_fatal_with_suggestion() {
        let err = parse("PackageNane: pkg\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown tag: 'PackageNane'. Line: 1 (did you mean 'PackageName'?)"
        );
    }

    #[test]
    fn test_order_error_for_field_without_scope() {
        let messages = messages(&format!("{DOC_HEADER}PackageVersion: 1.0\n"));
        assert_eq!(
            messages,
            vec![
                "Element Package is not the current element in scope, probably the expected \
                 tag to start the element (PackageName) is missing. Line: 7"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_cardinality_error_groups_under_package() {
        let text = "PackageName: TestPackage\n\
             PackageCopyrightText: Copyright 2022\n\
             PackageCopyrightText: Copyright 2022\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Package: ['Multiple values for PackageCopyrightText \
                 found. Line: 3']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_external_ref_split_error_uses_double_quotes() {
        let text = "PackageName: TestPackage\nExternalRef: reference locator\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Package: [\"Couldn't split PackageExternalRef in \
                 category, reference_type and locator. Line: 2\"]"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_files_analyzed_rejects_non_lowercase() {
        let text = "PackageName: TestPackage\nFilesAnalyzed: FALSE\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Package: ['The value of FilesAnalyzed must be either \
                 \"true\" or \"false\", but is: FALSE']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_package_date_errors_collect_in_one_group() {
        let text = "PackageName: TestPackage\n\
             BuiltDate: 2012\n\
             ValidUntilDate: 202-11-02T00:00\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Package: ['Error while parsing BuiltDate: Token did \
                 not match specified grammar rule. Line: 2', 'Error while parsing \
                 ValidUntilDate: Token did not match specified grammar rule. Line: 3']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_file_type_error_spelling() {
        let text = "FileName: ./test.java\n\
             SPDXID: SPDXRef-File\n\
             FileType: SOUCE\n\
             FileChecksum: SHA3: abc\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing File: ['Invalid FileType: SOUCE. Line 3', 'Error \
                 while parsing FileChecksum: Token did not match specified grammar rule. \
                 Line: 4']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_snippet_range_errors() {
        let text = "SnippetSPDXID: SPDXRef-Snippet\n\
             SnippetByteRange: 1,4\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Snippet: [\"Value for SnippetByteRange doesn't match \
                 valid range pattern. Line: 2\"]"
                    .to_string()
            ]
        );

        let text = "SnippetSPDXID: SPDXRef-Snippet\n\
             SnippetByteRange: 1:4\n\
             SnippetByteRange: 10:23\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Snippet: ['Multiple values for SnippetByteRange \
                 found. Line: 3']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_snippet_order_error() {
        let messages = messages(&format!("{DOC_HEADER}SnippetName: something\n"));
        assert_eq!(
            messages,
            vec![
                "Element Snippet is not the current element in scope, probably the \
                 expected tag to start the element (SnippetSPDXID) is missing. Line: 7"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_relationship_errors() {
        assert_eq!(
            messages("Relationship: spdx_id DESCRIBES\n"),
            vec![
                "Error while parsing Relationship: [\"Relationship couldn't be split in \
                 spdx_element_id, relationship_type and related_spdx_element. Line: 1\"]"
                    .to_string()
            ]
        );
        assert_eq!(
            messages("Relationship: spdx_id IS spdx_id\n"),
            vec![
                "Error while parsing Relationship: ['Invalid RelationshipType IS. \
                 Line: 1']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_relationship_comment_without_relationship() {
        let messages = messages(&format!("{DOC_HEADER}RelationshipComment: comment\n"));
        assert_eq!(
            messages,
            vec![
                "Element Relationship is not the current element in scope, probably the \
                 expected tag to start the element (Relationship) is missing. Line: 7"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_annotation_errors_group_with_failed_opening() {
        let text = "Annotator: Jane Doe()\n\
             AnnotationDate: 201001-2912:23\n\
             AnnotationComment: Document level annotation\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Annotation: ['Error while parsing Annotator: Token \
                 did not match specified grammar rule. Line: 1', 'Error while parsing \
                 AnnotationDate: Token did not match specified grammar rule. Line: 2']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_annotation_missing_fields_reported_at_close() {
        let text = "Annotator: Person: Jane Doe (jane.doe@example.com)\n";
        assert_eq!(
            messages(text),
            vec![
                "Error while parsing Annotation: ['Missing required field AnnotationDate.', \
                 'Missing required field AnnotationType.', 'Missing required field \
                 AnnotationComment.', 'Missing required field SPDXREF.']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_extracted_licensing_info_order_error() {
        let messages = messages(&format!("{DOC_HEADER}ExtractedText: text\n"));
        assert_eq!(
            messages,
            vec![
                "Element ExtractedLicensingInfo is not the current element in scope, \
                 probably the expected tag to start the element (LicenseID) is missing. \
                 Line: 7"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_contains_relationship_inferred() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-Package-A\n\
             PackageDownloadLocation: NOASSERTION\n\
             FileName: ./a.txt\n\
             SPDXID: SPDXRef-File-A\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n"
        );
        let doc = parse(&text).unwrap();
        assert_eq!(doc.relationships.len(), 1);
        assert_eq!(
            doc.relationships[0],
            Relationship::new(
                "SPDXRef-Package-A",
                RelationshipType::Contains,
                RelationshipTarget::SpdxId("SPDXRef-File-A".to_string()),
            )
        );
    }

    #[test]
    fn test_contains_not_duplicated_when_explicit() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-Package-A\n\
             PackageDownloadLocation: NOASSERTION\n\
             FileName: ./a.txt\n\
             SPDXID: SPDXRef-File-A\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n\
             Relationship: SPDXRef-Package-A CONTAINS SPDXRef-File-A\n"
        );
        let doc = parse(&text).unwrap();
        assert_eq!(doc.relationships.len(), 1);
        assert_eq!(doc.relationships[0].relationship_type, RelationshipType::Contains);
    }

    #[test]
    fn test_contained_by_also_suppresses_inference() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-Package-A\n\
             PackageDownloadLocation: NOASSERTION\n\
             FileName: ./a.txt\n\
             SPDXID: SPDXRef-File-A\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n\
             Relationship: SPDXRef-File-A CONTAINED_BY SPDXRef-Package-A\n"
        );
        let doc = parse(&text).unwrap();
        assert_eq!(doc.relationships.len(), 1);
        assert_eq!(doc.relationships[0].relationship_type, RelationshipType::ContainedBy);
    }

    #[test]
    fn test_contains_error_when_package_incomplete() {
        let text = "PackageName: Package A\n\
             FileName: ./a.txt\n\
             SPDXID: SPDXRef-File-A\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n";
        let messages = messages(text);
        assert_eq!(
            messages,
            vec![
                "Error while parsing Package: ['Missing required field SPDXID.', 'Missing \
                 required field PackageDownloadLocation.']"
                    .to_string(),
                "Error while building contains relationship for file SPDXRef-File-A, \
                 preceding package was not parsed successfully."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_file_without_id_drops_candidate() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-Package-A\n\
             PackageDownloadLocation: NOASSERTION\n\
             FileName: ./a.txt\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n"
        );
        // the file is missing its id, so the candidate is dropped and the
        // missing field is reported
        let messages = messages(&text);
        assert_eq!(
            messages,
            vec!["Error while parsing File: ['Missing required field SPDXID.']".to_string()]
        );
    }

    #[test]
    fn test_spdx_id_dispatches_to_most_recent_scope() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-Package-A\n\
             PackageDownloadLocation: NOASSERTION\n\
             FileName: ./a.txt\n\
             SPDXID: SPDXRef-File-A\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n"
        );
        let doc = parse(&text).unwrap();
        assert_eq!(doc.spdx_id.as_deref(), Some("SPDXRef-DOCUMENT"));
        assert_eq!(doc.packages[0].spdx_id.as_deref(), Some("SPDXRef-Package-A"));
        assert_eq!(doc.files[0].spdx_id.as_deref(), Some("SPDXRef-File-A"));
    }

    #[test]
    fn test_document_spdx_id_must_be_document_ref() {
        let messages = messages(
            "SPDXVersion: SPDX-2.3\n\
             DataLicense: CC0-1.0\n\
             SPDXID: SPDXRef-Something\n\
             DocumentName: Test\n\
             DocumentNamespace: https://example.org/spdxdocs/test\n\
             Created: 2010-01-29T18:30:22Z\n",
        );
        assert_eq!(
            messages,
            vec![
                "Error while parsing Document: ['Error while parsing SPDXID: Token did \
                 not match specified grammar rule. Line: 3']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_open_entities_close_in_declaration_order() {
        let text = "PackageName: TestPackage\n\
             FileName: ./a.txt\n\
             Annotator: Person: Jane Doe ()\n";
        let messages = messages(text);
        assert_eq!(messages.len(), 3, "got: {messages:?}");
        assert!(messages[0].starts_with("Error while parsing Package: ["));
        assert!(messages[1].starts_with("Error while parsing File: ["));
        assert!(messages[2].starts_with("Error while parsing Annotation: ["));
    }

    #[test]
    fn test_entity_spdx_id_must_be_well_formed() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-under_score\n\
             PackageDownloadLocation: NOASSERTION\n\
             FileName: ./a.txt\n\
             SPDXID: not-an-id\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n"
        );
        assert_eq!(
            messages(&text),
            vec![
                "Error while parsing Package: ['Error while parsing SPDXID: Token did \
                 not match specified grammar rule. Line: 8']"
                    .to_string(),
                "Error while parsing File: ['Error while parsing SPDXID: Token did \
                 not match specified grammar rule. Line: 11']"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_external_ref_parts_and_comment() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-Package-A\n\
             PackageDownloadLocation: NOASSERTION\n\
             ExternalRef: SECURITY cpe23Type cpe:2.3:a:pivotal_software:spring_framework:4.1.0:*:*:*:*:*:*:*\n\
             ExternalRefComment: Some comment\n\
             ExternalRef: OTHER LocationRef-acmeforge acmecorp/acmenator/4.1.3-alpha\n"
        );
        let doc = parse(&text).unwrap();
        let refs = &doc.packages[0].external_refs;
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].category, Some(ExternalPackageRefCategory::Security));
        assert_eq!(refs[0].ref_type.as_deref(), Some("cpe23Type"));
        assert_eq!(refs[0].comment.as_deref(), Some("Some comment"));
        assert!(refs[1].is_complete());
        assert!(refs[1].comment.is_none());
    }

    #[test]
    fn test_license_expression_errors_name_their_entity() {
        let text = format!(
            "{DOC_HEADER}\
             FileName: ./a.txt\n\
             SPDXID: SPDXRef-File-A\n\
             FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759\n\
             LicenseConcluded: LicenseRef-foo/bar\n"
        );
        let messages = messages(&text);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Error while parsing File: ["));
        assert!(
            messages[0].contains("Error while parsing license expression: LicenseRef-foo/bar:")
        );
    }

    #[test]
    fn test_creation_info_errors() {
        let text = "Creator: Jane Doe()\nCreated: 2010-01-29\n";
        let messages = messages(text);
        assert_eq!(
            messages,
            vec![
                "Error while parsing CreationInfo: [\"Actor Jane Doe() doesn't match any \
                 of person, organization or tool.\", 'Error while parsing Created: Token \
                 did not match specified grammar rule. Line: 2']"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_review_missing_date() {
        let text = "Reviewer: Person: Jane Doe (jane.doe@example.com)\n";
        assert_eq!(
            messages(text),
            vec!["Error while parsing Review: ['Missing required field ReviewDate.']".to_string()]
        );
    }

    #[test]
    fn test_sentinels_in_license_and_location_fields() {
        let text = format!(
            "{DOC_HEADER}\
             PackageName: Package A\n\
             SPDXID: SPDXRef-Package-A\n\
             PackageDownloadLocation: NOASSERTION\n\
             PackageLicenseConcluded: NOASSERTION\n\
             PackageLicenseDeclared: NONE\n\
             PackageCopyrightText: NONE\n"
        );
        let doc = parse(&text).unwrap();
        let package = &doc.packages[0];
        assert_eq!(package.download_location, Some(DownloadLocation::NoAssertion));
        assert_eq!(package.license_concluded, Some(LicenseField::NoAssertion));
        assert_eq!(package.license_declared, Some(LicenseField::None));
        // free-text fields keep the literal string
        assert_eq!(package.copyright_text.as_deref(), Some("NONE"));
    }
}
