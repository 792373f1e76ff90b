//! Tag-value rendering.
//!
//! Emits a document in the section layout conventional for the format:
//! document and creation information first, then snippets not contained in
//! any file, files not contained in any package, packages with their
//! contained files and snippets nested below them, extracted licenses,
//! remaining relationships, annotations, and reviews.
//!
//! CONTAINS relationships that link a package to one of the document's files
//! are consumed by the nesting and not written out; parsing the output infers
//! them again, so a parse-write-parse round trip is stable. A file nests
//! under at most one package; any further containing edge stays an explicit
//! `Relationship:` line, so no file is ever emitted twice. Values holding
//! newlines are wrapped in `<text>` markers. `FilesAnalyzed` renders
//! lowercase, matching what the parser accepts.

use crate::error::{Result, TagValueError};
use crate::model::{
    Annotation, ChecksumAlgorithm, CreationInfo, Document, ExternalDocumentRef, File, Package,
    Relationship, RelationshipType, Review, Snippet,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::io::Write as IoWrite;
use std::path::Path;

/// Render `document` as tag-value text.
#[must_use]
pub fn write_tag_value_string(document: &Document) -> String {
    let mut out = String::new();
    render_document(document, &mut out);
    out
}

/// Write `document` as tag-value text to `writer`.
pub fn write_tag_value(document: &Document, writer: &mut impl IoWrite) -> Result<()> {
    let text = write_tag_value_string(document);
    writer
        .write_all(text.as_bytes())
        .map_err(|err| TagValueError::Write(err.to_string()))
}

/// Write `document` as tag-value text to the file at `path`.
pub fn write_tag_value_file(document: &Document, path: &Path) -> Result<()> {
    tracing::info!(path = %path.display(), "writing tag-value document");
    let text = write_tag_value_string(document);
    std::fs::write(path, text).map_err(|err| TagValueError::io(path, err))
}

fn render_document(document: &Document, out: &mut String) {
    let (loose_relationships, contained_files) = scan_relationships(document);
    let contained_snippets = scan_snippets(document);

    let packaged_files: Vec<usize> = contained_files.values().flatten().copied().collect();
    let filed_snippets: Vec<usize> = contained_snippets.values().flatten().copied().collect();

    out.push_str("## Document Information\n");
    render_document_info(document, out);
    separator(out);

    for (index, snippet) in document.snippets.iter().enumerate() {
        if !filed_snippets.contains(&index) {
            render_snippet(snippet, out);
            separator(out);
        }
    }

    for (index, file) in document.files.iter().enumerate() {
        if !packaged_files.contains(&index) {
            render_file(file, out);
            separator(out);
            render_contained_snippets(document, &contained_snippets, file, out);
        }
    }

    for package in &document.packages {
        render_package(package, out);
        separator(out);
        if let Some(spdx_id) = package.spdx_id.as_deref() {
            if let Some(file_indices) = contained_files.get(spdx_id) {
                for &file_index in file_indices {
                    let file = &document.files[file_index];
                    render_file(file, out);
                    separator(out);
                    render_contained_snippets(document, &contained_snippets, file, out);
                }
            }
        }
    }

    if !document.extracted_licensing_infos.is_empty() {
        out.push_str("## License Information\n");
        for info in &document.extracted_licensing_infos {
            emit(out, "LicenseID", &info.license_id);
            emit_opt(out, "ExtractedText", info.extracted_text.as_deref());
            emit_opt(out, "LicenseName", info.name.as_deref());
            for reference in &info.cross_references {
                emit(out, "LicenseCrossReference", reference);
            }
            emit_opt(out, "LicenseComment", info.comment.as_deref());
            separator(out);
        }
    }

    if !loose_relationships.is_empty() {
        out.push_str("## Relationships\n");
        for relationship in &loose_relationships {
            render_relationship(relationship, out);
        }
        separator(out);
    }

    if !document.annotations.is_empty() {
        out.push_str("## Annotations\n");
        for annotation in &document.annotations {
            render_annotation(annotation, out);
            separator(out);
        }
    }

    if !document.reviews.is_empty() {
        out.push_str("## Reviews\n");
        for review in &document.reviews {
            render_review(review, out);
            separator(out);
        }
    }
}

/// Split the relationship list into edges to write explicitly and the
/// package-contains-file edges the section nesting expresses. Only
/// comment-free CONTAINS edges between a known package and a known file are
/// consumed, and each file nests under at most one package: further edges
/// naming an already-claimed file are written explicitly, so a file shared
/// by two packages never renders twice.
fn scan_relationships<'doc>(
    document: &'doc Document,
) -> (Vec<&'doc Relationship>, IndexMap<&'doc str, Vec<usize>>) {
    let mut loose = Vec::new();
    let mut contained: IndexMap<&str, Vec<usize>> = IndexMap::new();
    let mut claimed: Vec<usize> = Vec::new();

    for relationship in &document.relationships {
        let nestable = relationship.relationship_type == RelationshipType::Contains
            && relationship.comment.is_none()
            && document
                .packages
                .iter()
                .any(|p| p.spdx_id.as_deref() == Some(relationship.spdx_element_id.as_str()));
        let file_index = if nestable {
            relationship
                .related_spdx_element
                .spdx_id()
                .and_then(|target| {
                    document
                        .files
                        .iter()
                        .position(|f| f.spdx_id.as_deref() == Some(target))
                })
        } else {
            None
        };
        match file_index {
            Some(file_index) if !claimed.contains(&file_index) => {
                claimed.push(file_index);
                contained
                    .entry(relationship.spdx_element_id.as_str())
                    .or_default()
                    .push(file_index);
            }
            _ => loose.push(relationship),
        }
    }
    (loose, contained)
}

/// Map each file id to the indices of the snippets it contains.
fn scan_snippets(document: &Document) -> IndexMap<&str, Vec<usize>> {
    let mut contained: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (index, snippet) in document.snippets.iter().enumerate() {
        let Some(file_id) = snippet.file_spdx_id.as_deref() else {
            continue;
        };
        if document
            .files
            .iter()
            .any(|f| f.spdx_id.as_deref() == Some(file_id))
        {
            contained.entry(file_id).or_default().push(index);
        }
    }
    contained
}

fn render_contained_snippets(
    document: &Document,
    contained_snippets: &IndexMap<&str, Vec<usize>>,
    file: &File,
    out: &mut String,
) {
    let Some(file_id) = file.spdx_id.as_deref() else {
        return;
    };
    if let Some(snippet_indices) = contained_snippets.get(file_id) {
        for &snippet_index in snippet_indices {
            render_snippet(&document.snippets[snippet_index], out);
            separator(out);
        }
    }
}

fn render_document_info(document: &Document, out: &mut String) {
    emit_opt(out, "SPDXVersion", document.spdx_version.as_deref());
    emit_opt(out, "DataLicense", document.data_license.as_deref());
    emit_opt(out, "SPDXID", document.spdx_id.as_deref());
    emit_opt(out, "DocumentName", document.name.as_deref());
    emit_opt(out, "DocumentNamespace", document.namespace.as_deref());
    emit_opt(out, "DocumentComment", document.comment.as_deref());

    if !document.external_document_refs.is_empty() {
        out.push_str("\n## External Document References\n");
        for ext_ref in &document.external_document_refs {
            render_external_document_ref(ext_ref, out);
        }
    }

    separator(out);
    out.push_str("## Creation Information\n");
    render_creation_info(&document.creation_info, out);
}

fn render_external_document_ref(ext_ref: &ExternalDocumentRef, out: &mut String) {
    emit(
        out,
        "ExternalDocumentRef",
        &format!(
            "{} {} {}",
            ext_ref.document_ref_id, ext_ref.document_uri, ext_ref.checksum
        ),
    );
}

fn render_creation_info(creation_info: &CreationInfo, out: &mut String) {
    emit_opt(
        out,
        "LicenseListVersion",
        creation_info.license_list_version.as_deref(),
    );
    for creator in &creation_info.creators {
        emit(out, "Creator", &creator.to_string());
    }
    if let Some(created) = creation_info.created {
        emit(out, "Created", &format_date(created));
    }
    emit_opt(
        out,
        "CreatorComment",
        creation_info.creator_comment.as_deref(),
    );
}

fn render_package(package: &Package, out: &mut String) {
    out.push_str("## Package Information\n");
    emit(out, "PackageName", &package.name);
    emit_opt(out, "SPDXID", package.spdx_id.as_deref());
    emit_opt(out, "PackageVersion", package.version.as_deref());
    emit_opt(out, "PackageFileName", package.file_name.as_deref());
    if let Some(supplier) = &package.supplier {
        emit(out, "PackageSupplier", &supplier.to_string());
    }
    if let Some(originator) = &package.originator {
        emit(out, "PackageOriginator", &originator.to_string());
    }
    if let Some(location) = &package.download_location {
        emit(out, "PackageDownloadLocation", &location.to_string());
    }
    if let Some(analyzed) = package.files_analyzed {
        emit(out, "FilesAnalyzed", if analyzed { "true" } else { "false" });
    }
    if let Some(code) = &package.verification_code {
        let value = if code.excluded_file_names.is_empty() {
            code.value.clone()
        } else {
            format!(
                "{} (excludes: {})",
                code.value,
                code.excluded_file_names.join(", ")
            )
        };
        emit(out, "PackageVerificationCode", &value);
    }
    render_checksums(&package.checksums, "PackageChecksum", out);
    emit_opt(out, "PackageHomePage", package.home_page.as_deref());
    emit_opt(out, "PackageSourceInfo", package.source_info.as_deref());
    if let Some(license) = &package.license_concluded {
        emit(out, "PackageLicenseConcluded", &license.to_string());
    }
    for license in &package.license_info_from_files {
        emit(out, "PackageLicenseInfoFromFiles", &license.to_string());
    }
    if let Some(license) = &package.license_declared {
        emit(out, "PackageLicenseDeclared", &license.to_string());
    }
    emit_opt(
        out,
        "PackageLicenseComments",
        package.license_comment.as_deref(),
    );
    emit_opt(
        out,
        "PackageCopyrightText",
        package.copyright_text.as_deref(),
    );
    emit_opt(out, "PackageSummary", package.summary.as_deref());
    emit_opt(out, "PackageDescription", package.description.as_deref());
    emit_opt(out, "PackageComment", package.comment.as_deref());
    for ext_ref in &package.external_refs {
        if !ext_ref.is_complete() {
            continue;
        }
        if let (Some(category), Some(ref_type), Some(locator)) =
            (&ext_ref.category, &ext_ref.ref_type, &ext_ref.locator)
        {
            emit(
                out,
                "ExternalRef",
                &format!("{category} {ref_type} {locator}"),
            );
            emit_opt(out, "ExternalRefComment", ext_ref.comment.as_deref());
        }
    }
    for text in &package.attribution_texts {
        emit(out, "PackageAttributionText", text);
    }
    if let Some(purpose) = package.primary_purpose {
        emit(out, "PrimaryPackagePurpose", purpose.name());
    }
    if let Some(date) = package.release_date {
        emit(out, "ReleaseDate", &format_date(date));
    }
    if let Some(date) = package.built_date {
        emit(out, "BuiltDate", &format_date(date));
    }
    if let Some(date) = package.valid_until_date {
        emit(out, "ValidUntilDate", &format_date(date));
    }
}

fn render_file(file: &File, out: &mut String) {
    out.push_str("## File Information\n");
    emit(out, "FileName", &file.name);
    emit_opt(out, "SPDXID", file.spdx_id.as_deref());
    for file_type in &file.file_types {
        emit(out, "FileType", file_type.name());
    }
    render_checksums(&file.checksums, "FileChecksum", out);
    if let Some(license) = &file.license_concluded {
        emit(out, "LicenseConcluded", &license.to_string());
    }
    for license in &file.license_info_in_file {
        emit(out, "LicenseInfoInFile", &license.to_string());
    }
    emit_opt(out, "LicenseComments", file.license_comment.as_deref());
    emit_opt(out, "FileCopyrightText", file.copyright_text.as_deref());
    emit_opt(out, "FileComment", file.comment.as_deref());
    emit_opt(out, "FileNotice", file.notice.as_deref());
    for contributor in &file.contributors {
        emit(out, "FileContributor", contributor);
    }
    for text in &file.attribution_texts {
        emit(out, "FileAttributionText", text);
    }
}

fn render_snippet(snippet: &Snippet, out: &mut String) {
    out.push_str("## Snippet Information\n");
    emit(out, "SnippetSPDXID", &snippet.spdx_id);
    emit_opt(out, "SnippetFromFileSPDXID", snippet.file_spdx_id.as_deref());
    if let Some((start, end)) = snippet.byte_range {
        emit(out, "SnippetByteRange", &format!("{start}:{end}"));
    }
    if let Some((start, end)) = snippet.line_range {
        emit(out, "SnippetLineRange", &format!("{start}:{end}"));
    }
    if let Some(license) = &snippet.license_concluded {
        emit(out, "SnippetLicenseConcluded", &license.to_string());
    }
    for license in &snippet.license_info_in_snippet {
        emit(out, "LicenseInfoInSnippet", &license.to_string());
    }
    emit_opt(
        out,
        "SnippetLicenseComments",
        snippet.license_comment.as_deref(),
    );
    emit_opt(
        out,
        "SnippetCopyrightText",
        snippet.copyright_text.as_deref(),
    );
    emit_opt(out, "SnippetComment", snippet.comment.as_deref());
    emit_opt(out, "SnippetName", snippet.name.as_deref());
    for text in &snippet.attribution_texts {
        emit(out, "SnippetAttributionText", text);
    }
}

fn render_relationship(relationship: &Relationship, out: &mut String) {
    emit(
        out,
        "Relationship",
        &format!(
            "{} {} {}",
            relationship.spdx_element_id,
            relationship.relationship_type,
            relationship.related_spdx_element
        ),
    );
    emit_opt(out, "RelationshipComment", relationship.comment.as_deref());
}

fn render_annotation(annotation: &Annotation, out: &mut String) {
    emit(out, "Annotator", &annotation.annotator.to_string());
    if let Some(date) = annotation.date {
        emit(out, "AnnotationDate", &format_date(date));
    }
    if let Some(annotation_type) = annotation.annotation_type {
        emit(out, "AnnotationType", annotation_type.name());
    }
    emit_opt(out, "SPDXREF", annotation.spdx_ref.as_deref());
    emit_opt(out, "AnnotationComment", annotation.comment.as_deref());
}

fn render_review(review: &Review, out: &mut String) {
    emit(out, "Reviewer", &review.reviewer.to_string());
    if let Some(date) = review.date {
        emit(out, "ReviewDate", &format_date(date));
    }
    emit_opt(out, "ReviewComment", review.comment.as_deref());
}

fn render_checksums(
    checksums: &IndexMap<ChecksumAlgorithm, String>,
    tag: &str,
    out: &mut String,
) {
    for (algorithm, value) in checksums {
        emit(out, tag, &format!("{}: {value}", algorithm.name()));
    }
}

/// Emit one record, wrapping multi-line values in `<text>` markers.
fn emit(out: &mut String, tag: &str, value: &str) {
    if value.contains('\n') {
        out.push_str(tag);
        out.push_str(": <text>");
        out.push_str(value);
        out.push_str("</text>\n");
    } else {
        out.push_str(tag);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
}

fn emit_opt(out: &mut String, tag: &str, value: Option<&str>) {
    if let Some(value) = value {
        emit(out, tag, value);
    }
}

fn separator(out: &mut String) {
    out.push('\n');
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Actor, LicenseField, RelationshipTarget};

    fn minimal_document() -> Document {
        let mut doc = Document::default();
        doc.spdx_version = Some("SPDX-2.3".to_string());
        doc.data_license = Some("CC0-1.0".to_string());
        doc.spdx_id = Some("SPDXRef-DOCUMENT".to_string());
        doc.name = Some("Test".to_string());
        doc.namespace = Some("https://example.org/spdxdocs/test".to_string());
        doc.creation_info.creators.push(Actor::tool("tool-1.0"));
        doc.creation_info.created = crate::parser::parse_date("2022-12-01T00:00:00Z");
        doc
    }

    #[test]
    fn test_document_header_layout() {
        let text = write_tag_value_string(&minimal_document());
        let expected_start = "## Document Information\n\
             SPDXVersion: SPDX-2.3\n\
             DataLicense: CC0-1.0\n\
             SPDXID: SPDXRef-DOCUMENT\n\
             DocumentName: Test\n\
             DocumentNamespace: https://example.org/spdxdocs/test\n\
             \n\
             ## Creation Information\n\
             Creator: Tool: tool-1.0\n\
             Created: 2022-12-01T00:00:00Z\n";
        assert!(text.starts_with(expected_start), "got:\n{text}");
    }

    #[test]
    fn test_multiline_value_wrapped_in_text_markers() {
        let mut doc = minimal_document();
        doc.comment = Some("first line\nsecond line".to_string());
        let text = write_tag_value_string(&doc);
        assert!(text.contains("DocumentComment: <text>first line\nsecond line</text>\n"));
    }

    #[test]
    fn test_contains_relationship_consumed_by_nesting() {
        let mut doc = minimal_document();
        let mut package = Package::new("pkg");
        package.spdx_id = Some("SPDXRef-Package".to_string());
        doc.packages.push(package);
        let mut file = File::new("./a.txt");
        file.spdx_id = Some("SPDXRef-File".to_string());
        doc.files.push(file);
        doc.relationships.push(Relationship::new(
            "SPDXRef-Package",
            RelationshipType::Contains,
            RelationshipTarget::SpdxId("SPDXRef-File".to_string()),
        ));

        let text = write_tag_value_string(&doc);
        assert!(!text.contains("Relationship:"));
        let package_pos = text.find("## Package Information").unwrap();
        let file_pos = text.find("## File Information").unwrap();
        assert!(package_pos < file_pos, "file should nest under its package");
    }

    #[test]
    fn test_relationship_with_comment_written_explicitly() {
        let mut doc = minimal_document();
        let mut package = Package::new("pkg");
        package.spdx_id = Some("SPDXRef-Package".to_string());
        doc.packages.push(package);
        let mut file = File::new("./a.txt");
        file.spdx_id = Some("SPDXRef-File".to_string());
        doc.files.push(file);
        let mut relationship = Relationship::new(
            "SPDXRef-Package",
            RelationshipType::Contains,
            RelationshipTarget::SpdxId("SPDXRef-File".to_string()),
        );
        relationship.comment = Some("kept".to_string());
        doc.relationships.push(relationship);

        let text = write_tag_value_string(&doc);
        assert!(text.contains("Relationship: SPDXRef-Package CONTAINS SPDXRef-File\n"));
        assert!(text.contains("RelationshipComment: kept\n"));
    }

    #[test]
    fn test_shared_file_claimed_by_first_package_only() {
        let mut doc = minimal_document();
        for name in ["SPDXRef-Package-A", "SPDXRef-Package-B"] {
            let mut package = Package::new("pkg");
            package.spdx_id = Some(name.to_string());
            doc.packages.push(package);
        }
        let mut file = File::new("./shared.c");
        file.spdx_id = Some("SPDXRef-Shared".to_string());
        doc.files.push(file);
        for source in ["SPDXRef-Package-A", "SPDXRef-Package-B"] {
            doc.relationships.push(Relationship::new(
                source,
                RelationshipType::Contains,
                RelationshipTarget::SpdxId("SPDXRef-Shared".to_string()),
            ));
        }

        let text = write_tag_value_string(&doc);
        assert_eq!(text.matches("FileName: ./shared.c").count(), 1);
        assert!(!text.contains("Relationship: SPDXRef-Package-A CONTAINS"));
        assert!(text.contains("Relationship: SPDXRef-Package-B CONTAINS SPDXRef-Shared\n"));
    }

    #[test]
    fn test_snippet_nests_under_its_file() {
        let mut doc = minimal_document();
        let mut file = File::new("./a.txt");
        file.spdx_id = Some("SPDXRef-File".to_string());
        doc.files.push(file);
        let mut snippet = Snippet::new("SPDXRef-Snippet");
        snippet.file_spdx_id = Some("SPDXRef-File".to_string());
        snippet.byte_range = Some((310, 420));
        doc.snippets.push(snippet);

        let text = write_tag_value_string(&doc);
        let file_pos = text.find("## File Information").unwrap();
        let snippet_pos = text.find("## Snippet Information").unwrap();
        assert!(file_pos < snippet_pos);
        assert!(text.contains("SnippetByteRange: 310:420\n"));
    }

    #[test]
    fn test_files_analyzed_renders_lowercase() {
        let mut doc = minimal_document();
        let mut package = Package::new("pkg");
        package.spdx_id = Some("SPDXRef-Package".to_string());
        package.files_analyzed = Some(true);
        doc.packages.push(package);
        let text = write_tag_value_string(&doc);
        assert!(text.contains("FilesAnalyzed: true\n"));
    }

    #[test]
    fn test_license_sentinels_render_as_keywords() {
        let mut doc = minimal_document();
        let mut package = Package::new("pkg");
        package.license_concluded = Some(LicenseField::NoAssertion);
        package.license_declared = Some(LicenseField::None);
        doc.packages.push(package);
        let text = write_tag_value_string(&doc);
        assert!(text.contains("PackageLicenseConcluded: NOASSERTION\n"));
        assert!(text.contains("PackageLicenseDeclared: NONE\n"));
    }
}
