//! Round-trip tests: parse, write, parse again.
//!
//! The writer nests files under their packages and drops the CONTAINS edges
//! the nesting expresses; re-parsing infers them again, so a full round trip
//! must reproduce the document exactly.

use spdx_tagvalue::{
    parse_tag_value, parse_tag_value_file, write_tag_value, write_tag_value_file,
    write_tag_value_string,
};

const FULL_DOCUMENT: &str = "\
SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: Sample_Document-V2.3
DocumentNamespace: https://spdx.org/spdxdocs/spdx-example-444504E0-4F89-41D3-9A0C-0305E82C3301
DocumentComment: <text>Sample Comment</text>
ExternalDocumentRef: DocumentRef-spdx-tool-1.2 http://spdx.org/spdxdocs/spdx-tools-v1.2 SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759
LicenseListVersion: 3.17
Creator: Tool: ScanCode
Creator: Person: Jane Doe (jane.doe@example.com)
Created: 2010-01-29T18:30:22Z
CreatorComment: <text>Sample Comment
on two lines</text>
FileName: ./no/package/file.c
SPDXID: SPDXRef-LooseFile
FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759
PackageName: Test
SPDXID: SPDXRef-Package
PackageVersion: 1.0
PackageDownloadLocation: http://example.com/test
FilesAnalyzed: true
PackageSupplier: Organization: ACME
PackageVerificationCode: 4e3211c67a2d28fced849ee1bb76e7391b93feba (excludes: something.rdf, something.txt)
PackageChecksum: SHA1: 4e3211c67a2d28fced849ee1bb76e7391b93feba
PackageLicenseConcluded: Apache-2.0
PackageLicenseDeclared: NOASSERTION
PackageCopyrightText: <text>Copyright 2014 Acme Inc.</text>
ExternalRef: SECURITY cpe23Type cpe:2.3:a:acme:test:1.0:*:*:*:*:*:*:*
ExternalRefComment: Some comment about the package.
PrimaryPackagePurpose: LIBRARY
ReleaseDate: 2021-01-01T12:00:00Z
FileName: ./package/file.java
SPDXID: SPDXRef-File
FileType: SOURCE
FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759
LicenseConcluded: Apache-2.0
FileCopyrightText: NONE
SnippetSPDXID: SPDXRef-Snippet
SnippetFromFileSPDXID: SPDXRef-File
SnippetByteRange: 310:420
SnippetLineRange: 5:23
SnippetName: from linux kernel
LicenseID: LicenseRef-Beerware-4.2
ExtractedText: <text>\"THE BEER-WARE LICENSE\" (Revision 42)</text>
LicenseName: Beer-Ware License
Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package
RelationshipComment: This is a comment.
Annotator: Person: Jane Doe ()
AnnotationDate: 2010-01-29T18:30:22Z
AnnotationType: OTHER
SPDXREF: SPDXRef-DOCUMENT
AnnotationComment: <text>Document level annotation</text>
Reviewer: Person: Joe Reviewer
ReviewDate: 2010-02-10T00:00:00Z
ReviewComment: <text>Looks fine.</text>";

#[test]
fn round_trip_reproduces_the_document() {
    let parsed = parse_tag_value(FULL_DOCUMENT).unwrap();
    let written = write_tag_value_string(&parsed);
    let reparsed = parse_tag_value(&written).unwrap();
    assert_eq!(parsed, reparsed, "written form:\n{written}");
}

#[test]
fn round_trip_is_stable_after_one_pass() {
    let parsed = parse_tag_value(FULL_DOCUMENT).unwrap();
    let first = write_tag_value_string(&parsed);
    let second = write_tag_value_string(&parse_tag_value(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn written_layout_nests_packaged_file_and_its_snippet() {
    let parsed = parse_tag_value(FULL_DOCUMENT).unwrap();
    let written = write_tag_value_string(&parsed);

    let sections: Vec<usize> = [
        "## Document Information",
        "## External Document References",
        "## Creation Information",
        "## File Information\nFileName: ./no/package/file.c",
        "## Package Information",
        "## File Information\nFileName: ./package/file.java",
        "## Snippet Information",
        "## License Information",
        "## Relationships",
        "## Annotations",
        "## Reviews",
    ]
    .iter()
    .map(|marker| written.find(marker).unwrap_or_else(|| panic!("missing {marker}")))
    .collect();
    assert!(
        sections.windows(2).all(|pair| pair[0] < pair[1]),
        "sections out of order:\n{written}"
    );

    // the inferred package-contains-file edge is expressed by nesting only
    assert!(!written.contains("Relationship: SPDXRef-Package CONTAINS SPDXRef-File"));
    // the explicit commented relationship survives as a relationship line
    assert!(written.contains("Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package\n"));
    assert!(written.contains("RelationshipComment: This is a comment.\n"));
}

#[test]
fn file_contained_by_two_packages_is_written_once() {
    let document = "\
SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: Shared
DocumentNamespace: https://spdx.org/spdxdocs/shared
Creator: Tool: ScanCode
Created: 2010-01-29T18:30:22Z
FileName: ./shared.c
SPDXID: SPDXRef-Shared
FileChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759
PackageName: First
SPDXID: SPDXRef-Package-A
PackageDownloadLocation: NOASSERTION
PackageName: Second
SPDXID: SPDXRef-Package-B
PackageDownloadLocation: NOASSERTION
Relationship: SPDXRef-Package-A CONTAINS SPDXRef-Shared
Relationship: SPDXRef-Package-B CONTAINS SPDXRef-Shared";

    let parsed = parse_tag_value(document).unwrap();
    assert_eq!(parsed.files.len(), 1);

    let written = write_tag_value_string(&parsed);
    // nested under the first containing package only
    assert_eq!(written.matches("FileName: ./shared.c").count(), 1);
    assert!(!written.contains("Relationship: SPDXRef-Package-A CONTAINS"));
    assert!(written.contains("Relationship: SPDXRef-Package-B CONTAINS SPDXRef-Shared\n"));

    let reparsed = parse_tag_value(&written).unwrap();
    assert_eq!(reparsed.files, parsed.files);
    assert_eq!(reparsed.relationships.len(), 2);
}

#[test]
fn multiline_creator_comment_round_trips_through_text_markers() {
    let parsed = parse_tag_value(FULL_DOCUMENT).unwrap();
    let written = write_tag_value_string(&parsed);
    assert!(written.contains("CreatorComment: <text>Sample Comment\non two lines</text>\n"));

    let reparsed = parse_tag_value(&written).unwrap();
    assert_eq!(
        reparsed.creation_info.creator_comment.as_deref(),
        Some("Sample Comment\non two lines")
    );
}

#[test]
fn write_to_file_and_parse_back() {
    let parsed = parse_tag_value(FULL_DOCUMENT).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.spdx");

    write_tag_value_file(&parsed, &path).unwrap();
    let reparsed = parse_tag_value_file(&path).unwrap();
    assert_eq!(parsed, reparsed);
}

#[test]
fn write_to_io_writer_matches_string_form() {
    let parsed = parse_tag_value(FULL_DOCUMENT).unwrap();
    let mut buffer = Vec::new();
    write_tag_value(&parsed, &mut buffer).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        write_tag_value_string(&parsed)
    );
}
