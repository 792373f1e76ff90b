//! SPDX document model.
//!
//! These types mirror the tag-value grammar: one struct per entity kind, with
//! the field inherent to the entity's opening tag stored plainly and every
//! other field optional or collection-valued. License fields, relationship
//! targets, supplier/originator, and the download location carry their
//! `NOASSERTION`/`NONE` sentinels as tagged variants; free-text fields keep a
//! literal `NONE` as the string.

mod actor;
mod annotation;
mod checksum;
mod document;
mod file;
mod license;
mod package;
mod relationship;
mod snippet;

pub use actor::{Actor, ActorKind, ActorOrNoAssertion};
pub use annotation::{Annotation, AnnotationType, Review};
pub use checksum::{Checksum, ChecksumAlgorithm};
pub use document::{CreationInfo, Document, ExternalDocumentRef};
pub use file::{File, FileType};
pub use license::{ExtractedLicensingInfo, LicenseExpression, LicenseField};
pub use package::{
    DownloadLocation, ExternalPackageRef, ExternalPackageRefCategory, Package, PackagePurpose,
    PackageVerificationCode,
};
pub use relationship::{Relationship, RelationshipTarget, RelationshipType};
pub use snippet::Snippet;
