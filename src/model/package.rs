//! Packages and their external references.

use super::{ActorOrNoAssertion, ChecksumAlgorithm, LicenseField};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `PackageDownloadLocation` value: a location string, or `NOASSERTION`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DownloadLocation {
    Location(String),
    NoAssertion,
}

impl DownloadLocation {
    /// Interpret a download location value, resolving the sentinel.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "NOASSERTION" => Self::NoAssertion,
            location => Self::Location(location.to_string()),
        }
    }
}

impl fmt::Display for DownloadLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location(location) => write!(f, "{location}"),
            Self::NoAssertion => write!(f, "NOASSERTION"),
        }
    }
}

/// `PrimaryPackagePurpose` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackagePurpose {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    Source,
    Archive,
    File,
    Install,
    Other,
}

impl PackagePurpose {
    pub const ALL: [Self; 12] = [
        Self::Application,
        Self::Framework,
        Self::Library,
        Self::Container,
        Self::OperatingSystem,
        Self::Device,
        Self::Firmware,
        Self::Source,
        Self::Archive,
        Self::File,
        Self::Install,
        Self::Other,
    ];

    /// Tag-value spelling (hyphenated, e.g. `OPERATING-SYSTEM`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Application => "APPLICATION",
            Self::Framework => "FRAMEWORK",
            Self::Library => "LIBRARY",
            Self::Container => "CONTAINER",
            Self::OperatingSystem => "OPERATING-SYSTEM",
            Self::Device => "DEVICE",
            Self::Firmware => "FIRMWARE",
            Self::Source => "SOURCE",
            Self::Archive => "ARCHIVE",
            Self::File => "FILE",
            Self::Install => "INSTALL",
            Self::Other => "OTHER",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl fmt::Display for PackagePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `ExternalRef` category values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalPackageRefCategory {
    Security,
    PackageManager,
    PersistentId,
    Other,
}

impl ExternalPackageRefCategory {
    /// Canonical tag-value spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Security => "SECURITY",
            Self::PackageManager => "PACKAGE-MANAGER",
            Self::PersistentId => "PERSISTENT-ID",
            Self::Other => "OTHER",
        }
    }

    /// Resolve a category name. Underscore spellings are accepted as aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SECURITY" => Some(Self::Security),
            "PACKAGE-MANAGER" | "PACKAGE_MANAGER" => Some(Self::PackageManager),
            "PERSISTENT-ID" | "PERSISTENT_ID" => Some(Self::PersistentId),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ExternalPackageRefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An external reference attached to a package.
///
/// Built in phases: category, type, and locator each attach to the last-added
/// ref while its slot is empty; a part arriving with no open slot starts a
/// new ref. The `ExternalRef` tag feeds all three parts in one line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPackageRef {
    pub category: Option<ExternalPackageRefCategory>,
    pub ref_type: Option<String>,
    pub locator: Option<String>,
    pub comment: Option<String>,
}

impl ExternalPackageRef {
    /// Whether category, type, and locator are all present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.ref_type.is_some() && self.locator.is_some()
    }
}

/// `PackageVerificationCode` value with its optional excludes list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageVerificationCode {
    /// Hex digest over the package's files
    pub value: String,
    /// File names listed in the parenthesized excludes clause
    pub excluded_file_names: Vec<String>,
}

/// One package declaration.
///
/// The name is inherent to the opening `PackageName` tag; the id and download
/// location are required by the time the package closes, everything else is
/// optional. Checksums are keyed by algorithm in declaration order, last tag
/// wins per algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub spdx_id: Option<String>,
    pub version: Option<String>,
    pub file_name: Option<String>,
    pub supplier: Option<ActorOrNoAssertion>,
    pub originator: Option<ActorOrNoAssertion>,
    pub download_location: Option<DownloadLocation>,
    pub files_analyzed: Option<bool>,
    pub verification_code: Option<PackageVerificationCode>,
    pub checksums: IndexMap<ChecksumAlgorithm, String>,
    pub home_page: Option<String>,
    pub source_info: Option<String>,
    pub license_concluded: Option<LicenseField>,
    pub license_info_from_files: Vec<LicenseField>,
    pub license_declared: Option<LicenseField>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub attribution_texts: Vec<String>,
    pub external_refs: Vec<ExternalPackageRef>,
    pub primary_purpose: Option<PackagePurpose>,
    pub release_date: Option<DateTime<Utc>>,
    pub built_date: Option<DateTime<Utc>>,
    pub valid_until_date: Option<DateTime<Utc>>,
}

impl Package {
    /// Create a package with only its name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spdx_id: None,
            version: None,
            file_name: None,
            supplier: None,
            originator: None,
            download_location: None,
            files_analyzed: None,
            verification_code: None,
            checksums: IndexMap::new(),
            home_page: None,
            source_info: None,
            license_concluded: None,
            license_info_from_files: Vec::new(),
            license_declared: None,
            license_comment: None,
            copyright_text: None,
            summary: None,
            description: None,
            comment: None,
            attribution_texts: Vec::new(),
            external_refs: Vec::new(),
            primary_purpose: None,
            release_date: None,
            built_date: None,
            valid_until_date: None,
        }
    }
}
