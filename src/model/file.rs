//! File declarations.

use super::{ChecksumAlgorithm, LicenseField};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `FileType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Application,
    Audio,
    Image,
    Text,
    Video,
    Documentation,
    Spdx,
    Other,
}

impl FileType {
    pub const ALL: [Self; 11] = [
        Self::Source,
        Self::Binary,
        Self::Archive,
        Self::Application,
        Self::Audio,
        Self::Image,
        Self::Text,
        Self::Video,
        Self::Documentation,
        Self::Spdx,
        Self::Other,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Source => "SOURCE",
            Self::Binary => "BINARY",
            Self::Archive => "ARCHIVE",
            Self::Application => "APPLICATION",
            Self::Audio => "AUDIO",
            Self::Image => "IMAGE",
            Self::Text => "TEXT",
            Self::Video => "VIDEO",
            Self::Documentation => "DOCUMENTATION",
            Self::Spdx => "SPDX",
            Self::Other => "OTHER",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One file declaration.
///
/// The name is inherent to the opening `FileName` tag; the id and at least
/// one checksum are required by the time the file closes. File types keep
/// declaration order with duplicates dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub spdx_id: Option<String>,
    pub file_types: Vec<FileType>,
    pub checksums: IndexMap<ChecksumAlgorithm, String>,
    pub license_concluded: Option<LicenseField>,
    pub license_info_in_file: Vec<LicenseField>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<String>,
    pub comment: Option<String>,
    pub notice: Option<String>,
    pub contributors: Vec<String>,
    pub attribution_texts: Vec<String>,
}

impl File {
    /// Create a file with only its name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spdx_id: None,
            file_types: Vec::new(),
            checksums: IndexMap::new(),
            license_concluded: None,
            license_info_in_file: Vec::new(),
            license_comment: None,
            copyright_text: None,
            comment: None,
            notice: None,
            contributors: Vec::new(),
            attribution_texts: Vec::new(),
        }
    }

    /// Append a file type, keeping set semantics (duplicates are dropped).
    pub fn add_file_type(&mut self, file_type: FileType) {
        if !self.file_types.contains(&file_type) {
            self.file_types.push(file_type);
        }
    }
}
