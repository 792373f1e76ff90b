//! Relationships between document elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of SPDX 2.3 relationship types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum RelationshipType {
    Amends,
    AncestorOf,
    BuildDependencyOf,
    BuildToolOf,
    ContainedBy,
    Contains,
    CopyOf,
    DataFileOf,
    DependencyManifestOf,
    DependencyOf,
    DependsOn,
    DescendantOf,
    DescribedBy,
    Describes,
    DevDependencyOf,
    DevToolOf,
    DistributionArtifact,
    DocumentationOf,
    DynamicLink,
    ExampleOf,
    ExpandedFromArchive,
    FileAdded,
    FileDeleted,
    FileModified,
    GeneratedFrom,
    Generates,
    HasPrerequisite,
    MetafileOf,
    OptionalComponentOf,
    OptionalDependencyOf,
    Other,
    PackageOf,
    PatchApplied,
    PatchFor,
    PrerequisiteFor,
    ProvidedDependencyOf,
    RequirementDescriptionOf,
    RuntimeDependencyOf,
    SpecificationFor,
    StaticLink,
    TestCaseOf,
    TestDependencyOf,
    TestOf,
    TestToolOf,
    VariantOf,
}

impl RelationshipType {
    /// Every relationship type, in tag-value name order.
    pub const ALL: [Self; 45] = [
        Self::Amends,
        Self::AncestorOf,
        Self::BuildDependencyOf,
        Self::BuildToolOf,
        Self::ContainedBy,
        Self::Contains,
        Self::CopyOf,
        Self::DataFileOf,
        Self::DependencyManifestOf,
        Self::DependencyOf,
        Self::DependsOn,
        Self::DescendantOf,
        Self::DescribedBy,
        Self::Describes,
        Self::DevDependencyOf,
        Self::DevToolOf,
        Self::DistributionArtifact,
        Self::DocumentationOf,
        Self::DynamicLink,
        Self::ExampleOf,
        Self::ExpandedFromArchive,
        Self::FileAdded,
        Self::FileDeleted,
        Self::FileModified,
        Self::GeneratedFrom,
        Self::Generates,
        Self::HasPrerequisite,
        Self::MetafileOf,
        Self::OptionalComponentOf,
        Self::OptionalDependencyOf,
        Self::Other,
        Self::PackageOf,
        Self::PatchApplied,
        Self::PatchFor,
        Self::PrerequisiteFor,
        Self::ProvidedDependencyOf,
        Self::RequirementDescriptionOf,
        Self::RuntimeDependencyOf,
        Self::SpecificationFor,
        Self::StaticLink,
        Self::TestCaseOf,
        Self::TestDependencyOf,
        Self::TestOf,
        Self::TestToolOf,
        Self::VariantOf,
    ];

    /// The SCREAMING_SNAKE name used in tag-value relationship lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Amends => "AMENDS",
            Self::AncestorOf => "ANCESTOR_OF",
            Self::BuildDependencyOf => "BUILD_DEPENDENCY_OF",
            Self::BuildToolOf => "BUILD_TOOL_OF",
            Self::ContainedBy => "CONTAINED_BY",
            Self::Contains => "CONTAINS",
            Self::CopyOf => "COPY_OF",
            Self::DataFileOf => "DATA_FILE_OF",
            Self::DependencyManifestOf => "DEPENDENCY_MANIFEST_OF",
            Self::DependencyOf => "DEPENDENCY_OF",
            Self::DependsOn => "DEPENDS_ON",
            Self::DescendantOf => "DESCENDANT_OF",
            Self::DescribedBy => "DESCRIBED_BY",
            Self::Describes => "DESCRIBES",
            Self::DevDependencyOf => "DEV_DEPENDENCY_OF",
            Self::DevToolOf => "DEV_TOOL_OF",
            Self::DistributionArtifact => "DISTRIBUTION_ARTIFACT",
            Self::DocumentationOf => "DOCUMENTATION_OF",
            Self::DynamicLink => "DYNAMIC_LINK",
            Self::ExampleOf => "EXAMPLE_OF",
            Self::ExpandedFromArchive => "EXPANDED_FROM_ARCHIVE",
            Self::FileAdded => "FILE_ADDED",
            Self::FileDeleted => "FILE_DELETED",
            Self::FileModified => "FILE_MODIFIED",
            Self::GeneratedFrom => "GENERATED_FROM",
            Self::Generates => "GENERATES",
            Self::HasPrerequisite => "HAS_PREREQUISITE",
            Self::MetafileOf => "METAFILE_OF",
            Self::OptionalComponentOf => "OPTIONAL_COMPONENT_OF",
            Self::OptionalDependencyOf => "OPTIONAL_DEPENDENCY_OF",
            Self::Other => "OTHER",
            Self::PackageOf => "PACKAGE_OF",
            Self::PatchApplied => "PATCH_APPLIED",
            Self::PatchFor => "PATCH_FOR",
            Self::PrerequisiteFor => "PREREQUISITE_FOR",
            Self::ProvidedDependencyOf => "PROVIDED_DEPENDENCY_OF",
            Self::RequirementDescriptionOf => "REQUIREMENT_DESCRIPTION_OF",
            Self::RuntimeDependencyOf => "RUNTIME_DEPENDENCY_OF",
            Self::SpecificationFor => "SPECIFICATION_FOR",
            Self::StaticLink => "STATIC_LINK",
            Self::TestCaseOf => "TEST_CASE_OF",
            Self::TestDependencyOf => "TEST_DEPENDENCY_OF",
            Self::TestOf => "TEST_OF",
            Self::TestToolOf => "TEST_TOOL_OF",
            Self::VariantOf => "VARIANT_OF",
        }
    }

    /// Resolve a relationship type name. Case-sensitive, exact match.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The right-hand side of a relationship line.
///
/// Targets may be forward references or external composites
/// (`DocumentRef-x:SPDXRef-y`); they are never resolved during parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipTarget {
    SpdxId(String),
    NoAssertion,
    None,
}

impl RelationshipTarget {
    /// Interpret a target token, resolving sentinels.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "NOASSERTION" => Self::NoAssertion,
            "NONE" => Self::None,
            id => Self::SpdxId(id.to_string()),
        }
    }

    /// The plain id, if this target is one.
    #[must_use]
    pub fn spdx_id(&self) -> Option<&str> {
        match self {
            Self::SpdxId(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for RelationshipTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpdxId(id) => write!(f, "{id}"),
            Self::NoAssertion => write!(f, "NOASSERTION"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// One relationship edge, explicit or synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub spdx_element_id: String,
    pub relationship_type: RelationshipType,
    pub related_spdx_element: RelationshipTarget,
    pub comment: Option<String>,
}

impl Relationship {
    /// Create a relationship without a comment.
    #[must_use]
    pub fn new(
        spdx_element_id: impl Into<String>,
        relationship_type: RelationshipType,
        related_spdx_element: RelationshipTarget,
    ) -> Self {
        Self {
            spdx_element_id: spdx_element_id.into(),
            relationship_type,
            related_spdx_element,
            comment: None,
        }
    }
}
