//! Low-level value predicates used by the parser.
//!
//! These check the lexical shape of identifiers and namespaces; structural
//! document validation beyond what the builder enforces is out of scope.

use regex::Regex;
use std::sync::LazyLock;

static SPDX_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SPDXRef-[A-Za-z0-9.\-]+$").expect("static regex"));

static EXTERNAL_DOC_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DocumentRef-[A-Za-z0-9.\-]+$").expect("static regex"));

static NAMESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://\S+$").expect("static regex"));

/// Whether `value` is a well-formed element id (`SPDXRef-` plus an idstring
/// of letters, digits, `.`, and `-`).
#[must_use]
pub fn validate_spdx_id(value: &str) -> bool {
    SPDX_ID_RE.is_match(value)
}

/// Whether `value` is a well-formed external document id (`DocumentRef-`
/// plus an idstring).
#[must_use]
pub fn validate_external_document_id(value: &str) -> bool {
    EXTERNAL_DOC_ID_RE.is_match(value)
}

/// Whether `value` is a usable document namespace: an absolute URI without
/// whitespace or a fragment part.
#[must_use]
pub fn validate_document_namespace(value: &str) -> bool {
    NAMESPACE_RE.is_match(value) && !value.contains('#')
}
