//! Pure sub-parsers for the mini-grammars embedded in tag values.
//!
//! Each function maps a value string to a typed result or a failure; none of
//! them touch parser state. Actor dispatch is an explicit ordered list of
//! (prefix, constructor) pairs instead of regex fallthrough, so the match
//! order Tool, Person, Organization is visible at a glance.

use crate::model::{
    Actor, ActorKind, Checksum, ChecksumAlgorithm, ExternalDocumentRef, PackageVerificationCode,
    RelationshipTarget, RelationshipType,
};
use crate::validate::validate_external_document_id;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Why an actor string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// No `Tool:`/`Person:`/`Organization:` prefix matched.
    NoMatch,
    /// The prefix matched but the name was empty after trimming.
    EmptyName(ActorKind),
}

impl fmt::Display for ActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => write!(f, "doesn't match any of person, organization or tool"),
            Self::EmptyName(kind) => write!(f, "no name for {kind} provided"),
        }
    }
}

/// Parse an actor value: `Tool: <name>`, `Person: <name> (<email>)`, or
/// `Organization: <name> (<email>)`, tried in that order.
///
/// A tool never carries an email; a parenthesized suffix stays part of its
/// name. For persons and organizations the email parentheses are optional
/// and an empty pair means no email.
pub fn parse_actor(value: &str) -> Result<Actor, ActorError> {
    const FORMS: [(&str, ActorKind); 3] = [
        ("Tool:", ActorKind::Tool),
        ("Person:", ActorKind::Person),
        ("Organization:", ActorKind::Organization),
    ];

    for (prefix, kind) in FORMS {
        let Some(rest) = value.trim_start().strip_prefix(prefix) else {
            continue;
        };
        if kind == ActorKind::Tool {
            let name = rest.trim();
            if name.is_empty() {
                return Err(ActorError::EmptyName(kind));
            }
            return Ok(Actor::tool(name));
        }

        let (name_part, email) = match rest.find('(') {
            Some(open) => (&rest[..open], parse_email(&rest[open..])),
            None => (rest, None),
        };
        let name = name_part.trim();
        if name.is_empty() {
            return Err(ActorError::EmptyName(kind));
        }
        return Ok(match kind {
            ActorKind::Person => Actor::person(name, email),
            _ => Actor::organization(name, email),
        });
    }

    Err(ActorError::NoMatch)
}

/// Extract an email from a `(...)` suffix; an empty or unclosed pair is no
/// email.
fn parse_email(parenthesized: &str) -> Option<String> {
    let rest = parenthesized.strip_prefix('(')?;
    let close = rest.rfind(')')?;
    let inner = rest[..close].trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

/// Why a relationship value failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipError {
    /// The value did not split into exactly three tokens.
    SplitFailed,
    /// The middle token is not a known relationship type.
    InvalidType(String),
}

/// Parse a relationship value: `<spdxId> <TYPE> <spdxId-or-sentinel>`.
pub fn parse_relationship(
    value: &str,
) -> Result<(String, RelationshipType, RelationshipTarget), RelationshipError> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [source, type_name, target] = parts.as_slice() else {
        return Err(RelationshipError::SplitFailed);
    };
    let relationship_type = RelationshipType::from_name(type_name)
        .ok_or_else(|| RelationshipError::InvalidType((*type_name).to_string()))?;
    Ok((
        (*source).to_string(),
        relationship_type,
        RelationshipTarget::parse(target),
    ))
}

/// Parse a checksum value: `ALGO: hex`, algorithm case-insensitive.
#[must_use]
pub fn parse_checksum(value: &str) -> Option<Checksum> {
    let (algo_part, hex_part) = value.split_once(':')?;
    let algorithm = ChecksumAlgorithm::from_name(algo_part)?;
    let hex = hex_part.trim();
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(Checksum::new(algorithm, hex.to_string()))
}

/// Parse an external document reference value:
/// `DocumentRef-<id> <uri> <ALGO>: <hex>`.
#[must_use]
pub fn parse_external_document_ref(value: &str) -> Option<ExternalDocumentRef> {
    let value = value.trim();
    let (ref_id, rest) = value.split_once(char::is_whitespace)?;
    if !validate_external_document_id(ref_id) {
        return None;
    }
    let (uri, checksum_part) = rest.trim_start().split_once(char::is_whitespace)?;
    let checksum = parse_checksum(checksum_part.trim_start())?;
    Some(ExternalDocumentRef {
        document_ref_id: ref_id.to_string(),
        document_uri: uri.to_string(),
        checksum,
    })
}

static VERIFICATION_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]+)\s*(?:\((.+)\))?$").expect("static regex"));

/// Parse a `PackageVerificationCode` value: a hex digest with an optional
/// parenthesized excludes list, itself optionally prefixed `excludes:`.
#[must_use]
pub fn parse_verification_code(value: &str) -> Option<PackageVerificationCode> {
    let captures = VERIFICATION_CODE_RE.captures(value.trim())?;
    let excluded_file_names = captures
        .get(2)
        .map(|excludes| {
            let inner = excludes.as_str().trim();
            let inner = inner.strip_prefix("excludes:").unwrap_or(inner);
            inner
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default();
    Some(PackageVerificationCode {
        value: captures[1].to_string(),
        excluded_file_names,
    })
}

/// Parse an SPDX timestamp: `YYYY-MM-DDTHH:MM:SSZ`, UTC only.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a `start:end` range of non-negative integers with `start <= end`.
#[must_use]
pub fn parse_range(value: &str) -> Option<(u64, u64)> {
    let (start, end) = value.split_once(':')?;
    let start: u64 = start.trim().parse().ok()?;
    let end: u64 = end.trim().parse().ok()?;
    if start > end {
        return None;
    }
    Some((start, end))
}
