//! License expressions, license fields, and extracted licensing info.
//!
//! Expression validity is delegated to the `spdx` crate. The parse mode
//! accepts lowercase operators and the GPL postfix `+`, but rejects `/` as an
//! OR operator and imprecise license names, so `(LicenseRef-2.0 and
//! Apache-2.0)` parses while `LicenseRef-foo/bar` does not.

use serde::{Deserialize, Serialize};
use std::fmt;

const EXPRESSION_PARSE_MODE: spdx::ParseMode = spdx::ParseMode {
    allow_lower_case_operators: true,
    allow_slash_as_or_operator: false,
    allow_imprecise_license_names: false,
    allow_postfix_plus_on_gpl: true,
};

/// A validated SPDX license expression, kept in its source spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseExpression(String);

impl LicenseExpression {
    /// Validate `expr` against the SPDX expression grammar.
    ///
    /// On failure returns the `spdx` crate's reason text, prefixed with the
    /// offending expression.
    pub fn parse(expr: &str) -> Result<Self, String> {
        let expr = expr.trim();
        match spdx::Expression::parse_mode(expr, EXPRESSION_PARSE_MODE) {
            Ok(_) => Ok(Self(expr.to_string())),
            Err(err) => Err(format!("{expr}: {}", err.reason)),
        }
    }

    /// The expression as written in the document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A license-valued field: an expression, `NOASSERTION`, or `NONE`.
///
/// Sentinels resolve before expression parsing, so a literal `NONE` in a
/// license position is the sentinel, never the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseField {
    Expression(LicenseExpression),
    NoAssertion,
    None,
}

impl LicenseField {
    /// Parse a license field value, resolving sentinels first.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim() {
            "NOASSERTION" => Ok(Self::NoAssertion),
            "NONE" => Ok(Self::None),
            expr => LicenseExpression::parse(expr).map(Self::Expression),
        }
    }
}

impl fmt::Display for LicenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::NoAssertion => write!(f, "NOASSERTION"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// A license not on the SPDX list, extracted from the analyzed artifacts.
///
/// Opened by `LicenseID`; the id is inherent to the opening tag, every other
/// field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLicensingInfo {
    /// `LicenseRef-` identifier from the opening tag
    pub license_id: String,
    /// Verbatim license text
    pub extracted_text: Option<String>,
    /// Human-readable license name
    pub name: Option<String>,
    /// Pointers to the license online
    pub cross_references: Vec<String>,
    pub comment: Option<String>,
}

impl ExtractedLicensingInfo {
    /// Create an extracted licensing info with only its id set.
    #[must_use]
    pub fn new(license_id: impl Into<String>) -> Self {
        Self {
            license_id: license_id.into(),
            extracted_text: None,
            name: None,
            cross_references: Vec::new(),
            comment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_expression() {
        let expr = LicenseExpression::parse("Apache-2.0").unwrap();
        assert_eq!(expr.as_str(), "Apache-2.0");
    }

    #[test]
    fn test_parse_keeps_source_spelling() {
        let expr = LicenseExpression::parse("(LicenseRef-2.0 and Apache-2.0)").unwrap();
        assert_eq!(expr.as_str(), "(LicenseRef-2.0 and Apache-2.0)");
    }

    #[test]
    fn test_parse_rejects_slash() {
        let err = LicenseExpression::parse("LicenseRef-foo/bar").unwrap_err();
        assert!(err.starts_with("LicenseRef-foo/bar: "));
    }

    #[test]
    fn test_field_sentinels_resolve_before_parsing() {
        assert_eq!(
            LicenseField::parse("NOASSERTION"),
            Ok(LicenseField::NoAssertion)
        );
        assert_eq!(LicenseField::parse("NONE"), Ok(LicenseField::None));
        assert!(matches!(
            LicenseField::parse("MIT"),
            Ok(LicenseField::Expression(_))
        ));
    }
}
