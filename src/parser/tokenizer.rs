//! Splits raw tag-value text into logical records.
//!
//! A record is one `Tag: value` line, except that a value opening a `<text>`
//! marker runs until the matching `</text>`, across embedded colons, blank
//! lines, and `#` lines. The record keeps the line number of its opening line
//! for diagnostics.

use crate::error::{Result, TagValueError};
use regex::Regex;
use std::sync::LazyLock;

/// One logical tag-value record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number of the opening line
    pub line: usize,
    /// Tag name, without the colon
    pub tag: String,
    /// Value with surrounding whitespace trimmed, or the verbatim content of
    /// a `<text>` block
    pub value: String,
}

static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z0-9]*)\s*:(.*)$").expect("static regex"));

const TEXT_OPEN: &str = "<text>";
const TEXT_CLOSE: &str = "</text>";

/// Tokenize `text` into records.
///
/// Blank lines and lines whose first non-space character is `#` are skipped
/// outside text blocks. A non-blank line that is neither of those and does
/// not match `Tag: value` is fatal, as is an unterminated `<text>` block.
pub fn tokenize(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(captures) = RECORD_RE.captures(line) else {
            return Err(TagValueError::malformed(
                line_no,
                "line is not of the form 'Tag: value'",
            ));
        };
        let tag = captures[1].to_string();
        let rest = captures[2].trim();

        let value = if let Some(opened) = rest.strip_prefix(TEXT_OPEN) {
            read_text_block(opened, line_no, &mut lines)?
        } else {
            rest.to_string()
        };

        records.push(Record {
            line: line_no,
            tag,
            value,
        });
    }

    Ok(records)
}

/// Consume a `<text>` block whose opening line carried `first` after the
/// marker. Returns the merged content with both markers stripped; inner
/// whitespace and newlines are preserved verbatim.
fn read_text_block<'a>(
    first: &str,
    open_line: usize,
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Result<String> {
    // Single-line block.
    if let Some(position) = first.find(TEXT_CLOSE) {
        let trailing = &first[position + TEXT_CLOSE.len()..];
        if !trailing.trim().is_empty() {
            return Err(TagValueError::malformed(
                open_line,
                "content after closing </text> marker",
            ));
        }
        return Ok(first[..position].to_string());
    }

    let mut content = first.to_string();
    for (index, line) in lines {
        let Some(position) = line.find(TEXT_CLOSE) else {
            content.push('\n');
            content.push_str(line);
            continue;
        };
        let trailing = &line[position + TEXT_CLOSE.len()..];
        if !trailing.trim().is_empty() {
            return Err(TagValueError::malformed(
                index + 1,
                "content after closing </text> marker",
            ));
        }
        content.push('\n');
        content.push_str(&line[..position]);
        return Ok(content);
    }

    Err(TagValueError::malformed(
        open_line,
        "unterminated <text> block",
    ))
}
