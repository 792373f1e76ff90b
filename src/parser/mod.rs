//! SPDX tag-value parsing.
//!
//! The parse runs in two stages: the [`tokenizer`] splits raw text into
//! `Tag: value` records (resolving `<text>` blocks), then the [`builder`]
//! streams those records through a scope-tracking state machine that fills a
//! [`Document`]. Structural errors accumulate instead of aborting, so one run
//! reports everything wrong with a document; only malformed lines and unknown
//! tags cut the parse short.
//!
//! ## Usage
//!
//! ```no_run
//! use spdx_tagvalue::parser::parse_tag_value_file;
//! use std::path::Path;
//!
//! let doc = parse_tag_value_file(Path::new("document.spdx")).unwrap();
//! println!("{}", doc.summary());
//! ```

mod builder;
mod context;
pub mod tokenizer;
mod values;

pub use builder::Builder;
pub use context::{EntityKind, Tag};
pub use tokenizer::{tokenize, Record};
pub use values::{
    parse_actor, parse_checksum, parse_date, parse_external_document_ref, parse_range,
    parse_relationship, parse_verification_code, ActorError, RelationshipError,
};

use crate::error::{Result, TagValueError};
use crate::model::Document;
use std::path::Path;

/// Parse a tag-value document from a string.
///
/// Succeeds only when the input is structurally clean; otherwise fails with
/// the ordered list of every recorded error.
pub fn parse_tag_value(text: &str) -> Result<Document> {
    let records = tokenize(text)?;
    tracing::debug!(records = records.len(), "tokenized tag-value input");
    let mut builder = Builder::new();
    for record in &records {
        builder.handle_record(record)?;
    }
    builder.finish()
}

/// Parse a tag-value document from a file.
pub fn parse_tag_value_file(path: &Path) -> Result<Document> {
    tracing::info!(path = %path.display(), "parsing tag-value document");
    let text = std::fs::read_to_string(path).map_err(|err| TagValueError::io(path, err))?;
    parse_tag_value(&text)
}
