//! **A parser, validator, and writer for SPDX tag-value documents.**
//!
//! `spdx-tagvalue` reads SPDX 2.x software bills of materials in the
//! tag-value format and builds a typed [`model::Document`], reporting every
//! structural problem in a single pass instead of stopping at the first. It
//! powers both a command-line interface for validating and converting
//! documents and a Rust library for programmatic use.
//!
//! ## Key Features
//!
//! - **Exhaustive error reporting**: one parse collects every cardinality,
//!   order, and value error in the document, grouped per entity instance, in
//!   the order they appear.
//! - **Scope tracking**: `Tag: value` records are interpreted against the
//!   entity currently in scope, so a bare `SPDXID` lands on the document,
//!   package, or file it belongs to.
//! - **Relationship inference**: files declared under a package become
//!   `CONTAINS` relationships automatically, without duplicating explicitly
//!   declared edges.
//! - **License validation**: license expressions are checked against the
//!   SPDX expression grammar via the `spdx` crate.
//! - **Round-trip writing**: documents serialize back to tag-value text (or
//!   JSON) in the conventional section layout, nesting files under their
//!   packages.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the document types — [`model::Document`] and the
//!   entities hanging off it (packages, files, snippets, relationships,
//!   annotations, extracted licensing info).
//! - **[`parser`]**: the tokenizer and the scope-tracking builder;
//!   [`parser::parse_tag_value`] and [`parser::parse_tag_value_file`] are
//!   the entry points.
//! - **[`writer`]**: tag-value serialization.
//! - **[`validate`]**: lexical predicates for SPDX identifiers and
//!   namespaces.
//!
//! ## Getting Started: Parsing a Document
//!
//! ```no_run
//! use std::path::Path;
//! use spdx_tagvalue::parse_tag_value_file;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = parse_tag_value_file(Path::new("path/to/document.spdx"))?;
//!
//!     println!(
//!         "Parsed '{}': {}",
//!         doc.name.as_deref().unwrap_or("Unknown"),
//!         doc.summary()
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! A failed parse carries the full message list:
//!
//! ```
//! use spdx_tagvalue::parse_tag_value;
//!
//! let err = parse_tag_value("PackageName: pkg\nPackageName: pkg\nPackageVersion: 1\nPackageVersion: 2\n")
//!     .unwrap_err();
//! for message in err.messages() {
//!     eprintln!("{message}");
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `old`/`new` or `min`/`mid` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod validate;
pub mod writer;

pub use error::{Result, TagValueError};
pub use model::Document;
pub use parser::{parse_tag_value, parse_tag_value_file};
pub use writer::{write_tag_value, write_tag_value_file, write_tag_value_string};
