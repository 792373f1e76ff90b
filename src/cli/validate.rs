//! Validate command handler.
//!
//! Parses a tag-value document and reports either a one-line summary or the
//! full ordered error list.

use crate::parser::parse_tag_value_file;
use anyhow::Result;
use std::path::PathBuf;

/// Run the validate command.
///
/// Exits with code 1 when the document has structural errors.
#[allow(clippy::needless_pass_by_value)]
pub fn run_validate(path: PathBuf, quiet: bool) -> Result<()> {
    match parse_tag_value_file(&path) {
        Ok(document) => {
            if !quiet {
                println!("{}: OK ({})", path.display(), document.summary());
            }
            Ok(())
        }
        Err(err) => {
            let messages = err.messages();
            if !quiet {
                eprintln!("{}: {} error(s)", path.display(), messages.len());
                for message in &messages {
                    eprintln!("  {message}");
                }
            }
            std::process::exit(1);
        }
    }
}
