//! Render command handler.
//!
//! Parses a tag-value document and re-emits it, either as normalized
//! tag-value text or as JSON.

use crate::parser::parse_tag_value_file;
use crate::writer::write_tag_value_string;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Output format for the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Normalized tag-value text
    TagValue,
    /// Pretty-printed JSON
    Json,
}

/// Run the render command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_render(
    path: PathBuf,
    format: RenderFormat,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let document = parse_tag_value_file(&path)?;

    let content = match format {
        RenderFormat::TagValue => write_tag_value_string(&document),
        RenderFormat::Json => serde_json::to_string_pretty(&document)
            .context("failed to serialize document as JSON")?,
    };

    match output_file {
        Some(out_path) => std::fs::write(&out_path, content)
            .with_context(|| format!("failed to write {}", out_path.display()))?,
        None => print!("{content}"),
    }
    Ok(())
}
