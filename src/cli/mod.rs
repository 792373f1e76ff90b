//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by
//! main.rs. Each handler implements the business logic for a specific CLI
//! subcommand.

mod render;
mod validate;

pub use render::{run_render, RenderFormat};
pub use validate::run_validate;
