//! Text transformations for KDL compendium files.
//!
//! Game content for a module is written as KDL nodes, usually one entry per file. Writing
//! them one file at a time is tedious though, so this crate helps moving between that layout
//! and a single *compendium* file, in which every entry is preceded by a `//!<name>` marker
//! line:
//!
//! - [`split`] breaks a compendium into one file per marker (and can join them back),
//! - [`marker`] normalizes marker names to camel-case,
//! - [`variants`] expands a template into a file per variant,
//! - [`tags`] injects class tags into spell entries.
//!
//! None of these parse KDL itself: every transformation works on lines and literal text.

pub mod marker;
pub mod split;
pub mod tags;
pub mod variants;

pub use split::{split_path, Compendium};
