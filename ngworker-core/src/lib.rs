//! Core utilities and types for the ngworker build pipeline.
//!
//! This crate provides the filesystem helpers and the small JavaScript
//! rendering toolkit shared by the other ngworker crates.

mod builder;
mod file;
mod js;

// Code rendering
pub use builder::{CodeBuilder, Indent};
// File operations
pub use file::{GeneratedFile, recreate_dir, remove_dir_if_exists};
// JavaScript expressions
pub use js::{JsExpr, JsObject};
