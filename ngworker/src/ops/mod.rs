//! Core operations.
//!
//! This module contains the business logic for ngworker commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod check;
pub mod clean;
pub mod inspect;
pub mod list;

pub use build::{build, plan};
pub use check::check;
pub use clean::clean;
pub use inspect::inspect;
pub use list::list;
