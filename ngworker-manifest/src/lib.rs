//! Configuration inputs for the ngworker build pipeline.
//!
//! Two files are read here:
//!
//! - the project configuration (`.angular-cli.json`), which declares the apps
//! - the optional tool settings (`ngworker.toml`)
//!
//! Both produce [`miette`] diagnostics pointing into the offending file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod project;
mod settings;
mod span;

pub use error::{Error, Result, SourceContext};
pub use project::{AppEntry, DEFAULT_PROJECT_FILE, ProjectConfig, ProjectFile, parse_project};
pub use settings::{
    DEFAULT_NAMESPACE, DEFAULT_SETTINGS_FILE, DEFAULT_WORK_DIR, FailurePolicy, Settings, Tools,
    parse_settings,
};
