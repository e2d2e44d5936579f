//! Error types for the build pipeline.

use std::{
    io,
    path::PathBuf,
    process::ExitStatus,
};

use thiserror::Error;

/// Result type for pipeline-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a whole run rather than a single app.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to clear '{path}'")]
    ClearWorkDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("refusing to clear work directory '{path}' because it contains '{contains}'")]
    UnsafeWorkDir { path: PathBuf, contains: PathBuf },

    #[error("refusing to clear output directory '{path}' of app '{name}' because it contains '{contains}'")]
    UnsafeOutDir {
        name: String,
        path: PathBuf,
        contains: PathBuf,
    },

    #[error("unknown app '{name}'")]
    UnknownApp { name: String },

    #[error("app '{name}' is not a worker app (no '{tsconfig}' in '{root}')")]
    NotAWorkerApp {
        name: String,
        root: PathBuf,
        tsconfig: &'static str,
    },
}

/// Failure of the ahead-of-time compiler for one app.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to run '{program}'")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status} while compiling '{tsconfig}'")]
    Failed {
        program: PathBuf,
        tsconfig: PathBuf,
        status: ExitStatus,
        /// Combined stdout and stderr of the compiler.
        output: String,
    },

    #[error("compilation finished but '{path}' was not produced")]
    MissingOutput { path: PathBuf },
}

/// Failure to run the bundler at all (not a compile error inside a bundle).
#[derive(Debug, Error)]
pub enum BundlerError {
    #[error("failed to write bundler configuration '{path}'")]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run '{program}'")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bundler exited with {status} without reporting statistics")]
    NoStats {
        status: ExitStatus,
        stderr: String,
        #[source]
        source: serde_json::Error,
    },
}
