//! Build pipeline for Angular apps that run inside a web worker.
//!
//! Every worker app is compiled ahead of time with `ngc` into a shared work
//! directory and then bundled twice by webpack: once for the UI bootstrap
//! page (`main.js` plus `index.html`) and once for the worker
//! (`app-worker.js`).
//!
//! ```ignore
//! let project = Project::from_file(&ProjectFile::open(".angular-cli.json")?);
//! let driver = Driver::new(
//!     Box::new(NgcCompiler::new("node_modules/.bin/ngc")),
//!     Box::new(WebpackBundler::new("node_modules/.bin/webpack")),
//!     DriverOptions::default(),
//! );
//! let report = driver.run(&project).await?;
//! ```

mod app;
pub mod bundle;
mod compiler;
mod diagnostic;
mod discovery;
mod driver;
mod error;
mod paths;
mod runner;
mod stats;

pub use app::{AppDefinition, MAIN_WORKER, MAIN_WORKER_UI, WORKER_TSCONFIG};
pub use compiler::{CompileRequest, CompiledOutput, Compiler, NgcCompiler};
pub use diagnostic::{Diagnostic, Severity};
pub use discovery::{Discovery, Project, discover, get_apps};
pub use driver::{AppOutcome, AppReport, Driver, DriverOptions, Plan, RunReport, Stage};
pub use error::{BundlerError, CompileError, Error, Result};
pub use runner::{Bundler, WebpackBundler, run_bundler};
pub use stats::{Asset, BundleStats, CompilationStats, StatsMessage};
