//! Bundle runner: submits both configurations of an app as one batch.

use std::{path::PathBuf, process::Stdio};

use async_trait::async_trait;
use ngworker_core::GeneratedFile;
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::{
    bundle::{BundleBatch, WebpackConfigModule},
    compiler::resolve_tool,
    error::BundlerError,
    stats::BundleStats,
};

/// Runs the bundler over a batch of configurations.
///
/// Only failure to run the bundler at all is an error. Compile errors inside
/// a bundle come back as part of [`BundleStats`].
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, batch: &BundleBatch) -> Result<BundleStats, BundlerError>;
}

/// Runs the `webpack` executable against a rendered configuration module.
#[derive(Debug, Clone)]
pub struct WebpackBundler {
    executable: PathBuf,
}

impl WebpackBundler {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

#[async_trait]
impl Bundler for WebpackBundler {
    async fn bundle(&self, batch: &BundleBatch) -> Result<BundleStats, BundlerError> {
        let module = WebpackConfigModule::new(batch);
        let config_path = module.path(&batch.config_dir);
        module
            .write(&batch.config_dir)
            .map_err(|source| BundlerError::WriteConfig {
                path: config_path.clone(),
                source,
            })?;

        let program = resolve_tool(&self.executable, &batch.working_dir);
        debug!(program = %program.display(), config = %config_path.display(), "spawning bundler");

        let output = Command::new(&program)
            .arg("--config")
            .arg(&config_path)
            .arg("--json")
            .current_dir(&batch.working_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| BundlerError::Spawn {
                program: program.clone(),
                source,
            })?;

        // webpack exits non-zero on compile errors but still prints stats.
        let stdout = String::from_utf8_lossy(&output.stdout);
        BundleStats::parse(&stdout).map_err(|source| BundlerError::NoStats {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            source,
        })
    }
}

/// Run `bundler` over `batch` and print what it reports.
///
/// Errors go to the error log stream and warnings to the warning stream;
/// neither fails the batch. The summary always goes to standard output.
pub async fn run_bundler(
    bundler: &dyn Bundler,
    batch: &BundleBatch,
) -> Result<BundleStats, BundlerError> {
    let stats = bundler.bundle(batch).await?;

    for diagnostic in stats.diagnostics() {
        if diagnostic.severity.is_error() {
            error!(app = %batch.app, "{}", diagnostic);
        } else {
            warn!(app = %batch.app, "{}", diagnostic);
        }
    }

    println!("\n{}", stats.summary());
    Ok(stats)
}
