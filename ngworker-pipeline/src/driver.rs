//! Pipeline driver: the only place that knows about ordering across apps
//! and across build phases.

use std::{
    error::Error as StdError,
    fmt,
    path::{Path, PathBuf},
};

use ngworker_core::recreate_dir;
use ngworker_manifest::{DEFAULT_NAMESPACE, DEFAULT_WORK_DIR, FailurePolicy};
use tracing::{error, info, warn};

use crate::{
    app::{AppDefinition, WORKER_TSCONFIG},
    compiler::Compiler,
    discovery::{Project, discover},
    error::{BundlerError, CompileError, Error, Result},
    runner::Bundler,
    stats::BundleStats,
};

/// Knobs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    /// Intermediate build directory, relative to the project directory.
    pub work_dir: PathBuf,
    pub on_failure: FailurePolicy,
    /// Label of the opening and closing banner lines.
    pub namespace: String,
    /// Build only these apps. Empty means every worker app.
    pub only: Vec<String>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            on_failure: FailurePolicy::default(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            only: Vec::new(),
        }
    }
}

/// Phase of an app's build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clean,
    Compile,
    Bundle,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Clean => write!(f, "clean"),
            Stage::Compile => write!(f, "compile"),
            Stage::Bundle => write!(f, "bundle"),
        }
    }
}

/// What happened to one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    /// Both bundles were attempted. The stats may still carry compile errors.
    Built { stats: BundleStats },
    Failed {
        stage: Stage,
        message: String,
        /// Tool output worth showing, e.g. compiler diagnostics.
        details: Option<String>,
    },
    /// Not attempted because an earlier app failed.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppReport {
    pub name: String,
    pub out_dir: PathBuf,
    pub outcome: AppOutcome,
}

impl AppReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, AppOutcome::Failed { .. })
    }
}

/// Result of a whole run, one entry per selected worker app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub namespace: String,
    pub work_dir: PathBuf,
    pub apps: Vec<AppReport>,
    /// Declared apps that are not worker apps.
    pub non_worker_apps: Vec<String>,
}

impl RunReport {
    pub fn built(&self) -> usize {
        self.count(|o| matches!(o, AppOutcome::Built { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AppOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, AppOutcome::Skipped))
    }

    /// No app failed. A run without worker apps is successful.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, f: impl Fn(&AppOutcome) -> bool) -> usize {
        self.apps.iter().filter(|app| f(&app.outcome)).count()
    }
}

/// What a run would do, without doing it.
#[derive(Debug, Clone)]
pub struct Plan {
    pub work_dir: PathBuf,
    pub apps: Vec<AppDefinition>,
    pub non_worker_apps: Vec<String>,
}

/// Runs the build pipeline over a project.
///
/// Apps are processed one at a time, in discovery order. Each app is
/// cleaned, compiled and bundled before the next one starts.
pub struct Driver {
    compiler: Box<dyn Compiler>,
    bundler: Box<dyn Bundler>,
    options: DriverOptions,
}

impl Driver {
    pub fn new(
        compiler: Box<dyn Compiler>,
        bundler: Box<dyn Bundler>,
        options: DriverOptions,
    ) -> Self {
        Self {
            compiler,
            bundler,
            options,
        }
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Discover and select apps. Touches nothing on disk.
    ///
    /// Fails when clearing the work directory or an app's output directory
    /// would remove sources or the project itself.
    pub fn plan(&self, project: &Project) -> Result<Plan> {
        let discovery = discover(project);
        let non_worker_apps = discovery.skipped.iter().map(|e| e.name.clone()).collect();
        let apps = select(&self.options.only, discovery.apps, project)?;

        project.check_work_dir(&self.options.work_dir)?;
        for app in &apps {
            app.check_out_dir()?;
        }
        Ok(Plan {
            work_dir: project.resolve(&self.options.work_dir),
            apps,
            non_worker_apps,
        })
    }

    /// Full cold build of every selected worker app.
    pub async fn run(&self, project: &Project) -> Result<RunReport> {
        let namespace = &self.options.namespace;
        info!("<{namespace}>");

        let plan = self.plan(project)?;

        info!("Clearing '{}'.", self.options.work_dir.display());
        recreate_dir(&plan.work_dir).map_err(|source| Error::ClearWorkDir {
            path: plan.work_dir.clone(),
            source,
        })?;

        let mut report = RunReport {
            namespace: namespace.clone(),
            work_dir: plan.work_dir.clone(),
            apps: Vec::with_capacity(plan.apps.len()),
            non_worker_apps: plan.non_worker_apps,
        };

        if plan.apps.is_empty() {
            warn!("No web worker apps found.");
            info!("</{namespace}>");
            return Ok(report);
        }

        let mut aborted = false;
        for app in &plan.apps {
            let outcome = if aborted {
                AppOutcome::Skipped
            } else {
                self.build_app(app, &plan.work_dir).await
            };

            if matches!(outcome, AppOutcome::Failed { .. })
                && self.options.on_failure == FailurePolicy::Abort
            {
                aborted = true;
            }

            report.apps.push(AppReport {
                name: app.name.clone(),
                out_dir: app.out_dir.clone(),
                outcome,
            });
        }

        info!(
            "Built {} of {} app(s), {} failed, {} skipped.",
            report.built(),
            report.apps.len(),
            report.failed(),
            report.skipped()
        );
        info!("</{namespace}>");
        Ok(report)
    }

    async fn build_app(&self, app: &AppDefinition, work_dir: &Path) -> AppOutcome {
        if let Err(e) = app.clean_out_dir() {
            return failed(app, Stage::Clean, &e, None);
        }

        // Blocking; the run has nothing else to do meanwhile.
        let compiled = match app.ngc_compile(self.compiler.as_ref(), work_dir) {
            Ok(compiled) => compiled,
            Err(e) => {
                let details = match &e {
                    CompileError::Failed { output, .. } if !output.trim().is_empty() => {
                        Some(output.clone())
                    }
                    _ => None,
                };
                return failed(app, Stage::Compile, &e, details);
            }
        };

        match app.build(self.bundler.as_ref(), &compiled).await {
            Ok(stats) => AppOutcome::Built { stats },
            Err(e) => {
                let details = match &e {
                    BundlerError::NoStats { stderr, .. } if !stderr.trim().is_empty() => {
                        Some(stderr.clone())
                    }
                    _ => None,
                };
                failed(app, Stage::Bundle, &e, details)
            }
        }
    }
}

fn failed(
    app: &AppDefinition,
    stage: Stage,
    err: &dyn StdError,
    details: Option<String>,
) -> AppOutcome {
    let message = error_chain(err);
    error!(app = %app.name, %stage, "{message}");
    AppOutcome::Failed {
        stage,
        message,
        details,
    }
}

/// `err` followed by each of its sources, colon separated.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn select(only: &[String], apps: Vec<AppDefinition>, project: &Project) -> Result<Vec<AppDefinition>> {
    if only.is_empty() {
        return Ok(apps);
    }

    for name in only {
        if apps.iter().any(|app| &app.name == name) {
            continue;
        }
        return Err(match project.config().app(name) {
            Some(entry) => Error::NotAWorkerApp {
                name: name.clone(),
                root: entry.root.clone(),
                tsconfig: WORKER_TSCONFIG,
            },
            None => Error::UnknownApp { name: name.clone() },
        });
    }

    Ok(apps
        .into_iter()
        .filter(|app| only.contains(&app.name))
        .collect())
}
