//! Build command report data structures.

use std::path::PathBuf;

use ngworker_manifest::FailurePolicy;
use ngworker_pipeline::{AppOutcome, RunReport, WORKER_TSCONFIG};

use super::output::{Output, Report};

/// Report data from a finished build run.
#[derive(Debug)]
pub struct BuildReport {
    pub run: RunReport,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.run.is_success()
    }
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        if self.run.apps.is_empty() {
            return;
        }

        out.section("Apps");
        for app in &self.run.apps {
            match &app.outcome {
                AppOutcome::Built { stats } => {
                    let errors = stats.diagnostics().iter().filter(|d| d.severity.is_error()).count();
                    if errors == 0 {
                        out.list_item(&format!("{} -> {}", app.name, app.out_dir.display()));
                    } else {
                        out.list_item(&format!(
                            "{} -> {} ({} bundle error{})",
                            app.name,
                            app.out_dir.display(),
                            errors,
                            if errors == 1 { "" } else { "s" }
                        ));
                    }
                }
                AppOutcome::Failed {
                    stage,
                    message,
                    details,
                } => {
                    out.error(&format!("{} failed during {}: {}", app.name, stage, message));
                    if let Some(details) = details {
                        out.preformatted(details.trim_end());
                    }
                }
                AppOutcome::Skipped => {
                    out.list_item(&format!("{} skipped", app.name));
                }
            }
        }
    }
}

/// One app of a dry run.
#[derive(Debug)]
pub struct PlannedApp {
    pub name: String,
    pub out_dir: PathBuf,
    pub tsconfig: PathBuf,
    pub compiled_dir: PathBuf,
}

/// Report data from a dry run.
#[derive(Debug)]
pub struct PlanReport {
    pub namespace: String,
    pub work_dir: PathBuf,
    pub on_failure: FailurePolicy,
    pub apps: Vec<PlannedApp>,
    pub non_worker_apps: Vec<String>,
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        out.key_value("Namespace", &self.namespace);
        out.key_value("Work directory", &self.work_dir.display().to_string());
        out.key_value("On failure", &self.on_failure.to_string());

        for name in &self.non_worker_apps {
            out.preformatted(&format!("Not a worker app (no {}): {}", WORKER_TSCONFIG, name));
        }

        if self.apps.is_empty() {
            out.newline();
            out.warning("No web worker apps found.");
            return;
        }

        for (i, app) in self.apps.iter().enumerate() {
            out.newline();
            out.section(&format!("{}. {}", i + 1, app.name));
            out.list_item(&format!("clear '{}'", app.out_dir.display()));
            out.list_item(&format!(
                "ngc -p '{}' -> '{}'",
                app.tsconfig.display(),
                app.compiled_dir.display()
            ));
            out.list_item(&format!(
                "webpack -> '{0}/main.js', '{0}/index.html', '{0}/app-worker.js'",
                app.out_dir.display()
            ));
        }
    }
}
