//! Check operation - configuration and source validation.

use std::{collections::HashMap, path::Path};

use ngworker_pipeline::{AppDefinition, discover};

use crate::{reports::CheckReport, session::Session};

/// Bootstrap sources every worker app compiles from.
const BOOTSTRAP_SOURCES: [&str; 2] = ["main.worker-ui.ts", "main.worker.ts"];

/// Execute the check operation.
///
/// Configuration errors never get here; they exit while loading. This looks
/// at what the configuration points to.
pub fn check(session: &Session) -> CheckReport {
    let project = &session.project;
    let discovery = discover(project);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for app in &discovery.apps {
        warnings.extend(missing_files(app));
    }

    // A later app's clean would delete an earlier app's bundles.
    let mut out_dirs: HashMap<&Path, &str> = HashMap::new();
    for app in &discovery.apps {
        if let Some(first) = out_dirs.insert(app.out_dir.as_path(), &app.name) {
            errors.push(format!(
                "worker apps '{}' and '{}' share output directory '{}'",
                first,
                app.name,
                app.out_dir.display()
            ));
        }
    }

    let tools = &session.settings.tools;
    for (name, tool) in [("ngc", &tools.ngc), ("webpack", &tools.webpack)] {
        // Bare names are looked up on PATH at run time.
        if tool.components().count() > 1 && !project.resolve(tool).is_file() {
            warnings.push(format!("{} not found at '{}'", name, tool.display()));
        }
    }

    CheckReport {
        config_path: session.project_path.clone(),
        worker_apps: discovery.apps.iter().map(|a| a.name.clone()).collect(),
        non_worker_apps: discovery.skipped.iter().map(|e| e.name.clone()).collect(),
        errors,
        warnings,
    }
}

fn missing_files(app: &AppDefinition) -> Vec<String> {
    let mut warnings = Vec::new();
    for source in BOOTSTRAP_SOURCES {
        let path = app.from_root(source);
        if !app.resolve(&path).is_file() {
            warnings.push(format!(
                "app '{}' has no bootstrap source '{}'",
                app.name,
                path.display()
            ));
        }
    }
    if !app.template_path().is_file() {
        warnings.push(format!(
            "app '{}' has no index template '{}'",
            app.name,
            app.from_root(&app.index).display()
        ));
    }
    warnings
}
