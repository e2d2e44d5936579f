//! Check command report data structures.

use std::path::PathBuf;

use ngworker_pipeline::WORKER_TSCONFIG;

use super::output::{Output, Report};

/// Report data from configuration validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the project configuration.
    pub config_path: PathBuf,
    pub worker_apps: Vec<String>,
    pub non_worker_apps: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        }

        let count = self.worker_apps.len();
        out.newline();
        out.section(&format!(
            "{} worker app{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for name in &self.worker_apps {
            out.list_item(name);
        }

        if !self.non_worker_apps.is_empty() {
            out.newline();
            out.section(&format!("Skipped (no {})", WORKER_TSCONFIG));
            for name in &self.non_worker_apps {
                out.list_item(name);
            }
        }
    }
}
