//! Inspect operation - render bundler configuration without building.

use eyre::Result;
use ngworker_core::GeneratedFile;
use ngworker_pipeline::{CompiledOutput, bundle::WebpackConfigModule};

use super::build::{BuildOptions, driver};
use crate::{
    reports::{InspectReport, InspectedModule},
    session::Session,
};

/// Render the configuration module each selected worker app would be
/// bundled with. Nothing is compiled or written.
pub fn inspect(session: &Session, only: Vec<String>) -> Result<InspectReport> {
    let driver = driver(
        session,
        BuildOptions {
            only,
            keep_going: false,
        },
    );
    let plan = driver.plan(&session.project)?;

    let modules = plan
        .apps
        .iter()
        .map(|app| {
            let compiled = CompiledOutput {
                dir: app.compiled_dir(&plan.work_dir),
            };
            let batch = app.bundle_batch(&compiled);
            let module = WebpackConfigModule::new(&batch);
            InspectedModule {
                app: app.name.clone(),
                path: module.path(&batch.config_dir),
                content: module.render(),
            }
        })
        .collect();

    Ok(InspectReport { modules })
}
