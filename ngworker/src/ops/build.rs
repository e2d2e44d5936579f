//! Build operation - compile and bundle worker apps.

use eyre::Result;
use ngworker_manifest::FailurePolicy;
use ngworker_pipeline::Driver;

use crate::{
    reports::{BuildReport, PlanReport, PlannedApp},
    session::Session,
};

/// Options for the build operation.
pub struct BuildOptions {
    /// Restrict the run to these apps.
    pub only: Vec<String>,
    /// Keep building after an app failed.
    pub keep_going: bool,
}

pub(crate) fn driver(session: &Session, opts: BuildOptions) -> Driver {
    let mut options = session.driver_options();
    options.only = opts.only;
    if opts.keep_going {
        options.on_failure = FailurePolicy::Continue;
    }
    Driver::new(
        Box::new(session.compiler()),
        Box::new(session.bundler()),
        options,
    )
}

/// Execute a full cold build.
pub async fn build(session: &Session, opts: BuildOptions) -> Result<BuildReport> {
    let run = driver(session, opts).run(&session.project).await?;
    Ok(BuildReport { run })
}

/// Work out what a build would do without touching anything.
pub fn plan(session: &Session, opts: BuildOptions) -> Result<PlanReport> {
    let driver = driver(session, opts);
    let plan = driver.plan(&session.project)?;

    let apps = plan
        .apps
        .iter()
        .map(|app| PlannedApp {
            name: app.name.clone(),
            out_dir: app.out_dir.clone(),
            tsconfig: app.from_root(app.tsconfig),
            compiled_dir: app.compiled_dir(&driver.options().work_dir),
        })
        .collect();

    Ok(PlanReport {
        namespace: driver.options().namespace.clone(),
        work_dir: driver.options().work_dir.clone(),
        on_failure: driver.options().on_failure,
        apps,
        non_worker_apps: plan.non_worker_apps,
    })
}
