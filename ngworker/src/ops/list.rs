//! List operation - every configured app and whether it is a worker app.

use crate::{
    reports::{ListReport, ListedApp},
    session::Session,
};

pub fn list(session: &Session) -> ListReport {
    let project = &session.project;
    let apps = project
        .config()
        .apps
        .iter()
        .map(|entry| ListedApp {
            name: entry.name.clone(),
            root: entry.root.clone(),
            out_dir: entry.out_dir.clone(),
            worker: project.is_worker_app(entry),
        })
        .collect();

    ListReport {
        project_path: session.project_path.clone(),
        apps,
    }
}
