//! Clean operation - remove build output.

use std::path::PathBuf;

use eyre::{Result, WrapErr};
use ngworker_core::remove_dir_if_exists;
use ngworker_pipeline::get_apps;

use crate::{reports::CleanReport, session::Session};

/// Options for the clean operation.
pub struct CleanOptions {
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Remove the work directory and the output directory of every worker app.
pub fn clean(session: &Session, opts: CleanOptions) -> Result<CleanReport> {
    let project = &session.project;
    project.check_work_dir(&session.settings.work_dir)?;
    let mut targets: Vec<(PathBuf, PathBuf)> = vec![(
        session.settings.work_dir.clone(),
        project.resolve(&session.settings.work_dir),
    )];
    for app in get_apps(project) {
        app.check_out_dir()?;
        let path = app.out_dir_path();
        targets.push((app.out_dir, path));
    }

    let mut removed = Vec::new();
    for (display, path) in targets {
        let gone = if opts.dry_run {
            path.exists()
        } else {
            remove_dir_if_exists(&path)
                .wrap_err_with(|| format!("Failed to remove '{}'", path.display()))?
        };
        if gone {
            removed.push(display);
        }
    }

    Ok(CleanReport {
        dry_run: opts.dry_run,
        removed,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::session::ProjectArgs;

    fn session(temp: &TempDir, work_dir: &str) -> Session {
        fs::write(
            temp.path().join("angular.json"),
            r#"{"apps": [{"name": "demo", "root": "src", "outDir": "dist"}]}"#,
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/tsconfig.worker.json"), "{}").unwrap();

        Session::load(&ProjectArgs {
            config: temp.path().join("missing.toml"),
            project: Some(temp.path().join("angular.json")),
            work_dir: Some(PathBuf::from(work_dir)),
        })
        .unwrap()
    }

    #[test]
    fn test_clean_removes_work_dir_and_out_dirs() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, "_build");
        fs::create_dir_all(temp.path().join("_build/src")).unwrap();
        fs::create_dir_all(temp.path().join("dist")).unwrap();

        let report = clean(&session, CleanOptions { dry_run: false }).unwrap();

        assert_eq!(report.removed, [PathBuf::from("_build"), PathBuf::from("dist")]);
        assert!(!temp.path().join("_build").exists());
        assert!(temp.path().join("src/tsconfig.worker.json").is_file());
    }

    #[test]
    fn test_clean_refuses_a_work_dir_holding_the_project() {
        let temp = TempDir::new().unwrap();
        for work_dir in [".", "src"] {
            let session = session(&temp, work_dir);

            let err = clean(&session, CleanOptions { dry_run: false }).unwrap_err();

            assert!(err.to_string().contains("refusing to clear"), "{err}");
            assert!(temp.path().join("angular.json").is_file());
            assert!(temp.path().join("src/tsconfig.worker.json").is_file());
        }
    }
}
