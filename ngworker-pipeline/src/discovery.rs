//! App discovery: which declared apps are worker apps.
//!
//! An app is a worker app when its root contains [`WORKER_TSCONFIG`]. Apps
//! without it are skipped silently; a project may mix worker and regular
//! apps.

use std::path::{Path, PathBuf};

use ngworker_manifest::{AppEntry, ProjectConfig, ProjectFile};
use tracing::debug;

use crate::{
    app::{AppDefinition, WORKER_TSCONFIG},
    error::{Error, Result},
    paths,
};

/// A project configuration anchored at the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct Project {
    base_dir: PathBuf,
    config: ProjectConfig,
}

impl Project {
    pub fn new(base_dir: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            base_dir: base_dir.into(),
            config,
        }
    }

    pub fn from_file(file: &ProjectFile) -> Self {
        Self::new(file.base_dir(), file.config().clone())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Resolve a project-relative path against the project directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Fail if clearing `work_dir` would remove the project directory or the
    /// root of any declared app.
    pub fn check_work_dir(&self, work_dir: &Path) -> Result<()> {
        let path = paths::resolve(&self.base_dir, work_dir);
        let protected = std::iter::once(paths::resolve(&self.base_dir, Path::new("")))
            .chain(self.config.apps.iter().map(|app| paths::resolve(&self.base_dir, &app.root)));
        for contains in protected {
            if contains.starts_with(&path) {
                return Err(Error::UnsafeWorkDir { path, contains });
            }
        }
        Ok(())
    }

    /// Whether `entry`'s root contains the worker tsconfig.
    pub fn is_worker_app(&self, entry: &AppEntry) -> bool {
        self.resolve(&entry.root).join(WORKER_TSCONFIG).is_file()
    }
}

/// Outcome of discovery, both lists in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub apps: Vec<AppDefinition>,
    /// Declared apps without a worker tsconfig.
    pub skipped: Vec<AppEntry>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Split the declared apps into worker apps and the rest.
pub fn discover(project: &Project) -> Discovery {
    let mut discovery = Discovery::default();
    for entry in &project.config.apps {
        if project.is_worker_app(entry) {
            discovery
                .apps
                .push(AppDefinition::new(entry, project.base_dir()));
        } else {
            debug!(app = %entry.name, root = %entry.root.display(), "no {WORKER_TSCONFIG}, skipping");
            discovery.skipped.push(entry.clone());
        }
    }
    discovery
}

/// Every worker app of the project, in declaration order.
pub fn get_apps(project: &Project) -> Vec<AppDefinition> {
    discover(project).apps
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn entry(name: &str, root: &str) -> AppEntry {
        AppEntry {
            name: name.to_string(),
            root: PathBuf::from(root),
            out_dir: PathBuf::from(format!("dist/{name}")),
            index: PathBuf::from("index.html"),
            polyfills: None,
        }
    }

    fn touch_tsconfig(base: &Path, root: &str) {
        fs::create_dir_all(base.join(root)).unwrap();
        fs::write(base.join(root).join(WORKER_TSCONFIG), "{}").unwrap();
    }

    #[test]
    fn test_filters_and_keeps_declaration_order() {
        let temp = TempDir::new().unwrap();
        touch_tsconfig(temp.path(), "apps/c");
        touch_tsconfig(temp.path(), "apps/a");
        fs::create_dir_all(temp.path().join("apps/b")).unwrap();
        let project = Project::new(
            temp.path(),
            ProjectConfig {
                apps: vec![
                    entry("c", "apps/c"),
                    entry("b", "apps/b"),
                    entry("a", "apps/a"),
                ],
            },
        );

        let discovery = discover(&project);

        let names: Vec<_> = discovery.apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["c", "a"]);
        assert_eq!(discovery.skipped.len(), 1);
        assert_eq!(discovery.skipped[0].name, "b");
    }

    #[test]
    fn test_missing_root_is_skipped_not_an_error() {
        let temp = TempDir::new().unwrap();
        let project = Project::new(
            temp.path(),
            ProjectConfig {
                apps: vec![entry("ghost", "does/not/exist")],
            },
        );

        assert!(get_apps(&project).is_empty());
    }

    #[test]
    fn test_tsconfig_directory_does_not_count() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src").join(WORKER_TSCONFIG)).unwrap();
        let project = Project::new(
            temp.path(),
            ProjectConfig {
                apps: vec![entry("demo", "src")],
            },
        );

        assert!(discover(&project).is_empty());
    }

    #[test]
    fn test_work_dir_may_not_contain_project_or_app_roots() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("web");
        fs::create_dir_all(&project_dir).unwrap();
        let project = Project::new(
            &project_dir,
            ProjectConfig {
                apps: vec![entry("demo", "src"), entry("shared", "../lib/shared")],
            },
        );

        for work_dir in [".", "..", "./src", "src/..", "../lib"] {
            let err = project.check_work_dir(Path::new(work_dir)).unwrap_err();
            assert!(matches!(err, Error::UnsafeWorkDir { .. }), "{work_dir} accepted");
        }
        let err = project.check_work_dir(temp.path()).unwrap_err();
        assert!(matches!(err, Error::UnsafeWorkDir { .. }));

        for work_dir in ["_build", "src/_build", "../ngc"] {
            project.check_work_dir(Path::new(work_dir)).unwrap();
        }
    }

    #[test]
    fn test_demo_project() {
        let temp = TempDir::new().unwrap();
        touch_tsconfig(temp.path(), "src");
        let config: ProjectConfig =
            r#"{"apps": [{"name": "demo", "root": "src", "outDir": "dist/demo", "index": "index.html"}]}"#
                .parse()
                .unwrap();
        let project = Project::new(temp.path(), config);

        let apps = get_apps(&project);

        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "demo");
        assert_eq!(apps[0].out_dir_path(), temp.path().join("dist/demo"));
        assert_eq!(apps[0].base_dir(), temp.path());
    }
}
