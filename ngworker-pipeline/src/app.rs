//! Worker app definitions.

use std::{
    io,
    path::{Path, PathBuf},
};

use ngworker_core::remove_dir_if_exists;
use ngworker_manifest::AppEntry;
use tracing::{debug, info};

use crate::{
    bundle::{BundleBatch, Target, config_for},
    compiler::{CompileRequest, CompiledOutput, Compiler},
    error::{BundlerError, CompileError, Error},
    paths,
    runner::{Bundler, run_bundler},
    stats::BundleStats,
};

/// Compiled UI bootstrap entry (foreground thread).
pub const MAIN_WORKER_UI: &str = "main.worker-ui.js";
/// Compiled worker bootstrap entry (background thread).
pub const MAIN_WORKER: &str = "main.worker.js";
/// Worker-specific compiler configuration. Its presence marks a worker app.
pub const WORKER_TSCONFIG: &str = "tsconfig.worker.json";

/// Where certain worker app files can be found.
///
/// Only constructed for apps whose root contains [`WORKER_TSCONFIG`], see
/// [`crate::discovery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDefinition {
    pub name: String,
    /// Source directory, relative to the project directory.
    pub root: PathBuf,
    /// Output directory, relative to the project directory.
    pub out_dir: PathBuf,
    /// Index template, relative to `root`.
    pub index: PathBuf,
    pub polyfills: Option<PathBuf>,
    pub main_worker_ui: &'static str,
    pub main_worker: &'static str,
    pub tsconfig: &'static str,
    base_dir: PathBuf,
}

impl AppDefinition {
    pub(crate) fn new(entry: &AppEntry, base_dir: &Path) -> Self {
        Self {
            name: entry.name.clone(),
            root: entry.root.clone(),
            out_dir: entry.out_dir.clone(),
            index: entry.index.clone(),
            polyfills: entry.polyfills.clone(),
            main_worker_ui: MAIN_WORKER_UI,
            main_worker: MAIN_WORKER,
            tsconfig: WORKER_TSCONFIG,
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Join the app root with `filename`.
    pub fn from_root(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.root.join(filename)
    }

    /// Resolve a project-relative path against the project directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute location of the worker compiler configuration.
    pub fn tsconfig_path(&self) -> PathBuf {
        self.resolve(self.from_root(self.tsconfig))
    }

    /// Absolute location of the HTML index template.
    pub fn template_path(&self) -> PathBuf {
        self.resolve(self.from_root(&self.index))
    }

    /// Absolute location of the output directory.
    pub fn out_dir_path(&self) -> PathBuf {
        self.resolve(&self.out_dir)
    }

    /// Where compiled output of this app lands below `work_dir`.
    pub fn compiled_dir(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(&self.root)
    }

    /// Fail if clearing the output directory would remove this app's root or
    /// the project directory.
    pub fn check_out_dir(&self) -> Result<(), Error> {
        let path = paths::resolve(&self.base_dir, &self.out_dir);
        for contains in [
            paths::resolve(&self.base_dir, &self.root),
            paths::resolve(&self.base_dir, Path::new("")),
        ] {
            if contains.starts_with(&path) {
                return Err(Error::UnsafeOutDir {
                    name: self.name.clone(),
                    path,
                    contains,
                });
            }
        }
        Ok(())
    }

    /// Recursively remove the output directory. A missing directory is fine.
    pub fn clean_out_dir(&self) -> io::Result<bool> {
        let out_dir = self.out_dir_path();
        info!("Clearing '{}'.", self.out_dir.display());
        remove_dir_if_exists(&out_dir)
    }

    /// Run the ahead-of-time compiler against this app's worker tsconfig.
    ///
    /// Output goes to [`Self::compiled_dir`]. Both compiled entries must exist
    /// afterwards; otherwise nothing would be left to bundle.
    pub fn ngc_compile(
        &self,
        compiler: &dyn Compiler,
        work_dir: &Path,
    ) -> Result<CompiledOutput, CompileError> {
        let request = CompileRequest {
            tsconfig: self.tsconfig_path(),
            out_dir: self.compiled_dir(work_dir),
            working_dir: self.base_dir.clone(),
        };
        info!("Calling 'ngc' on '{}'.", self.from_root(self.tsconfig).display());

        let output = compiler.compile(&request)?;
        for entry in [self.main_worker_ui, self.main_worker] {
            let path = output.dir.join(entry);
            if !path.is_file() {
                return Err(CompileError::MissingOutput { path });
            }
        }
        debug!(app = %self.name, dir = %output.dir.display(), "compiled");
        Ok(output)
    }

    /// Bundler configurations for both entries, UI first.
    pub fn bundle_batch(&self, compiled: &CompiledOutput) -> BundleBatch {
        BundleBatch {
            app: self.name.clone(),
            working_dir: self.base_dir.clone(),
            config_dir: compiled.dir.clone(),
            configs: vec![
                config_for(self, &compiled.dir.join(self.main_worker_ui), Target::Ui),
                config_for(self, &compiled.dir.join(self.main_worker), Target::Worker),
            ],
        }
    }

    /// Bundle the UI and worker entries as one batch.
    ///
    /// Completes when both bundles were attempted; fails only when the
    /// bundler could not run.
    pub async fn build(
        &self,
        bundler: &dyn Bundler,
        compiled: &CompiledOutput,
    ) -> Result<BundleStats, BundlerError> {
        run_bundler(bundler, &self.bundle_batch(compiled)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_app(base: &Path) -> AppDefinition {
        AppDefinition::new(
            &AppEntry {
                name: "demo".to_string(),
                root: PathBuf::from("src"),
                out_dir: PathBuf::from("dist/demo"),
                index: PathBuf::from("index.html"),
                polyfills: None,
            },
            base,
        )
    }

    #[test]
    fn test_from_root() {
        let app = demo_app(Path::new("/project"));
        assert_eq!(
            app.from_root(app.tsconfig),
            PathBuf::from("src/tsconfig.worker.json")
        );
        assert_eq!(
            app.tsconfig_path(),
            PathBuf::from("/project/src/tsconfig.worker.json")
        );
        assert_eq!(
            app.template_path(),
            PathBuf::from("/project/src/index.html")
        );
    }

    #[test]
    fn test_out_dir_may_not_contain_root_or_project() {
        let mut app = demo_app(Path::new("/work/web"));
        for out_dir in ["/", "../web", "..", "../web/src/.."] {
            app.out_dir = PathBuf::from(out_dir);
            let err = app.check_out_dir().unwrap_err();
            assert!(matches!(err, Error::UnsafeOutDir { .. }), "{out_dir} accepted");
        }

        app.root = PathBuf::from("dist/src");
        app.out_dir = PathBuf::from("../dist");
        app.check_out_dir().unwrap();
        app.out_dir = PathBuf::from("../web/dist");
        let err = app.check_out_dir().unwrap_err();
        let Error::UnsafeOutDir { path, contains, .. } = err else {
            panic!("expected an unsafe out dir");
        };
        assert_eq!(path, Path::new("/work/web/dist"));
        assert_eq!(contains, Path::new("/work/web/dist/src"));
    }

    #[test]
    fn test_compiled_dir_is_namespaced_by_root() {
        let app = demo_app(Path::new("/project"));
        assert_eq!(
            app.compiled_dir(Path::new("/project/_build")),
            PathBuf::from("/project/_build/src")
        );
    }

    #[test]
    fn test_clean_out_dir_tolerates_missing_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let app = demo_app(temp.path());

        assert!(!app.clean_out_dir().unwrap());
    }

    #[test]
    fn test_clean_out_dir_removes_contents() {
        let temp = tempfile::TempDir::new().unwrap();
        let app = demo_app(temp.path());
        std::fs::create_dir_all(temp.path().join("dist/demo")).unwrap();
        std::fs::write(temp.path().join("dist/demo/main.js"), "old").unwrap();

        assert!(app.clean_out_dir().unwrap());
        assert!(!temp.path().join("dist/demo").exists());
        assert!(temp.path().join("dist").exists());
    }

    #[test]
    fn test_bundle_batch_orders_ui_first() {
        let app = demo_app(Path::new("/project"));
        let compiled = CompiledOutput {
            dir: PathBuf::from("/project/_build/src"),
        };

        let batch = app.bundle_batch(&compiled);

        assert_eq!(batch.configs.len(), 2);
        assert_eq!(batch.configs[0].name, "main");
        assert_eq!(batch.configs[1].name, "app-worker");
        assert_eq!(
            batch.configs[0].entry,
            PathBuf::from("/project/_build/src/main.worker-ui.js")
        );
        assert_eq!(
            batch.configs[1].entry,
            PathBuf::from("/project/_build/src/main.worker.js")
        );
        assert_eq!(batch.config_dir, compiled.dir);
    }
}
