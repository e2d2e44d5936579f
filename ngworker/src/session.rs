//! Settings and project loading shared by every command.

use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Result, WrapErr};
use ngworker_manifest::{DEFAULT_SETTINGS_FILE, ProjectFile, Settings};
use ngworker_pipeline::{DriverOptions, NgcCompiler, Project, WebpackBundler};
use tracing::debug;

use crate::commands::UnwrapOrExit;

/// Where to find the settings and the project configuration.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to ngworker.toml (a missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Project configuration file (overrides `project` in ngworker.toml)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Intermediate build directory, relative to the project directory
    #[arg(long)]
    pub work_dir: Option<PathBuf>,
}

/// Everything a command needs: effective settings and the anchored project.
pub struct Session {
    pub settings: Settings,
    pub project_path: PathBuf,
    pub project: Project,
}

impl Session {
    /// Load settings and project configuration.
    ///
    /// Configuration errors are printed as diagnostics and exit the process.
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let mut settings = Settings::load_or_default(&args.config).unwrap_or_exit();
        if let Some(work_dir) = &args.work_dir {
            settings.work_dir = work_dir.clone();
        }

        // A project path from the settings file is relative to that file.
        let project_path = match &args.project {
            Some(path) => path.clone(),
            None => settings_dir(&args.config).join(&settings.project),
        };

        let file = ProjectFile::open(&project_path).unwrap_or_exit();
        let base_dir = std::fs::canonicalize(file.base_dir()).wrap_err_with(|| {
            format!("Failed to resolve project directory of '{}'", project_path.display())
        })?;
        debug!(project = %project_path.display(), base_dir = %base_dir.display(), "loaded project");

        Ok(Self {
            settings,
            project_path,
            project: Project::new(base_dir, file.config().clone()),
        })
    }

    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions {
            work_dir: self.settings.work_dir.clone(),
            on_failure: self.settings.on_failure,
            namespace: self.settings.namespace.clone(),
            only: Vec::new(),
        }
    }

    pub fn compiler(&self) -> NgcCompiler {
        NgcCompiler::new(&self.settings.tools.ngc)
    }

    pub fn bundler(&self) -> WebpackBundler {
        WebpackBundler::new(&self.settings.tools.webpack)
    }
}

fn settings_dir(config: &Path) -> &Path {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_settings_dir() {
        assert_eq!(settings_dir(Path::new("ngworker.toml")), Path::new("."));
        assert_eq!(
            settings_dir(Path::new("web/ngworker.toml")),
            Path::new("web")
        );
    }

    #[test]
    fn test_project_is_found_next_to_settings() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("ngworker.toml"),
            "project = \"angular.json\"\nwork_dir = \"tmp\"\n",
        )
        .unwrap();
        fs::write(temp.path().join("angular.json"), r#"{"apps": [{"name": "demo"}]}"#).unwrap();

        let session = Session::load(&ProjectArgs {
            config: temp.path().join("ngworker.toml"),
            project: None,
            work_dir: None,
        })
        .unwrap();

        assert_eq!(session.project_path, temp.path().join("angular.json"));
        assert_eq!(session.settings.work_dir, PathBuf::from("tmp"));
        assert!(session.project.base_dir().is_absolute());
        assert_eq!(session.project.config().apps[0].name, "demo");
    }

    #[test]
    fn test_flags_override_settings() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("custom.json"), r#"{"apps": []}"#).unwrap();

        let session = Session::load(&ProjectArgs {
            config: temp.path().join("missing.toml"),
            project: Some(temp.path().join("custom.json")),
            work_dir: Some(PathBuf::from("out/ngc")),
        })
        .unwrap();

        assert_eq!(session.driver_options().work_dir, PathBuf::from("out/ngc"));
        assert_eq!(session.project_path, temp.path().join("custom.json"));
    }
}
