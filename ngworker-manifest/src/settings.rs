//! Tool settings read from `ngworker.toml`.
//!
//! Every key is optional. A missing settings file means "all defaults".

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{
    Error, Result,
    error::SourceContext,
    project::{DEFAULT_PROJECT_FILE, LexicalPath},
    span::find_quoted_span,
};

/// Default file name of the settings file.
pub const DEFAULT_SETTINGS_FILE: &str = "ngworker.toml";

/// Default intermediate build directory for compiler output.
pub const DEFAULT_WORK_DIR: &str = "_build";

/// Default label printed around every build run.
pub const DEFAULT_NAMESPACE: &str = "build-angular-web-worker";

/// What the pipeline does with the remaining apps once one app has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run; later apps are reported as skipped.
    #[default]
    Abort,
    /// Keep building the remaining apps.
    Continue,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

/// Paths of the external Node tools, relative to the project directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    /// Ahead-of-time compiler executable.
    pub ngc: PathBuf,
    /// Bundler executable.
    pub webpack: PathBuf,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            ngc: PathBuf::from("node_modules/.bin/ngc"),
            webpack: PathBuf::from("node_modules/.bin/webpack"),
        }
    }
}

/// Contents of `ngworker.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Project configuration file.
    pub project: PathBuf,
    /// Intermediate build directory, relative to the project directory.
    pub work_dir: PathBuf,
    /// Continue-vs-abort policy after a failed app.
    pub on_failure: FailurePolicy,
    /// Label printed around every build run.
    pub namespace: String,
    pub tools: Tools,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project: PathBuf::from(DEFAULT_PROJECT_FILE),
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            on_failure: FailurePolicy::default(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            tools: Tools::default(),
        }
    }
}

impl FromStr for Settings {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_settings(s, DEFAULT_SETTINGS_FILE)
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => parse_settings(&content, &path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })),
        }
    }
}

/// Parse settings from content with the given filename for error reporting.
pub fn parse_settings(content: &str, filename: &str) -> Result<Settings> {
    let ctx = SourceContext::new(content, filename);
    let settings: Settings = toml::from_str(content).map_err(|e| ctx.toml_error(e))?;

    if settings.work_dir.as_os_str().is_empty() {
        return Err(ctx.validation_error("'work_dir' must not be empty", None));
    }
    if LexicalPath::new(&settings.work_dir).contains_base() {
        let value = settings.work_dir.display().to_string();
        return Err(ctx.validation_error(
            format!("'work_dir' = \"{value}\" would clear the project directory"),
            find_quoted_span(ctx.src(), &format!("\"{value}\""), 0),
        ));
    }
    if settings.namespace.trim().is_empty() {
        return Err(ctx.validation_error("'namespace' must not be empty", None));
    }

    Ok(settings)
}
