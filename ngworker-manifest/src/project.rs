//! Project configuration: the list of declared applications.
//!
//! The configuration is the JSON file shared with the Angular CLI
//! (`.angular-cli.json`). Only the `apps` list is read; every other key
//! belongs to other tooling and is ignored.

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext, span::find_quoted_span};

/// Default file name of the project configuration.
pub const DEFAULT_PROJECT_FILE: &str = ".angular-cli.json";

const DEFAULT_ROOT: &str = "src";
const DEFAULT_OUT_DIR: &str = "dist";
const DEFAULT_INDEX: &str = "index.html";

/// One declared application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    /// App name; `app<position>` when the entry has none.
    pub name: String,
    /// Source directory, relative to the project directory.
    pub root: PathBuf,
    /// Output directory, relative to the project directory.
    pub out_dir: PathBuf,
    /// HTML index template, relative to `root`.
    pub index: PathBuf,
    /// Polyfills entry, relative to `root`.
    pub polyfills: Option<PathBuf>,
}

/// The parsed project configuration. App order is declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(default)]
    apps: Vec<RawApp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApp {
    name: Option<String>,
    #[serde(default = "default_root")]
    root: String,
    #[serde(default = "default_out_dir")]
    out_dir: String,
    #[serde(default = "default_index")]
    index: String,
    polyfills: Option<String>,
}

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

fn default_out_dir() -> String {
    DEFAULT_OUT_DIR.to_string()
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

impl FromStr for ProjectConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_project(s, DEFAULT_PROJECT_FILE)
    }
}

impl ProjectConfig {
    /// Parse a project configuration from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_project(content, filename)
    }

    /// Find an app by name.
    pub fn app(&self, name: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|app| app.name == name)
    }
}

/// A project configuration file together with its location on disk.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    config: ProjectConfig,
}

impl ProjectFile {
    /// Open and parse a project configuration file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let config = parse_project(&content, &path.display().to_string())?;
        Ok(Self { path, config })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that app roots and output directories are relative to.
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Get the parsed configuration.
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }
}

/// Parse a project configuration from content with the given filename for error reporting.
pub fn parse_project(content: &str, filename: &str) -> Result<ProjectConfig> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawProject = serde_json::from_str(content).map_err(|e| ctx.json_error(e))?;

    let apps = raw
        .apps
        .into_iter()
        .enumerate()
        .map(|(position, app)| AppEntry {
            name: app.name.unwrap_or_else(|| format!("app{position}")),
            root: PathBuf::from(app.root),
            out_dir: PathBuf::from(app.out_dir),
            index: PathBuf::from(app.index),
            polyfills: app.polyfills.map(PathBuf::from),
        })
        .collect();

    let config = ProjectConfig { apps };
    validate_project(&config, &ctx)?;
    Ok(config)
}

fn validate_project(config: &ProjectConfig, ctx: &SourceContext) -> Result<()> {
    for (i, app) in config.apps.iter().enumerate() {
        if let Some(first) = config.apps[..i].iter().find(|a| a.name == app.name) {
            let quoted = format!("\"{}\"", first.name);
            return Err(ctx.duplicate_app_error(
                &app.name,
                find_quoted_span(ctx.src(), &quoted, 0),
                find_quoted_span(ctx.src(), &quoted, 1),
            ));
        }

        if app.root.as_os_str().is_empty() {
            return Err(ctx.validation_error(format!("app '{}' has an empty 'root'", app.name), None));
        }

        if app.out_dir.as_os_str().is_empty() {
            return Err(
                ctx.validation_error(format!("app '{}' has an empty 'outDir'", app.name), None)
            );
        }

        if overlaps(&app.out_dir, &app.root) {
            let out_dir = app.out_dir.display().to_string();
            return Err(ctx.out_dir_overlaps_root_error(
                &app.name,
                &out_dir,
                app.root.display().to_string(),
                find_quoted_span(ctx.src(), &format!("\"{out_dir}\""), 0),
            ));
        }
    }
    Ok(())
}

/// Whether removing `out_dir` would also remove (part of) `root`.
///
/// Only what can be told from the text is caught here. Paths that leave the
/// project directory are checked again once that directory is known.
fn overlaps(out_dir: &Path, root: &Path) -> bool {
    let out_dir = LexicalPath::new(out_dir);
    let root = LexicalPath::new(root);
    out_dir.contains_base()
        || (out_dir.absolute == root.absolute
            && out_dir.ups == root.ups
            && root.parts.starts_with(&out_dir.parts))
}

/// A path with `.` dropped and `..` folded into the preceding component.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct LexicalPath {
    absolute: bool,
    /// `..` components that had nothing left to fold into.
    ups: usize,
    parts: Vec<String>,
}

impl LexicalPath {
    pub(crate) fn new(path: &Path) -> Self {
        let mut lexical = Self {
            absolute: false,
            ups: 0,
            parts: Vec::new(),
        };
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => lexical.absolute = true,
                Component::CurDir => {}
                Component::ParentDir => {
                    if lexical.parts.pop().is_none() && !lexical.absolute {
                        lexical.ups += 1;
                    }
                }
                Component::Normal(part) => {
                    lexical.parts.push(part.to_string_lossy().into_owned());
                }
            }
        }
        lexical
    }

    /// The path names the directory it is relative to, one of its parents,
    /// or a filesystem root.
    pub(crate) fn contains_base(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ProjectConfig> {
        ProjectConfig::from_str(content)
    }

    #[test]
    fn test_parse_single_app() {
        let config = parse(
            r#"{
                "project": { "name": "hello-world" },
                "apps": [
                    {
                        "name": "demo",
                        "root": "src",
                        "outDir": "dist/demo",
                        "index": "index.html",
                        "polyfills": "polyfills.ts",
                        "styles": ["styles.css"]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.apps.len(), 1);
        let app = &config.apps[0];
        assert_eq!(app.name, "demo");
        assert_eq!(app.root, PathBuf::from("src"));
        assert_eq!(app.out_dir, PathBuf::from("dist/demo"));
        assert_eq!(app.index, PathBuf::from("index.html"));
        assert_eq!(app.polyfills, Some(PathBuf::from("polyfills.ts")));
    }

    #[test]
    fn test_defaults_and_unnamed_apps() {
        let config = parse(r#"{ "apps": [ { "outDir": "dist/a" }, { "root": "other", "name": "b" } ] }"#)
            .unwrap();

        assert_eq!(config.apps[0].name, "app0");
        assert_eq!(config.apps[0].root, PathBuf::from("src"));
        assert_eq!(config.apps[0].index, PathBuf::from("index.html"));
        assert_eq!(config.apps[1].name, "b");
        assert_eq!(config.apps[1].out_dir, PathBuf::from("dist"));
        assert!(config.apps[1].polyfills.is_none());
    }

    #[test]
    fn test_order_is_preserved() {
        let config = parse(
            r#"{ "apps": [
                { "name": "zeta", "root": "z", "outDir": "dist/z" },
                { "name": "alpha", "root": "a", "outDir": "dist/a" },
                { "name": "mid", "root": "m", "outDir": "dist/m" }
            ] }"#,
        )
        .unwrap();

        let names: Vec<_> = config.apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_missing_apps_is_empty() {
        let config = parse("{}").unwrap();
        assert!(config.apps.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse(r#"{ "apps": [ }"#).unwrap_err();
        assert!(matches!(*err, Error::ParseJson { .. }));
    }

    #[test]
    fn test_duplicate_names() {
        let err = parse(
            r#"{ "apps": [
                { "name": "demo", "root": "a", "outDir": "dist/a" },
                { "name": "demo", "root": "b", "outDir": "dist/b" }
            ] }"#,
        )
        .unwrap_err();

        let Error::DuplicateApp {
            name,
            first_span,
            second_span,
            ..
        } = *err
        else {
            panic!("expected duplicate app error");
        };
        assert_eq!(name, "demo");
        assert!(first_span.unwrap().offset() < second_span.unwrap().offset());
    }

    #[test]
    fn test_out_dir_containing_root_is_rejected() {
        let err = parse(r#"{ "apps": [ { "name": "demo", "root": "dist/src", "outDir": "./dist" } ] }"#)
            .unwrap_err();
        assert!(matches!(*err, Error::OutDirOverlapsRoot { .. }));

        let err = parse(r#"{ "apps": [ { "name": "demo", "root": "src", "outDir": "src" } ] }"#)
            .unwrap_err();
        assert!(matches!(*err, Error::OutDirOverlapsRoot { .. }));

        let err = parse(r#"{ "apps": [ { "name": "demo", "root": "src", "outDir": "." } ] }"#)
            .unwrap_err();
        assert!(matches!(*err, Error::OutDirOverlapsRoot { .. }));
    }

    #[test]
    fn test_out_dir_above_the_project_is_rejected() {
        for out_dir in ["/", "..", "../..", "dist/../.."] {
            let content = format!(r#"{{ "apps": [ {{ "name": "demo", "root": "src", "outDir": "{out_dir}" }} ] }}"#);
            let err = parse(&content).unwrap_err();
            assert!(
                matches!(*err, Error::OutDirOverlapsRoot { .. }),
                "{out_dir} accepted"
            );
        }
    }

    #[test]
    fn test_out_dir_outside_the_project_is_accepted() {
        let config = parse(
            r#"{ "apps": [ { "name": "demo", "root": "dist/src", "outDir": "../dist" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.apps[0].out_dir, PathBuf::from("../dist"));

        assert!(parse(r#"{ "apps": [ { "name": "demo", "root": "src", "outDir": "/srv/www" } ] }"#).is_ok());
    }

    #[test]
    fn test_lexical_path_keeps_leading_parent_dirs() {
        let path = LexicalPath::new(Path::new("../a/./b/../c"));
        assert_eq!(path.ups, 1);
        assert_eq!(path.parts, ["a", "c"]);
        assert!(!path.contains_base());
        assert!(LexicalPath::new(Path::new("a/..")).contains_base());
        assert!(LexicalPath::new(Path::new("/..")).contains_base());
    }

    #[test]
    fn test_sibling_out_dir_is_accepted() {
        let config =
            parse(r#"{ "apps": [ { "name": "demo", "root": "src", "outDir": "src-dist" } ] }"#);
        assert!(config.is_ok());
    }

    #[test]
    fn test_empty_root_is_rejected() {
        let err = parse(r#"{ "apps": [ { "name": "demo", "root": "", "outDir": "dist" } ] }"#)
            .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_project_file_base_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_PROJECT_FILE);
        std::fs::write(&path, r#"{ "apps": [ { "name": "demo" } ] }"#).unwrap();

        let file = ProjectFile::open(&path).unwrap();

        assert_eq!(file.base_dir(), temp.path());
        assert!(file.config().app("demo").is_some());
        assert!(file.config().app("other").is_none());
    }

    #[test]
    fn test_project_file_missing() {
        let err = ProjectFile::open("/nonexistent/.angular-cli.json").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
