//! Bundler configuration data.
//!
//! Plain values only; turning them into a webpack configuration module is
//! the job of [`super::render`].

use std::path::PathBuf;

use super::plugin::Plugin;

/// Which of the two bundles of an app a configuration produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Foreground bootstrap page; the only target with an HTML shell.
    Ui,
    /// Background worker.
    Worker,
}

impl Target {
    /// Logical output name; the bundle is written to `<name>.js`.
    pub fn output_name(self) -> &'static str {
        match self {
            Self::Ui => "main",
            Self::Worker => "app-worker",
        }
    }

    pub fn is_ui(self) -> bool {
        matches!(self, Self::Ui)
    }
}

/// Where a bundle is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Absolute output directory.
    pub path: PathBuf,
    pub filename: String,
}

/// A module rule that runs every matching file through a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderRule {
    /// Regular expression source matched against module paths.
    pub test: &'static str,
    pub loader: &'static str,
    pub source_map: bool,
}

/// Source of the module alias map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasMap {
    /// The reactive-stream library's ES5 module path mapping
    /// (`rxjs/_esm5/path-mapping`), so both bundles link the same
    /// physical module instead of each pulling in a copy.
    RxjsEsm5,
}

/// Module resolution rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolve {
    pub extensions: Vec<&'static str>,
    pub symlinks: bool,
    pub alias: AliasMap,
    /// Package entry fields, in order of preference.
    pub main_fields: Vec<&'static str>,
}

/// One complete bundler configuration for one (app, target) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleConfig {
    pub name: String,
    pub target: Target,
    /// Compiled entry module (inside the work dir, never the source tree).
    pub entry: PathBuf,
    pub output: Output,
    pub devtool: &'static str,
    pub rules: Vec<LoaderRule>,
    pub plugins: Vec<Plugin>,
    pub resolve: Resolve,
    pub loader_alias: AliasMap,
}

/// Both configurations of one app, submitted to the bundler together.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleBatch {
    pub app: String,
    /// Directory the bundler runs in (the project directory).
    pub working_dir: PathBuf,
    /// Directory that receives the rendered configuration module.
    pub config_dir: PathBuf,
    pub configs: Vec<BundleConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_names() {
        assert_eq!(Target::Ui.output_name(), "main");
        assert_eq!(Target::Worker.output_name(), "app-worker");
        assert!(Target::Ui.is_ui());
        assert!(!Target::Worker.is_ui());
    }
}
