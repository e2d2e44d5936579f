use std::path::Path;

use super::{
    config::{AliasMap, BundleConfig, LoaderRule, Output, Resolve, Target},
    plugin::{PluginContext, plugin_chain},
};
use crate::app::AppDefinition;

/// Loader that rewrites every module for size before anything else runs.
pub const BUILD_OPTIMIZER_LOADER: &str = "@angular-devkit/build-optimizer/webpack-loader";

/// Build one bundler configuration for `app`.
///
/// `entry` is the compiled entry module, i.e. a file under
/// [`AppDefinition::compiled_dir`]. Never fails: this is data construction
/// only.
pub fn config_for(app: &AppDefinition, entry: &Path, target: Target) -> BundleConfig {
    let name = target.output_name();

    BundleConfig {
        name: name.to_string(),
        target,
        entry: entry.to_path_buf(),
        output: Output {
            path: app.out_dir_path(),
            filename: format!("{name}.js"),
        },
        devtool: "source-map",
        rules: vec![LoaderRule {
            test: r"\.js$",
            loader: BUILD_OPTIMIZER_LOADER,
            source_map: false,
        }],
        plugins: plugin_chain(&PluginContext { app, entry, target }),
        resolve: Resolve {
            extensions: vec![".ts", ".js"],
            symlinks: true,
            alias: AliasMap::RxjsEsm5,
            main_fields: vec!["browser", "module", "main"],
        },
        loader_alias: AliasMap::RxjsEsm5,
    }
}
