//! Rendering of a [`BundleBatch`] into a webpack configuration module.
//!
//! The module is plain CommonJS exporting one configuration per target, so
//! webpack builds both bundles of an app in a single multi-compiler run.
//! Plugin classes are required from the project's own `node_modules`.

use std::path::{Path, PathBuf};

use ngworker_core::{CodeBuilder, GeneratedFile, JsExpr, JsObject};
use serde_json::json;

use super::{
    config::{AliasMap, BundleBatch, BundleConfig},
    plugin::{Plugin, UglifyOptions},
};

/// File name of the rendered configuration module.
pub const CONFIG_FILE_NAME: &str = "ngworker.webpack.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Binding {
    Webpack,
    HtmlWebpackPlugin,
    PurifyPlugin,
    UglifyJsPlugin,
    RxPaths,
}

impl Binding {
    fn declaration(self) -> &'static str {
        match self {
            Self::Webpack => "const webpack = projectRequire('webpack');",
            Self::HtmlWebpackPlugin => {
                "const HtmlWebpackPlugin = projectRequire('html-webpack-plugin');"
            }
            Self::PurifyPlugin => {
                "const { PurifyPlugin } = projectRequire('@angular-devkit/build-optimizer');"
            }
            Self::UglifyJsPlugin => "const UglifyJsPlugin = projectRequire('uglifyjs-webpack-plugin');",
            Self::RxPaths => "const rxPaths = projectRequire('rxjs/_esm5/path-mapping');",
        }
    }
}

/// The configuration module for one app.
pub struct WebpackConfigModule<'a> {
    batch: &'a BundleBatch,
}

impl<'a> WebpackConfigModule<'a> {
    pub fn new(batch: &'a BundleBatch) -> Self {
        Self { batch }
    }

    fn bindings(&self) -> Vec<Binding> {
        let mut bindings = vec![Binding::RxPaths];
        for plugin in self.batch.configs.iter().flat_map(|c| &c.plugins) {
            bindings.push(match plugin {
                Plugin::ContextReplacement { .. } | Plugin::ModuleConcatenation => {
                    Binding::Webpack
                }
                Plugin::HtmlTemplate { .. } => Binding::HtmlWebpackPlugin,
                Plugin::Purify => Binding::PurifyPlugin,
                Plugin::Uglify(_) => Binding::UglifyJsPlugin,
            });
        }
        bindings.sort();
        bindings.dedup();
        bindings
    }
}

impl GeneratedFile for WebpackConfigModule<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(CONFIG_FILE_NAME)
    }

    fn render(&self) -> String {
        let mut b = CodeBuilder::javascript();
        b.push_line(&format!(
            "// Generated by ngworker for app '{}'. Do not edit.",
            self.batch.app
        ));
        b.push_line("'use strict';");
        b.push_blank();
        b.push_line("const { createRequire } = require('module');");
        b.push_blank();
        b.push_line(&format!(
            "const projectRequire = createRequire({});",
            JsExpr::string(path_str(&self.batch.working_dir.join("package.json")))
                .render()
                .trim_end()
        ));
        for binding in self.bindings() {
            b.push_line(binding.declaration());
        }
        b.push_blank();

        let configs = JsExpr::Array(self.batch.configs.iter().map(config_expr).collect());
        configs.write(&mut b, "module.exports = ", ";");
        b.build()
    }
}

/// The object literal for one configuration.
pub fn config_expr(config: &BundleConfig) -> JsExpr {
    let rules: Vec<JsExpr> = config
        .rules
        .iter()
        .map(|rule| {
            JsObject::new()
                .prop("test", JsExpr::regex(rule.test))
                .prop("loader", rule.loader)
                .prop("options", JsObject::new().prop("sourceMap", rule.source_map))
                .into()
        })
        .collect();

    JsObject::new()
        .prop("name", config.name.as_str())
        .prop("entry", entry_request(&config.entry))
        .prop(
            "output",
            JsObject::new()
                .prop("path", path_str(&config.output.path))
                .prop("filename", config.output.filename.as_str()),
        )
        .prop("devtool", config.devtool)
        .prop("module", JsObject::new().prop("rules", JsExpr::Array(rules)))
        .prop(
            "plugins",
            JsExpr::Array(config.plugins.iter().map(plugin_expr).collect()),
        )
        .prop(
            "resolve",
            JsObject::new()
                .prop("extensions", JsExpr::strings(config.resolve.extensions.iter().copied()))
                .prop("symlinks", config.resolve.symlinks)
                .prop("alias", alias_expr(config.resolve.alias))
                .prop(
                    "mainFields",
                    JsExpr::strings(config.resolve.main_fields.iter().copied()),
                ),
        )
        .prop(
            "resolveLoader",
            JsObject::new().prop("alias", alias_expr(config.loader_alias)),
        )
        .into()
}

fn plugin_expr(plugin: &Plugin) -> JsExpr {
    match plugin {
        Plugin::ContextReplacement {
            resource_regex,
            context_dir,
        } => JsExpr::new_instance(
            "webpack.ContextReplacementPlugin",
            vec![
                JsExpr::regex(*resource_regex),
                JsExpr::string(path_str(context_dir)),
                JsObject::new().into(),
            ],
        ),
        Plugin::HtmlTemplate {
            template,
            filename,
            title,
        } => JsExpr::new_instance(
            "HtmlWebpackPlugin",
            vec![
                JsObject::new()
                    .prop("template", path_str(template))
                    .prop("filename", *filename)
                    .prop("cache", true)
                    .prop("showErrors", true)
                    .prop("title", title.as_str())
                    .prop("xhtml", true)
                    .into(),
            ],
        ),
        Plugin::ModuleConcatenation => {
            JsExpr::new_instance("webpack.optimize.ModuleConcatenationPlugin", vec![])
        }
        Plugin::Purify => JsExpr::new_instance("PurifyPlugin", vec![]),
        Plugin::Uglify(options) => {
            JsExpr::new_instance("UglifyJsPlugin", vec![uglify_expr(options).into()])
        }
    }
}

fn uglify_expr(options: &UglifyOptions) -> JsObject {
    JsObject::new()
        .prop("test", JsExpr::regex_with_flags(options.test, "i"))
        .prop("extractComments", options.extract_comments)
        .prop("sourceMap", options.source_map)
        .prop("cache", options.cache)
        .prop("parallel", options.parallel)
        .prop(
            "uglifyOptions",
            json!({
                "output": {
                    "ascii_only": options.ascii_only,
                    "comments": options.comments,
                    "webkit": options.webkit,
                },
                "ecma": options.ecma,
                "warnings": options.warnings,
                "ie8": options.ie8,
                "mangle": { "safari10": options.safari10 },
                "compress": {
                    "typeofs": options.typeofs,
                    "pure_getters": options.pure_getters,
                    "passes": options.passes,
                },
            }),
        )
}

fn alias_expr(alias: AliasMap) -> JsExpr {
    match alias {
        AliasMap::RxjsEsm5 => JsExpr::call("rxPaths", vec![]),
    }
}

/// Webpack treats bare entries as package names, so relative ones need `./`.
fn entry_request(entry: &Path) -> String {
    let entry = path_str(entry);
    if Path::new(&entry).is_absolute() || entry.starts_with("./") || entry.starts_with("../") {
        entry
    } else {
        format!("./{entry}")
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
