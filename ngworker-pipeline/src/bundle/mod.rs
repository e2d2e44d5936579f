//! Bundle configuration builder.
//!
//! [`config_for`] turns an app and a compiled entry into a [`BundleConfig`];
//! [`WebpackConfigModule`] renders a batch of them for the bundler.

mod builder;
mod config;
mod plugin;
mod render;

pub use builder::{BUILD_OPTIMIZER_LOADER, config_for};
pub use config::{AliasMap, BundleBatch, BundleConfig, LoaderRule, Output, Resolve, Target};
pub use plugin::{ANGULAR_CORE_CONTEXT, Plugin, PluginContext, UglifyOptions, plugin_chain};
pub use render::{CONFIG_FILE_NAME, WebpackConfigModule, config_expr};
