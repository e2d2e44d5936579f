//! Bundler plugin descriptors and the ordered plugin chain.

use std::path::{Path, PathBuf};

use tracing::trace;

use super::config::Target;
use crate::app::AppDefinition;

/// Matches every request into the core framework package, with either path
/// separator.
pub const ANGULAR_CORE_CONTEXT: &str = r"(.+)?angular(\\|\/)core(.+)?";

/// A bundler plugin, described as data.
#[derive(Debug, Clone, PartialEq)]
pub enum Plugin {
    /// Narrows dynamic requires of the core framework to `context_dir`.
    ContextReplacement {
        resource_regex: &'static str,
        context_dir: PathBuf,
    },
    /// Emits the HTML page that loads the UI bundle.
    HtmlTemplate {
        template: PathBuf,
        filename: &'static str,
        title: String,
    },
    /// Cross-module duplicate export elimination (scope hoisting).
    ModuleConcatenation,
    /// Dead export purification.
    Purify,
    Uglify(UglifyOptions),
}

impl Plugin {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContextReplacement { .. } => "context-replacement",
            Self::HtmlTemplate { .. } => "html-template",
            Self::ModuleConcatenation => "module-concatenation",
            Self::Purify => "purify",
            Self::Uglify(_) => "uglify",
        }
    }
}

/// Minification settings, tuned for compatibility over size.
#[derive(Debug, Clone, PartialEq)]
pub struct UglifyOptions {
    pub test: &'static str,
    pub extract_comments: bool,
    pub source_map: bool,
    pub cache: bool,
    pub parallel: bool,
    pub ecma: u64,
    pub ascii_only: bool,
    pub comments: bool,
    pub webkit: bool,
    pub warnings: bool,
    pub ie8: bool,
    pub safari10: bool,
    pub typeofs: bool,
    pub pure_getters: bool,
    pub passes: u64,
}

impl Default for UglifyOptions {
    fn default() -> Self {
        Self {
            test: r"\.js(\?.*)?$",
            extract_comments: false,
            source_map: true,
            cache: true,
            parallel: true,
            ecma: 5,
            ascii_only: true,
            comments: false,
            webkit: true,
            warnings: false,
            ie8: false,
            safari10: true,
            typeofs: false,
            pure_getters: true,
            passes: 3,
        }
    }
}

/// Everything a plugin factory may look at.
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
    pub app: &'a AppDefinition,
    pub entry: &'a Path,
    pub target: Target,
}

impl PluginContext<'_> {
    /// Directory one level above the compiled entry's directory.
    fn context_dir(&self) -> PathBuf {
        let compiled_dir = self.entry.parent().unwrap_or(self.entry);
        compiled_dir.parent().unwrap_or(compiled_dir).to_path_buf()
    }
}

struct PluginSlot {
    name: &'static str,
    applies: fn(Target) -> bool,
    make: fn(&PluginContext<'_>) -> Plugin,
}

fn always(_: Target) -> bool {
    true
}

const PLUGIN_CHAIN: &[PluginSlot] = &[
    PluginSlot {
        name: "context-replacement",
        applies: always,
        make: |ctx| Plugin::ContextReplacement {
            resource_regex: ANGULAR_CORE_CONTEXT,
            context_dir: ctx.context_dir(),
        },
    },
    PluginSlot {
        name: "html-template",
        applies: Target::is_ui,
        make: |ctx| Plugin::HtmlTemplate {
            template: ctx.app.template_path(),
            filename: "index.html",
            title: ctx.app.name.clone(),
        },
    },
    PluginSlot {
        name: "module-concatenation",
        applies: always,
        make: |_| Plugin::ModuleConcatenation,
    },
    PluginSlot {
        name: "purify",
        applies: always,
        make: |_| Plugin::Purify,
    },
    PluginSlot {
        name: "uglify",
        applies: always,
        make: |_| Plugin::Uglify(UglifyOptions::default()),
    },
];

/// Plugins that apply to `ctx.target`, in chain order.
pub fn plugin_chain(ctx: &PluginContext<'_>) -> Vec<Plugin> {
    PLUGIN_CHAIN
        .iter()
        .filter(|slot| {
            let applies = (slot.applies)(ctx.target);
            if !applies {
                trace!(slot = slot.name, target = ?ctx.target, "plugin does not apply");
            }
            applies
        })
        .map(|slot| (slot.make)(ctx))
        .collect()
}
