//! Bundler statistics, as printed by `webpack --json`.

use std::fmt::Write as _;

use serde::Deserialize;

use crate::diagnostic::Diagnostic;

/// Statistics for one bundler run over a batch.
///
/// A multi-configuration run reports one child per configuration; a
/// single-configuration run reports everything at the top level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BundleStats {
    #[serde(default)]
    pub errors: Vec<StatsMessage>,
    #[serde(default)]
    pub warnings: Vec<StatsMessage>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub children: Vec<CompilationStats>,
}

/// Statistics for one configuration of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompilationStats {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub errors: Vec<StatsMessage>,
    #[serde(default)]
    pub warnings: Vec<StatsMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// Older bundlers report plain strings, newer ones objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StatsMessage {
    Text(String),
    Detailed {
        message: String,
        #[serde(default, rename = "moduleName")]
        module_name: Option<String>,
    },
}

impl StatsMessage {
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Detailed {
                message,
                module_name: Some(module),
            } => format!("{module}\n{message}"),
            Self::Detailed { message, .. } => message.clone(),
        }
    }
}

impl BundleStats {
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// One entry per configuration, the top level standing in when there
    /// are no children.
    pub fn compilations(&self) -> Vec<CompilationStats> {
        if !self.children.is_empty() {
            return self.children.clone();
        }
        vec![CompilationStats {
            name: None,
            time: self.time,
            assets: self.assets.clone(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        }]
    }

    /// All errors and warnings, tagged with the bundle that reported them.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for compilation in self.compilations() {
            for error in &compilation.errors {
                diagnostics.push(Diagnostic::error(compilation.name.clone(), error.text()));
            }
            for warning in &compilation.warnings {
                diagnostics.push(Diagnostic::warning(compilation.name.clone(), warning.text()));
            }
        }
        diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.compilations().iter().any(|c| !c.errors.is_empty())
    }

    /// Human-readable summary: per bundle its time and emitted assets.
    /// Modules and chunks are left out.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for compilation in self.compilations() {
            let name = compilation.name.as_deref().unwrap_or("bundle");
            match compilation.time {
                Some(ms) => {
                    let _ = writeln!(out, "{name}: built in {ms}ms");
                }
                None => {
                    let _ = writeln!(out, "{name}:");
                }
            }
            let width = compilation
                .assets
                .iter()
                .map(|a| a.name.len())
                .max()
                .unwrap_or(0);
            for asset in &compilation.assets {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {:>10}",
                    asset.name,
                    format_size(asset.size)
                );
            }
            let _ = writeln!(
                out,
                "  {} error(s), {} warning(s)",
                compilation.errors.len(),
                compilation.warnings.len()
            );
        }
        out
    }
}

fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let size = bytes as f64;
    if size < KIB {
        format!("{bytes} B")
    } else if size < KIB * KIB {
        format!("{:.2} KiB", size / KIB)
    } else {
        format!("{:.2} MiB", size / (KIB * KIB))
    }
}
