//! Inspect command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// A rendered bundler configuration module.
#[derive(Debug)]
pub struct InspectedModule {
    pub app: String,
    /// Where a build would write the module.
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug)]
pub struct InspectReport {
    pub modules: Vec<InspectedModule>,
}

impl Report for InspectReport {
    fn render(&self, out: &mut dyn Output) {
        if self.modules.is_empty() {
            out.warning("No web worker apps found.");
            return;
        }

        for (i, module) in self.modules.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.divider(&format!("{} ({})", module.app, module.path.display()));
            out.preformatted(module.content.trim_end());
        }
    }
}
