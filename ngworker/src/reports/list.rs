//! List command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct ListedApp {
    pub name: String,
    pub root: PathBuf,
    pub out_dir: PathBuf,
    /// Whether the root contains a worker tsconfig.
    pub worker: bool,
}

/// Every configured app, in declaration order.
#[derive(Debug)]
pub struct ListReport {
    pub project_path: PathBuf,
    pub apps: Vec<ListedApp>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.apps.is_empty() {
            out.preformatted(&format!("No apps defined in {}", self.project_path.display()));
            return;
        }

        out.section("Apps");
        for app in &self.apps {
            let kind = if app.worker { "worker" } else { "regular" };
            out.list_item(&format!(
                "{} [{}] {} -> {}",
                app.name,
                kind,
                app.root.display(),
                app.out_dir.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_lists_in_declaration_order() {
        let report = ListReport {
            project_path: PathBuf::from(".angular-cli.json"),
            apps: vec![
                ListedApp {
                    name: "demo".to_string(),
                    root: PathBuf::from("src"),
                    out_dir: PathBuf::from("dist/demo"),
                    worker: true,
                },
                ListedApp {
                    name: "admin".to_string(),
                    root: PathBuf::from("admin"),
                    out_dir: PathBuf::from("dist/admin"),
                    worker: false,
                },
            ],
        };
        let mut out = RecordingOutput::default();

        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "Apps:",
                "  - demo [worker] src -> dist/demo",
                "  - admin [regular] admin -> dist/admin",
            ]
        );
    }
}
