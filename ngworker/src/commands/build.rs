use clap::Args;
use eyre::Result;

use crate::{
    ops::{self, build::BuildOptions},
    reports::{Report, TerminalOutput},
    session::{ProjectArgs, Session},
};

#[derive(Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Only build this app (repeatable)
    #[arg(long = "app", value_name = "NAME")]
    pub app: Vec<String>,

    /// Keep building the remaining apps after one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Print what would be built without touching anything
    #[arg(long)]
    pub dry_run: bool,
}

impl BuildCommand {
    pub async fn run(&self) -> Result<()> {
        let session = Session::load(&self.project)?;
        let opts = BuildOptions {
            only: self.app.clone(),
            keep_going: self.keep_going,
        };

        if self.dry_run {
            ops::plan(&session, opts)?.render(&mut TerminalOutput::new());
            return Ok(());
        }

        let report = ops::build(&session, opts).await?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
