use clap::Args;
use eyre::Result;

use crate::{
    ops::{self, clean::CleanOptions},
    reports::{Report, TerminalOutput},
    session::{ProjectArgs, Session},
};

#[derive(Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let session = Session::load(&self.project)?;
        let report = ops::clean(
            &session,
            CleanOptions {
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
