use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
    session::{ProjectArgs, Session},
};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let session = Session::load(&self.project)?;
        ops::list(&session).render(&mut TerminalOutput::new());
        Ok(())
    }
}
