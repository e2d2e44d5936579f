use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
    session::{ProjectArgs, Session},
};

#[derive(Args)]
pub struct InspectCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Only show this app (repeatable)
    #[arg(long = "app", value_name = "NAME")]
    pub app: Vec<String>,
}

impl InspectCommand {
    pub fn run(&self) -> Result<()> {
        let session = Session::load(&self.project)?;
        ops::inspect(&session, self.app.clone())?.render(&mut TerminalOutput::new());
        Ok(())
    }
}
