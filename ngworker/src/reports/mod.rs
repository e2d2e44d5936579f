//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod build;
mod check;
mod clean;
mod inspect;
mod list;
mod output;

pub use build::{BuildReport, PlanReport, PlannedApp};
pub use check::CheckReport;
pub use clean::CleanReport;
pub use inspect::{InspectReport, InspectedModule};
pub use list::{ListReport, ListedApp};
pub use output::{Report, TerminalOutput};
