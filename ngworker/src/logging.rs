//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// How chatty the command line asked us to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Filter for an explicit `-q`/`-v`; `None` defers to `RUST_LOG`.
    fn directive(self) -> Option<&'static str> {
        match self {
            Verbosity::Quiet => Some("warn"),
            Verbosity::Normal => None,
            Verbosity::Verbose => Some("debug"),
        }
    }
}

/// Install the global subscriber. Logs go to stderr so that bundle
/// summaries and rendered configs on stdout stay pipeable.
pub fn init(verbosity: Verbosity) {
    let filter = match verbosity.directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
