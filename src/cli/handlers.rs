use tracing::debug;

use crate::{
    core::{config::LogPriority, error::DumpError},
    driver::{Driver, RunReport},
};

use super::parse::Cli;

/// Install the stderr subscriber at `priority`.
///
/// Returns `false` and keeps the existing one when a global subscriber is
/// already installed.
#[must_use]
pub fn init_logging(priority: LogPriority) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_max_level(priority.level_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if !installed {
        debug!("global subscriber already set, keeping it");
    }
    installed
}

/// Drive one full setup → initialize → run → reset cycle.
pub fn dump(cli: Cli) -> Result<RunReport, DumpError> {
    let priority: LogPriority = cli.logging_priority.parse()?;
    let _ = init_logging(priority);

    let params = cli.into_params();
    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut buf = Vec::new();
        params.dump(&mut buf)?;
        debug!("{}", String::from_utf8_lossy(&buf));
    }

    let mut driver = Driver::new();
    driver.setup(params)?;
    driver.initialize()?;
    let report = driver.run()?;
    driver.reset()?;
    debug!(files = report.files.len(), "run complete");
    Ok(report)
}
