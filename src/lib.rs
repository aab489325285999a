//! Public-facing crate root – re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod driver;
pub mod render;

use std::path::Path;

pub use crate::core::{
    APP_NAME,
    config::{DriverParams, LogPriority, OutputFormat},
    error::{ArchiveError, ConfigError, DumpError, LifecycleError, RenderError},
    histogram::{Bin, Histogram1D, Histogram2D, HistogramKind},
    pool::{HistogramPool, PoolQuery},
};
pub use driver::{Driver, FileReport, RunReport};
pub use render::{BinTable, Classification, ReportRenderer, document_name};

/// Convenience function: load one archive and return its org document as
/// text, without touching the filesystem beyond the read.
pub fn org_report(archive: &Path) -> Result<String, DumpError> {
    let pool = crate::core::archive::load_pool(archive)?;
    let mut out = Vec::new();
    render::org::write_org(&pool, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
