//! Aggregates the data model, configuration and loader layer.

pub mod archive;
pub mod config;
pub mod constants;
pub mod env;
pub mod error;
pub mod histogram;
pub mod pool;

// re-export frequently-used items for convenience
pub use archive::{load_pool, read_pool};
pub use config::{DriverParams, LogPriority, OutputFormat, Settings};
pub use constants::APP_NAME;
pub use env::expand_env;
pub use error::{ArchiveError, ConfigError, DumpError, LifecycleError, RenderError};
pub use histogram::{Bin, Histogram1D, Histogram2D, HistogramKind};
pub use pool::{HistogramPool, PoolQuery};
