//! A collection of constants.

/// Name reported in fatal diagnostics.
pub const APP_NAME: &str = "histogram_pool_dumper";

/// Extension appended to every org document.
pub const ORG_EXTENSION: &str = "org";

/// Column labels for the shared bin-range columns of an org table.
pub const XMIN_LABEL: &str = "xmin";
pub const XMAX_LABEL: &str = "xmax";

/// Org table separator row.
pub const ORG_SEPARATOR: &str = "|-";

/// Org table name keyword.
pub const ORG_TBLNAME: &str = "#+TBLNAME:";

/// Defaults mirrored by the command line.
pub const DEFAULT_LOGGING_LABEL: &str = "warning";
pub const DEFAULT_OUTPUT_FORMAT: &str = "clog";
pub const DEFAULT_OUTPUT_DIRECTORY: &str = ".";

/// Archive keywords.
pub const KW_POOL: &str = "pool";
pub const KW_HISTOGRAM: &str = "histogram";
pub const KW_END: &str = "end";
pub const KIND_1D: &str = "1d";
pub const KIND_2D: &str = "2d";
