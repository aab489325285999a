pub mod classifier;
pub mod org;
pub mod report;
pub mod table;

pub use classifier::Classification;
pub use org::{column_label, write_org};
pub use report::{ReportRenderer, Rendered, Streams, document_name};
pub use table::{BinTable, resolve_1d};
