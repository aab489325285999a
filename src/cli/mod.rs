mod handlers;
pub mod parse;

use clap::Parser;
pub use handlers::init_logging;
pub use parse::Cli;

use crate::core::error::DumpError;

pub fn run() -> Result<(), DumpError> {
    let cli = parse::Cli::parse();
    handlers::dump(cli).map(|_| ())
}
