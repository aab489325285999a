//! Subscriber installation from library callers.

use histogram_pool_dumper::{LogPriority, cli::init_logging};

#[test]
fn second_install_keeps_the_first_subscriber() {
    assert!(init_logging(LogPriority::Warning));
    assert!(!init_logging(LogPriority::Debug));
    tracing::warn!("still logging after a repeated install");
}
