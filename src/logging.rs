//! Tracing setup for hosts that do not install their own subscriber.
//!
//! The engine only emits `tracing` events; applications that already have a
//! subscriber should not call [`init`].

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset. Module paths double as targets,
/// e.g. `RUST_LOG=dragkit::drop_list=trace`.
pub const DEFAULT_FILTER: &str = "dragkit=info";

static INIT: OnceCell<bool> = OnceCell::new();

/// Install a fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; returns `false` if another global subscriber
/// was already installed.
pub fn init() -> bool {
    *INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok()
    })
}
