//! Sift Pass - the boundary between the matcher and the compiler's passes.
//!
//! A middle-end runs a fixed sequence of passes over one tree. Each pass may
//! use the matcher to find rewrite sites:
//!
//! ```text
//! search(tree, pattern) -> MatchSet
//!     for each site: matches(tree, site, pattern) -> Bindings
//!         rewrite site in place
//! ```
//!
//! This crate provides:
//! - [`Pass`]: one in-place transformation reporting whether it changed the tree
//! - [`PassManager`]: applies passes in order and records what each one did
//! - [`PatternRewrite`]: a pass built from a pattern and a rewrite callback
//!
//! # Tracing
//!
//! Set `RUST_LOG` and call [`init_tracing`] to see pass spans and matcher
//! events, e.g. `RUST_LOG=sift_pass=debug,sift_match=trace`.

mod error;
mod manager;
mod rewrite;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use error::PassError;
pub use manager::{Pass, PassManager, PassRecord};
pub use rewrite::PatternRewrite;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
