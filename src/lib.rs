#![doc(test(attr(deny(warnings))))]

//! Credit Tracker keeps a list of credit cards, the monthly statement credits
//! each card offers, and whether each credit has been used this month.
//!
//! [`core::CreditTracker`] is the entry point: opening a session loads the
//! wallet, clears flags left over from a previous month, seeds a sample card
//! on an empty wallet, and persists every later change immediately.

pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::core::{CreditTracker, TrackerError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git = build.git_hash,
            status = build.git_status,
            built = build.timestamp,
            profile = build.profile,
            "Credit Tracker tracing initialized."
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
