#![doc(test(attr(deny(warnings))))]

//! GigFin Core offers ledger, scoring, forecasting, and leak-detection
//! primitives for gig-worker personal finance applications. Everything here is
//! a pure projection over a transaction ledger; the UI and LLM narration call
//! sit above this crate and only read what it computes.

pub mod config;
pub mod currency;
pub mod errors;
pub mod forecast;
pub mod gamification;
pub mod import;
pub mod leaks;
pub mod ledger;
pub mod narration;
pub mod scoring;
pub mod segmentation;
pub mod snapshot;
pub mod storage;
pub mod stress;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("GigFin Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
