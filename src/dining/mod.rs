//! Dining Orchestration
//!
//! The only subsystem with real state-machine semantics: it keeps
//! table occupancy and order lifecycle state consistent under
//! concurrent requests.
//!
//! - [`DiningStore`] - the store seam: multi-ledger reads plus the
//!   atomic write units (one SQLite implementation; tests run an
//!   in-memory fake against the same contract)
//! - [`DiningService`] - the orchestrator every caller goes through;
//!   it validates preconditions against fresh reads and returns typed
//!   failures

pub mod error;
pub mod service;
pub mod store;

pub use error::{DiningError, DiningResult};
pub use service::DiningService;
pub use store::{DiningStore, SqliteDiningStore};
