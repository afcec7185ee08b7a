// fincheck-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contract for record ingestion collaborators.
pub mod ports;

// 2. Domain (business core)
// Records, rule set, validators, quality thresholds.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// Config files, CSV ingestion, atomic file writes.
pub mod infrastructure;

// 4. Application (Use Cases)
// Aggregation of a batch into a quality report, run artifact persistence.
pub mod application;

pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::FincheckError;
