// netpulse-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL LAYERS ---

// 1. Ports: contracts with the outside world (source, publisher, report sink).
pub mod ports;

// 2. Domain: dataset model, quality rules, KPI aggregation, project config.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure: DuckDB CSV adapters, JSON reports, config files, fs.
pub mod infrastructure;

// 4. Application: pipeline controller, sample data, clean.
pub mod application;

// --- GLOBAL ERROR ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::NetpulseError;
