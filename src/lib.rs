//! realfin: real-estate financing valuation and record persistence.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete file-backed implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
