//! Core domain types and logic.

pub mod error;
pub mod financing;
pub mod locale;
pub mod settings;
pub mod summary;
pub mod valuation;
