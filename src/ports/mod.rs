//! Port traits implemented by the adapters.

pub mod config_port;
pub mod record_port;
pub mod report_port;
pub mod snapshot_port;
