//! Append-friendly record storage port.

use crate::domain::error::RealfinError;
use crate::domain::financing::Financing;

pub trait RecordPort {
    /// Appends one record after any already stored.
    fn append(&self, record: &Financing) -> Result<(), RealfinError>;

    /// Reads every stored record in insertion order. Missing storage reads
    /// as an empty collection.
    fn load_all(&self) -> Result<Vec<Financing>, RealfinError>;
}
