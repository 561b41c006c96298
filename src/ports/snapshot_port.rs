//! Whole-collection snapshot port.

use crate::domain::error::RealfinError;
use crate::domain::financing::Financing;

pub trait SnapshotPort {
    /// Replaces any previous snapshot with `records`.
    fn save(&self, records: &[Financing]) -> Result<(), RealfinError>;

    /// Fails with [`RealfinError::NotFound`] when no snapshot exists.
    fn load(&self) -> Result<Vec<Financing>, RealfinError>;
}
