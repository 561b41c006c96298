//! Report generation port trait.

use crate::domain::error::RealfinError;
use crate::domain::financing::Financing;
use crate::domain::summary::Summary;
use std::path::Path;

/// Port for writing financing reports.
pub trait ReportPort {
    fn write(
        &self,
        records: &[Financing],
        summary: &Summary,
        output_path: &Path,
    ) -> Result<(), RealfinError>;
}
