//! Aggregate totals over a collection of financing records.

use crate::domain::financing::{Financing, PropertyKind};
use crate::domain::locale::format_currency;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub record_count: usize,
    pub house_count: usize,
    pub apartment_count: usize,
    pub land_count: usize,
    pub total_property_value: f64,
    pub total_financing_value: f64,
}

impl Summary {
    pub fn compute(records: &[Financing]) -> Self {
        records.iter().fold(Summary::default(), |mut acc, record| {
            acc.record_count += 1;
            match record.kind() {
                PropertyKind::House => acc.house_count += 1,
                PropertyKind::Apartment => acc.apartment_count += 1,
                PropertyKind::Land => acc.land_count += 1,
            }
            acc.total_property_value += record.property_value();
            acc.total_financing_value += record.total_payment();
            acc
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Records:                  {} ({} houses, {} apartments, {} land)",
            self.record_count, self.house_count, self.apartment_count, self.land_count
        );
        let _ = writeln!(
            out,
            "Total property value:     {}",
            format_currency(self.total_property_value)
        );
        let _ = writeln!(
            out,
            "Total financing value:    {}",
            format_currency(self.total_financing_value)
        );
        out
    }
}
