//! CSV export of a financing collection.

use crate::domain::error::RealfinError;
use crate::domain::financing::{Financing, Property};
use crate::domain::summary::Summary;
use crate::ports::report_port::ReportPort;
use std::path::Path;

const HEADER: [&str; 13] = [
    "index",
    "kind",
    "property_value",
    "loan_term_years",
    "annual_interest_rate",
    "built_area",
    "land_area",
    "fixed_increase",
    "garage_spaces",
    "floor_number",
    "zone",
    "monthly_payment",
    "total_payment",
];

pub struct CsvReportAdapter;

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn row(index: usize, record: &Financing) -> Vec<String> {
    let terms = record.terms();
    let payment = record.payment();

    let mut variant = vec![String::new(); 6];
    match record.property() {
        Property::House(house) => {
            variant[0] = money(house.built_area());
            variant[1] = money(house.land_area());
            variant[2] = money(house.fixed_increase());
        }
        Property::Apartment(apartment) => {
            variant[3] = apartment.garage_spaces.to_string();
            variant[4] = apartment.floor_number.to_string();
        }
        Property::Land(land) => {
            variant[5] = land.zone.name().to_string();
        }
    }

    let mut fields = vec![
        (index + 1).to_string(),
        record.kind().to_string(),
        money(terms.property_value()),
        terms.loan_term_years().to_string(),
        format!("{}", terms.annual_interest_rate()),
    ];
    fields.extend(variant);
    fields.push(money(payment.monthly));
    fields.push(money(payment.total));
    fields
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        records: &[Financing],
        summary: &Summary,
        output_path: &Path,
    ) -> Result<(), RealfinError> {
        let report_err = |e: csv::Error| RealfinError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        };

        let mut wtr = csv::Writer::from_path(output_path).map_err(report_err)?;
        wtr.write_record(HEADER).map_err(report_err)?;

        for (index, record) in records.iter().enumerate() {
            wtr.write_record(row(index, record)).map_err(report_err)?;
        }

        let mut total = vec![String::new(); HEADER.len()];
        total[0] = "TOTAL".to_string();
        total[1] = summary.record_count.to_string();
        total[2] = money(summary.total_property_value);
        total[HEADER.len() - 1] = money(summary.total_financing_value);
        wtr.write_record(&total).map_err(report_err)?;

        wtr.flush()?;
        tracing::info!(path = %output_path.display(), rows = records.len(), "csv report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::financing::{Apartment, House, Land, LoanTerms, ZoneType};
    use std::fs;
    use tempfile::TempDir;

    fn sample_records() -> Vec<Financing> {
        vec![
            Financing::house(
                LoanTerms::new(1_200_000.0, 10, 12.0).unwrap(),
                House::new(150.0, 300.0).unwrap(),
            ),
            Financing::apartment(
                LoanTerms::new(200_000.0, 15, 4.5).unwrap(),
                Apartment::new(2, 7),
            ),
            Financing::land(
                LoanTerms::new(120_000.0, 10, 6.0).unwrap(),
                Land::new(ZoneType::Commercial),
            ),
        ]
    }

    #[test]
    fn writes_header_rows_and_total() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        let records = sample_records();
        let summary = Summary::compute(&records);

        CsvReportAdapter.write(&records, &summary, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);

        assert_eq!(&rows[0][1], "house");
        assert_eq!(&rows[0][7], "80.00");
        assert_eq!(&rows[0][11], "10180.00");
        assert_eq!(&rows[1][1], "apartment");
        assert_eq!(&rows[1][8], "2");
        assert_eq!(&rows[1][9], "7");
        assert_eq!(&rows[1][11], "1529.99");
        assert_eq!(&rows[2][10], "commercial");
        assert_eq!(&rows[2][11], "1025.10");

        assert_eq!(&rows[3][0], "TOTAL");
        assert_eq!(&rows[3][1], "3");
        assert_eq!(&rows[3][2], "1520000.00");
    }

    #[test]
    fn empty_collection_writes_only_total() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        CsvReportAdapter
            .write(&[], &Summary::compute(&[]), &path)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("TOTAL,0,0.00"));
    }

    #[test]
    fn unwritable_path_is_report_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("report.csv");
        let err = CsvReportAdapter
            .write(&[], &Summary::default(), &path)
            .unwrap_err();
        assert!(matches!(err, RealfinError::Report { .. }));
    }
}
