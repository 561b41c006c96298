#![allow(dead_code)]

use realfin::domain::error::RealfinError;
use realfin::domain::financing::{Apartment, Financing, House, Land, LoanTerms, ZoneType};
use realfin::ports::record_port::RecordPort;
use realfin::ports::snapshot_port::SnapshotPort;
use std::cell::RefCell;

/// In-memory record store standing in for the text file.
pub struct MemoryRecordPort {
    pub records: RefCell<Vec<Financing>>,
}

impl MemoryRecordPort {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<Financing>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }
}

impl RecordPort for MemoryRecordPort {
    fn append(&self, record: &Financing) -> Result<(), RealfinError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Financing>, RealfinError> {
        Ok(self.records.borrow().clone())
    }
}

/// In-memory snapshot store; `None` means nothing was ever saved.
pub struct MemorySnapshotPort {
    pub saved: RefCell<Option<Vec<Financing>>>,
    pub saves: RefCell<usize>,
}

impl MemorySnapshotPort {
    pub fn new() -> Self {
        Self {
            saved: RefCell::new(None),
            saves: RefCell::new(0),
        }
    }
}

impl SnapshotPort for MemorySnapshotPort {
    fn save(&self, records: &[Financing]) -> Result<(), RealfinError> {
        *self.saved.borrow_mut() = Some(records.to_vec());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Financing>, RealfinError> {
        self.saved.borrow().clone().ok_or(RealfinError::NotFound {
            path: "memory".into(),
        })
    }
}

pub fn terms(value: f64, years: u32, rate: f64) -> LoanTerms {
    LoanTerms::new(value, years, rate).unwrap()
}

pub fn make_house(value: f64, years: u32, rate: f64) -> Financing {
    Financing::house(terms(value, years, rate), House::new(150.0, 300.0).unwrap())
}

pub fn make_apartment(value: f64, years: u32, rate: f64) -> Financing {
    Financing::apartment(terms(value, years, rate), Apartment::new(1, 5))
}

pub fn make_land(value: f64, years: u32, rate: f64, zone: ZoneType) -> Financing {
    Financing::land(terms(value, years, rate), Land::new(zone))
}

/// One record of each variant, in house/apartment/land order.
pub fn mixed_records() -> Vec<Financing> {
    vec![
        make_house(500_000.0, 30, 10.0),
        make_apartment(200_000.0, 15, 4.5),
        make_land(80_000.0, 5, 9.0, ZoneType::Commercial),
    ]
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
