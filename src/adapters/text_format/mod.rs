//! Human-readable text file persistence.
//!
//! Each record is one block bracketed by [`SEPARATOR`] lines, with one
//! `Label: value` line per attribute. `encode` renders blocks, `parse`
//! recovers records from a whole file, and [`TextFileAdapter`] appends
//! blocks to disk and re-reads the file on every load.

pub mod encode;
pub mod parse;

use crate::domain::error::RealfinError;
use crate::domain::financing::{Financing, PropertyKind};
use crate::ports::record_port::RecordPort;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

pub use encode::encode_block;
pub use parse::parse_records;

pub const SEPARATOR: &str = "----------------------------------------";

const TAGS: [(PropertyKind, &str); 3] = [
    (PropertyKind::House, "Tipo: Casa"),
    (PropertyKind::Apartment, "Tipo: Apartamento"),
    (PropertyKind::Land, "Tipo de imóvel: Terreno"),
];

pub fn tag_line(kind: PropertyKind) -> &'static str {
    TAGS.iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, tag)| *tag)
        .unwrap_or_default()
}

pub(crate) fn tag_kind(line: &str) -> Option<PropertyKind> {
    TAGS.iter().find(|(_, tag)| *tag == line).map(|(k, _)| *k)
}

pub(crate) fn is_separator(line: &str) -> bool {
    line.trim_end() == SEPARATOR
}

/// Every label a block line may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Label {
    Kind,
    LandKind,
    PropertyValue,
    LoanTerm,
    InterestRate,
    BuiltArea,
    LandArea,
    FixedIncrease,
    GarageSpaces,
    FloorNumber,
    Zone,
    MonthlyPayment,
    TotalPayment,
}

const LABELS: [(Label, &str); 13] = [
    (Label::Kind, "Tipo"),
    (Label::LandKind, "Tipo de imóvel"),
    (Label::PropertyValue, "Valor do imóvel"),
    (Label::LoanTerm, "Prazo do financiamento (anos)"),
    (Label::InterestRate, "Taxa de juros anual (%)"),
    (Label::BuiltArea, "Área construída (m²)"),
    (Label::LandArea, "Tamanho do terreno (m²)"),
    (Label::FixedIncrease, "Acréscimo fixo"),
    (Label::GarageSpaces, "Vagas na garagem"),
    (Label::FloorNumber, "Número do andar"),
    (Label::Zone, "Tipo de zona"),
    (Label::MonthlyPayment, "Valor da parcela mensal"),
    (Label::TotalPayment, "Valor total do financiamento"),
];

impl Label {
    pub(crate) fn text(self) -> &'static str {
        LABELS
            .iter()
            .find(|(label, _)| *label == self)
            .map(|(_, text)| *text)
            .unwrap_or_default()
    }

    pub(crate) fn from_text(text: &str) -> Option<Self> {
        LABELS
            .iter()
            .find(|(_, t)| *t == text)
            .map(|(label, _)| *label)
    }

    /// Variant-specific labels; `None` for labels shared by every variant.
    pub(crate) fn owner(self) -> Option<PropertyKind> {
        match self {
            Label::BuiltArea | Label::LandArea | Label::FixedIncrease => Some(PropertyKind::House),
            Label::GarageSpaces | Label::FloorNumber => Some(PropertyKind::Apartment),
            Label::Zone => Some(PropertyKind::Land),
            _ => None,
        }
    }
}

/// Text file adapter: append one block per record, re-parse on load.
pub struct TextFileAdapter {
    path: PathBuf,
}

impl TextFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordPort for TextFileAdapter {
    fn append(&self, record: &Financing) -> Result<(), RealfinError> {
        let block = encode_block(record);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())?;
        tracing::debug!(path = %self.path.display(), kind = %record.kind(), "appended record");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Financing>, RealfinError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no saved records");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records = parse_records(&content)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }
}
