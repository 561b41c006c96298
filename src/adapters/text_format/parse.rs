//! Block parser.
//!
//! Grammar, per block:
//!
//! ```text
//! block  := SEPARATOR line* SEPARATOR
//! line   := TAG | LABEL ":" value | blank
//! ```
//!
//! Exactly one tag line selects the variant. Each label may appear once;
//! every field the variant needs must be present and labels owned by other
//! variants are rejected.

use super::{is_separator, tag_kind, Label};
use crate::domain::error::{ParseError, RealfinError};
use crate::domain::financing::{
    Apartment, Financing, House, Land, LoanTerms, PropertyKind, ZoneType,
};
use crate::domain::locale::{parse_decimal, parse_integer};

/// Parses every block in `content`, in file order.
///
/// Text outside blocks is ignored. A file ending inside a block is an error.
pub fn parse_records(content: &str) -> Result<Vec<Financing>, RealfinError> {
    let mut records = Vec::new();
    let mut buffer: Vec<(usize, &str)> = Vec::new();
    let mut inside = false;
    let mut opened_at = 0;
    let mut block = 0;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if is_separator(line) {
            if inside {
                block += 1;
                records.push(parse_block(&buffer, block, opened_at)?);
                buffer.clear();
            } else {
                opened_at = line_no;
            }
            inside = !inside;
        } else if inside {
            buffer.push((line_no, line));
        }
    }

    if inside {
        return Err(ParseError::new(
            "block is not closed by a separator line",
            block + 1,
            opened_at,
        )
        .into());
    }

    Ok(records)
}

#[derive(Debug, Clone, Copy)]
enum Value {
    Decimal(f64),
    Integer(i64),
    Zone(ZoneType),
}

struct BlockFields {
    block: usize,
    opened_at: usize,
    kind: Option<PropertyKind>,
    values: Vec<(Label, Value, usize)>,
}

impl BlockFields {
    fn new(block: usize, opened_at: usize) -> Self {
        Self {
            block,
            opened_at,
            kind: None,
            values: Vec::new(),
        }
    }

    fn error(&self, message: impl Into<String>, line: usize) -> ParseError {
        ParseError::new(message, self.block, line)
    }

    fn read_line(&mut self, line_no: usize, line: &str) -> Result<(), RealfinError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(kind) = tag_kind(line) {
            if self.kind.is_some() {
                return Err(self.error("duplicate type line", line_no).into());
            }
            self.kind = Some(kind);
            return Ok(());
        }

        let (label_text, raw) = line.split_once(':').ok_or_else(|| {
            self.error(format!("expected 'label: value', found '{}'", line), line_no)
        })?;
        let label = Label::from_text(label_text.trim()).ok_or_else(|| {
            self.error(format!("unknown field '{}'", label_text.trim()), line_no)
        })?;

        let value = match label {
            Label::Kind | Label::LandKind => {
                return Err(RealfinError::UnknownVariant {
                    block: self.block,
                    line: line_no,
                });
            }
            Label::MonthlyPayment | Label::TotalPayment => return Ok(()),
            Label::PropertyValue
            | Label::InterestRate
            | Label::BuiltArea
            | Label::LandArea
            | Label::FixedIncrease => parse_decimal(raw).map(Value::Decimal),
            Label::LoanTerm | Label::GarageSpaces | Label::FloorNumber => {
                parse_integer(raw).map(Value::Integer)
            }
            Label::Zone => ZoneType::from_label(raw).map(Value::Zone),
        }
        .ok_or_else(|| {
            self.error(
                format!("invalid value '{}' for '{}'", raw.trim(), label.text()),
                line_no,
            )
        })?;

        if self.values.iter().any(|(seen, _, _)| *seen == label) {
            return Err(self
                .error(format!("duplicate field '{}'", label.text()), line_no)
                .into());
        }
        self.values.push((label, value, line_no));
        Ok(())
    }

    fn value(&self, label: Label) -> Result<Value, ParseError> {
        self.values
            .iter()
            .find(|(seen, _, _)| *seen == label)
            .map(|(_, value, _)| *value)
            .ok_or_else(|| {
                self.error(
                    format!("missing field '{}'", label.text()),
                    self.opened_at,
                )
            })
    }

    fn decimal(&self, label: Label) -> Result<f64, ParseError> {
        match self.value(label)? {
            Value::Decimal(v) => Ok(v),
            _ => Err(self.error(format!("'{}' is not a decimal", label.text()), self.opened_at)),
        }
    }

    fn integer<T: TryFrom<i64>>(&self, label: Label) -> Result<T, ParseError> {
        match self.value(label)? {
            Value::Integer(v) => T::try_from(v).map_err(|_| {
                self.error(
                    format!("'{}' is out of range: {}", label.text(), v),
                    self.opened_at,
                )
            }),
            _ => Err(self.error(format!("'{}' is not an integer", label.text()), self.opened_at)),
        }
    }

    fn zone(&self) -> Result<ZoneType, ParseError> {
        match self.value(Label::Zone)? {
            Value::Zone(zone) => Ok(zone),
            _ => Err(self.error("invalid zone", self.opened_at)),
        }
    }

    fn into_record(self) -> Result<Financing, RealfinError> {
        let kind = self.kind.ok_or(RealfinError::UnknownVariant {
            block: self.block,
            line: self.opened_at,
        })?;

        if let Some((label, _, line)) = self
            .values
            .iter()
            .find(|(label, _, _)| label.owner().is_some_and(|owner| owner != kind))
        {
            return Err(self
                .error(
                    format!("field '{}' does not belong to a {} block", label.text(), kind),
                    *line,
                )
                .into());
        }

        let invalid = |e: RealfinError| -> RealfinError {
            self.error(e.to_string(), self.opened_at).into()
        };

        let terms = LoanTerms::new(
            self.decimal(Label::PropertyValue)?,
            self.integer(Label::LoanTerm)?,
            self.decimal(Label::InterestRate)?,
        )
        .map_err(invalid)?;

        let record = match kind {
            PropertyKind::House => {
                let house = House::with_fixed_increase(
                    self.decimal(Label::BuiltArea)?,
                    self.decimal(Label::LandArea)?,
                    self.decimal(Label::FixedIncrease)?,
                )
                .map_err(invalid)?;
                Financing::house(terms, house)
            }
            PropertyKind::Apartment => Financing::apartment(
                terms,
                Apartment::new(
                    self.integer(Label::GarageSpaces)?,
                    self.integer(Label::FloorNumber)?,
                ),
            ),
            PropertyKind::Land => Financing::land(terms, Land::new(self.zone()?)),
        };
        Ok(record)
    }
}

fn parse_block(
    lines: &[(usize, &str)],
    block: usize,
    opened_at: usize,
) -> Result<Financing, RealfinError> {
    let mut fields = BlockFields::new(block, opened_at);
    for (line_no, line) in lines {
        fields.read_line(*line_no, line)?;
    }
    fields.into_record()
}
