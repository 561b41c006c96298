//! Block rendering.

use super::{tag_line, Label, SEPARATOR};
use crate::domain::financing::{Financing, Property};
use crate::domain::locale::{format_currency, format_currency_exact, format_exact};

fn field(label: Label, value: impl AsRef<str>) -> String {
    format!("{}: {}", label.text(), value.as_ref())
}

/// Renders one record as a separator-bracketed block ending in a newline.
///
/// Stored fields are written at full precision so they read back unchanged.
/// The monthly and total payment lines are rounded to cents; the parser skips
/// them.
pub fn encode_block(record: &Financing) -> String {
    let terms = record.terms();
    let payment = record.payment();

    let mut lines = vec![
        SEPARATOR.to_string(),
        tag_line(record.kind()).to_string(),
        field(
            Label::PropertyValue,
            format_currency_exact(terms.property_value()),
        ),
        field(Label::LoanTerm, terms.loan_term_years().to_string()),
        field(
            Label::InterestRate,
            format_exact(terms.annual_interest_rate()),
        ),
    ];

    match record.property() {
        Property::House(house) => {
            lines.push(field(Label::BuiltArea, format_exact(house.built_area())));
            lines.push(field(Label::LandArea, format_exact(house.land_area())));
            lines.push(field(
                Label::FixedIncrease,
                format_currency_exact(house.fixed_increase()),
            ));
        }
        Property::Apartment(apartment) => {
            lines.push(field(
                Label::GarageSpaces,
                apartment.garage_spaces.to_string(),
            ));
            lines.push(field(Label::FloorNumber, apartment.floor_number.to_string()));
        }
        Property::Land(land) => {
            lines.push(field(Label::Zone, land.zone.label()));
        }
    }

    lines.push(field(Label::MonthlyPayment, format_currency(payment.monthly)));
    lines.push(field(Label::TotalPayment, format_currency(payment.total)));
    lines.push(SEPARATOR.to_string());

    let mut block = lines.join("\n");
    block.push('\n');
    block
}
