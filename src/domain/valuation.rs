//! Payment computation, one formula per property variant.
//!
//! - House: linear amortization plus interest plus a fixed increase capped
//!   at the monthly interest portion.
//! - Apartment: PRICE (French) annuity.
//! - Land: linear amortization with interest, plus 2%.
//!
//! In every case `total = monthly * installments`.

use crate::domain::financing::{Apartment, Financing, House, LoanTerms, Property};

pub const LAND_SURCHARGE: f64 = 1.02;

/// Result of valuing one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payment {
    pub monthly: f64,
    pub total: f64,
    /// Set when a House's fixed increase exceeded the interest portion; holds
    /// the capped value that should replace it.
    pub adjusted_increase: Option<f64>,
}

impl Payment {
    fn from_monthly(terms: &LoanTerms, monthly: f64) -> Self {
        Self {
            monthly,
            total: monthly * terms.installments() as f64,
            adjusted_increase: None,
        }
    }
}

/// Values a record without touching it.
pub fn compute(record: &Financing) -> Payment {
    let terms = record.terms();
    match record.property() {
        Property::House(house) => house_payment(terms, house),
        Property::Apartment(apartment) => apartment_payment(terms, apartment),
        Property::Land(_) => land_payment(terms),
    }
}

/// Generic linear formula: `(value / n) * (1 + i)`.
pub fn base_monthly(terms: &LoanTerms) -> f64 {
    amortization(terms) * (1.0 + terms.monthly_interest_rate())
}

fn amortization(terms: &LoanTerms) -> f64 {
    terms.property_value() / terms.installments() as f64
}

fn house_payment(terms: &LoanTerms, house: &House) -> Payment {
    let base = amortization(terms);
    let interest = base * terms.monthly_interest_rate();

    let (increase, adjusted_increase) = if house.fixed_increase() > interest {
        (interest, Some(interest))
    } else {
        (house.fixed_increase(), None)
    };

    Payment {
        adjusted_increase,
        ..Payment::from_monthly(terms, base + interest + increase)
    }
}

fn apartment_payment(terms: &LoanTerms, _apartment: &Apartment) -> Payment {
    let i = terms.monthly_interest_rate();
    let growth = (1.0 + i).powf(terms.installments() as f64);
    let monthly = terms.property_value() * i * growth / (growth - 1.0);
    Payment::from_monthly(terms, monthly)
}

fn land_payment(terms: &LoanTerms) -> Payment {
    Payment::from_monthly(terms, base_monthly(terms) * LAND_SURCHARGE)
}

impl Financing {
    pub fn payment(&self) -> Payment {
        compute(self)
    }

    pub fn monthly_payment(&self) -> f64 {
        compute(self).monthly
    }

    pub fn total_payment(&self) -> f64 {
        compute(self).total
    }

    /// Values the record and stores any House increase adjustment.
    ///
    /// Calling it again reports no adjustment and returns the same amounts.
    pub fn settle(&mut self) -> Payment {
        let payment = compute(self);
        if let (Some(adjusted), Property::House(house)) =
            (payment.adjusted_increase, self.property_mut())
        {
            tracing::warn!(
                configured = house.fixed_increase(),
                adjusted,
                "house fixed increase exceeds the monthly interest portion, capping it"
            );
            house.set_fixed_increase(adjusted);
        }
        payment
    }
}
