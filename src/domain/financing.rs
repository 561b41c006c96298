//! Financing records: validated loan terms plus a property variant.

use crate::domain::error::RealfinError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_FIXED_INCREASE: f64 = 80.0;
pub const MONTHS_PER_YEAR: u32 = 12;

/// Loan terms shared by every property variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    property_value: f64,
    loan_term_years: u32,
    annual_interest_rate: f64,
}

impl LoanTerms {
    /// `annual_interest_rate` is a percentage, e.g. `4.5` for 4.5% a year.
    pub fn new(
        property_value: f64,
        loan_term_years: u32,
        annual_interest_rate: f64,
    ) -> Result<Self, RealfinError> {
        let terms = Self {
            property_value,
            loan_term_years,
            annual_interest_rate,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<(), RealfinError> {
        if !self.property_value.is_finite() || self.property_value <= 0.0 {
            return Err(RealfinError::invalid(
                "property_value",
                "must be a positive number",
            ));
        }
        if self.loan_term_years == 0 {
            return Err(RealfinError::invalid(
                "loan_term_years",
                "must be at least one year",
            ));
        }
        if !self.annual_interest_rate.is_finite()
            || self.annual_interest_rate <= 0.0
            || self.annual_interest_rate > 100.0
        {
            return Err(RealfinError::invalid(
                "annual_interest_rate",
                "must be greater than 0 and at most 100",
            ));
        }
        Ok(())
    }

    pub fn property_value(&self) -> f64 {
        self.property_value
    }

    pub fn loan_term_years(&self) -> u32 {
        self.loan_term_years
    }

    pub fn annual_interest_rate(&self) -> f64 {
        self.annual_interest_rate
    }

    pub fn monthly_interest_rate(&self) -> f64 {
        self.annual_interest_rate / 100.0 / MONTHS_PER_YEAR as f64
    }

    pub fn installments(&self) -> u32 {
        self.loan_term_years * MONTHS_PER_YEAR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Residential,
    Commercial,
}

impl ZoneType {
    pub fn name(self) -> &'static str {
        match self {
            ZoneType::Residential => "residential",
            ZoneType::Commercial => "commercial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoneType::Residential => "Residencial",
            ZoneType::Commercial => "Comercial",
        }
    }

    /// Accepts the pt-BR label or the English name, case-insensitively.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "residencial" | "residential" => Some(ZoneType::Residential),
            "comercial" | "commercial" => Some(ZoneType::Commercial),
            _ => None,
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    built_area: f64,
    land_area: f64,
    fixed_increase: f64,
}

impl House {
    /// Areas are in square meters. The fixed increase starts at
    /// [`DEFAULT_FIXED_INCREASE`].
    pub fn new(built_area: f64, land_area: f64) -> Result<Self, RealfinError> {
        Self::with_fixed_increase(built_area, land_area, DEFAULT_FIXED_INCREASE)
    }

    pub fn with_fixed_increase(
        built_area: f64,
        land_area: f64,
        fixed_increase: f64,
    ) -> Result<Self, RealfinError> {
        let house = Self {
            built_area,
            land_area,
            fixed_increase,
        };
        house.validate()?;
        Ok(house)
    }

    pub fn validate(&self) -> Result<(), RealfinError> {
        non_negative("built_area", self.built_area)?;
        non_negative("land_area", self.land_area)?;
        non_negative("fixed_increase", self.fixed_increase)
    }

    pub fn built_area(&self) -> f64 {
        self.built_area
    }

    pub fn land_area(&self) -> f64 {
        self.land_area
    }

    pub fn fixed_increase(&self) -> f64 {
        self.fixed_increase
    }

    pub(crate) fn set_fixed_increase(&mut self, value: f64) {
        self.fixed_increase = value;
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), RealfinError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RealfinError::invalid(field, "must be a non-negative number"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apartment {
    pub garage_spaces: u32,
    pub floor_number: i32,
}

impl Apartment {
    pub fn new(garage_spaces: u32, floor_number: i32) -> Self {
        Self {
            garage_spaces,
            floor_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Land {
    pub zone: ZoneType,
}

impl Land {
    pub fn new(zone: ZoneType) -> Self {
        Self { zone }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Property {
    House(House),
    Apartment(Apartment),
    Land(Land),
}

impl Property {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Property::House(_) => PropertyKind::House,
            Property::Apartment(_) => PropertyKind::Apartment,
            Property::Land(_) => PropertyKind::Land,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    House,
    Apartment,
    Land,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::House => "house",
            PropertyKind::Apartment => "apartment",
            PropertyKind::Land => "land",
        };
        f.write_str(name)
    }
}

/// One financing record. Collections are plain `Vec<Financing>` in
/// insertion order; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financing {
    terms: LoanTerms,
    property: Property,
}

impl Financing {
    pub fn new(terms: LoanTerms, property: Property) -> Self {
        Self { terms, property }
    }

    pub fn house(terms: LoanTerms, house: House) -> Self {
        Self::new(terms, Property::House(house))
    }

    pub fn apartment(terms: LoanTerms, apartment: Apartment) -> Self {
        Self::new(terms, Property::Apartment(apartment))
    }

    pub fn land(terms: LoanTerms, land: Land) -> Self {
        Self::new(terms, Property::Land(land))
    }

    /// Re-checks every invariant; used after deserialization.
    pub fn validate(&self) -> Result<(), RealfinError> {
        self.terms.validate()?;
        match &self.property {
            Property::House(house) => house.validate(),
            Property::Apartment(_) | Property::Land(_) => Ok(()),
        }
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub(crate) fn property_mut(&mut self) -> &mut Property {
        &mut self.property
    }

    pub fn kind(&self) -> PropertyKind {
        self.property.kind()
    }

    pub fn property_value(&self) -> f64 {
        self.terms.property_value
    }
}
