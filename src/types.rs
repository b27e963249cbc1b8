//! Core data types: country records, attribute kinds, predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::GRID_SIZE;

/// Country property a predicate can test. Closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Tourists,
    GdpPerCapita,
    Population,
    Co2Emissions,
    Region,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 5] = [
        AttributeKind::Tourists,
        AttributeKind::GdpPerCapita,
        AttributeKind::Population,
        AttributeKind::Co2Emissions,
        AttributeKind::Region,
    ];

    /// Field name in the dataset file.
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Tourists => "tourists",
            AttributeKind::GdpPerCapita => "gdp_per_capita",
            AttributeKind::Population => "population",
            AttributeKind::Co2Emissions => "co2_emissions",
            AttributeKind::Region => "region",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, AttributeKind::Region)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw numeric attribute as it appears in the file: a JSON number, a
/// numeric-looking string, or anything else (kept so one odd field does not
/// reject the whole table). Coercion happens in [`crate::evaluator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// One row of the country table. Immutable for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    /// ISO 3166-1 alpha-2 code, used only for flag lookup.
    #[serde(rename = "iso2", alias = "code", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tourists: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gdp_per_capita: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emissions: Option<AttributeValue>,
}

impl CountryRecord {
    /// Record with a name and region and no numeric attributes.
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            region: region.into(),
            tourists: None,
            gdp_per_capita: None,
            population: None,
            co2_emissions: None,
        }
    }

    /// Builder-style setter for one numeric attribute. `Region` is ignored.
    pub fn with_number(mut self, kind: AttributeKind, value: f64) -> Self {
        if let Some(slot) = self.numeric_slot(kind) {
            *slot = Some(AttributeValue::Number(value));
        }
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Raw numeric attribute for `kind`; `None` for `Region` or when absent.
    pub fn numeric(&self, kind: AttributeKind) -> Option<&AttributeValue> {
        match kind {
            AttributeKind::Tourists => self.tourists.as_ref(),
            AttributeKind::GdpPerCapita => self.gdp_per_capita.as_ref(),
            AttributeKind::Population => self.population.as_ref(),
            AttributeKind::Co2Emissions => self.co2_emissions.as_ref(),
            AttributeKind::Region => None,
        }
    }

    fn numeric_slot(&mut self, kind: AttributeKind) -> Option<&mut Option<AttributeValue>> {
        match kind {
            AttributeKind::Tourists => Some(&mut self.tourists),
            AttributeKind::GdpPerCapita => Some(&mut self.gdp_per_capita),
            AttributeKind::Population => Some(&mut self.population),
            AttributeKind::Co2Emissions => Some(&mut self.co2_emissions),
            AttributeKind::Region => None,
        }
    }
}

/// How a predicate compares the record's attribute with its sampled value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    GreaterThan,
    Equals,
}

/// Sampled value bound into a predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PredicateValue {
    Threshold(i64),
    Region(String),
}

impl fmt::Display for PredicateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateValue::Threshold(t) => write!(f, "{t}"),
            PredicateValue::Region(r) => f.write_str(r),
        }
    }
}

/// A catalog template bound to one sampled value.
///
/// De-duplication during sampling compares `kind` only; two predicates of the
/// same kind with different values still count as duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub kind: AttributeKind,
    pub comparison: Comparison,
    pub description: &'static str,
    pub value: PredicateValue,
}

impl Predicate {
    pub fn same_kind(&self, other: &Predicate) -> bool {
        self.kind == other.kind
    }

    /// Header text, e.g. "Population over 41234".
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.description, self.value)
    }
}

/// Row and column predicates for one grid, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConditionSet {
    pub rows: [Predicate; GRID_SIZE],
    pub columns: [Predicate; GRID_SIZE],
}
