//! Predicate evaluation: does one country record satisfy one predicate?
//!
//! Numeric attributes are coerced explicitly before comparison:
//!
//! - `tourists`, `gdp_per_capita`, `population` — integer coercion: numbers
//!   truncate toward zero, strings contribute their leading integer prefix.
//! - `co2_emissions` — fractional coercion: numbers are used as-is, strings
//!   contribute their leading decimal prefix (fraction and exponent allowed).
//!
//! Absent, null, unparseable, non-numeric (booleans, arrays, objects) and
//! non-finite values all coerce to 0. The
//! comparison is strictly greater-than against the sampled threshold, so a
//! coerced 0 never satisfies any catalog threshold.
//!
//! Region predicates compare by exact string equality. No case folding happens
//! here; the dataset is expected to carry canonical names (see [`crate::region`]).

use crate::types::{AttributeKind, AttributeValue, CountryRecord, Predicate, PredicateValue};

/// Coercion applied to a numeric attribute before comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    Integer,
    Fractional,
}

impl Coercion {
    pub fn for_kind(kind: AttributeKind) -> Option<Coercion> {
        match kind {
            AttributeKind::Tourists | AttributeKind::GdpPerCapita | AttributeKind::Population => {
                Some(Coercion::Integer)
            }
            AttributeKind::Co2Emissions => Some(Coercion::Fractional),
            AttributeKind::Region => None,
        }
    }

    pub fn apply(self, value: Option<&AttributeValue>) -> f64 {
        let coerced = match (self, value) {
            (_, None) => None,
            (Coercion::Integer, Some(AttributeValue::Number(n))) => Some(n.trunc()),
            (Coercion::Integer, Some(AttributeValue::Text(s))) => leading_integer(s),
            (Coercion::Fractional, Some(AttributeValue::Number(n))) => Some(*n),
            (Coercion::Fractional, Some(AttributeValue::Text(s))) => leading_decimal(s),
            (_, Some(AttributeValue::Other(_))) => None,
        };
        match coerced {
            Some(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }
}

/// Numeric value of `kind` for `record` after coercion. 0 for `Region`.
pub fn numeric_attribute(record: &CountryRecord, kind: AttributeKind) -> f64 {
    match Coercion::for_kind(kind) {
        Some(c) => c.apply(record.numeric(kind)),
        None => 0.0,
    }
}

/// Whether `record` satisfies `predicate`. Pure and total: a predicate whose
/// value does not fit its kind evaluates to false.
pub fn evaluate(record: &CountryRecord, predicate: &Predicate) -> bool {
    match (&predicate.value, predicate.kind) {
        (PredicateValue::Region(region), AttributeKind::Region) => record.region == *region,
        (PredicateValue::Threshold(threshold), kind) if kind.is_numeric() => {
            numeric_attribute(record, kind) > *threshold as f64
        }
        _ => false,
    }
}

/// Both predicates must hold for a grid cell.
pub fn satisfies_cell(record: &CountryRecord, row: &Predicate, column: &Predicate) -> bool {
    evaluate(record, row) && evaluate(record, column)
}

/// Longest `[+-]?\d+` prefix after leading whitespace.
fn leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = sign_len(bytes);
    let digits_start = end;
    end += count_digits(&bytes[end..]);
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Longest `[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?` prefix after leading whitespace.
fn leading_decimal(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = sign_len(bytes);

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = count_digits(&bytes[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }
    s[..end].parse().ok()
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
