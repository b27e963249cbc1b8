//! Static predicate catalog: one template per [`AttributeKind`].
//!
//! | Kind | Comparison | Sampled value |
//! |------|------------|---------------|
//! | tourists | `>` | integer in [10000, 60000) |
//! | gdp_per_capita | `>` | integer in [5000, 35000) |
//! | population | `>` | integer in [10000, 60000) |
//! | co2_emissions | `>` | integer in [500, 5500) |
//! | region | `=` | one of [`SAMPLED_REGIONS`] |

use rand::{Rng, RngCore};

use crate::constants::*;
use crate::types::{AttributeKind, Comparison, Predicate, PredicateValue};

/// Rule shape before a concrete value is drawn.
#[derive(Clone)]
pub struct PredicateTemplate {
    pub kind: AttributeKind,
    pub comparison: Comparison,
    pub description: &'static str,
    sampler: fn(&mut dyn RngCore) -> PredicateValue,
}

impl PredicateTemplate {
    /// Draw a fresh value and bind it.
    pub fn instantiate(&self, rng: &mut dyn RngCore) -> Predicate {
        self.with_value((self.sampler)(rng))
    }

    /// Bind an explicit value (tests, replays).
    pub fn with_value(&self, value: PredicateValue) -> Predicate {
        Predicate {
            kind: self.kind,
            comparison: self.comparison,
            description: self.description,
            value,
        }
    }
}

fn sample_tourists(rng: &mut dyn RngCore) -> PredicateValue {
    PredicateValue::Threshold(rng.random_range(TOURISTS_RANGE))
}

fn sample_gdp_per_capita(rng: &mut dyn RngCore) -> PredicateValue {
    PredicateValue::Threshold(rng.random_range(GDP_PER_CAPITA_RANGE))
}

fn sample_population(rng: &mut dyn RngCore) -> PredicateValue {
    PredicateValue::Threshold(rng.random_range(POPULATION_RANGE))
}

fn sample_co2_emissions(rng: &mut dyn RngCore) -> PredicateValue {
    PredicateValue::Threshold(rng.random_range(CO2_EMISSIONS_RANGE))
}

fn sample_region(rng: &mut dyn RngCore) -> PredicateValue {
    let idx = rng.random_range(0..SAMPLED_REGIONS.len());
    PredicateValue::Region(SAMPLED_REGIONS[idx].to_string())
}

pub static CATALOG: [PredicateTemplate; 5] = [
    PredicateTemplate {
        kind: AttributeKind::Tourists,
        comparison: Comparison::GreaterThan,
        description: "Number of tourists greater than",
        sampler: sample_tourists,
    },
    PredicateTemplate {
        kind: AttributeKind::GdpPerCapita,
        comparison: Comparison::GreaterThan,
        description: "GDP per capita greater than $",
        sampler: sample_gdp_per_capita,
    },
    PredicateTemplate {
        kind: AttributeKind::Population,
        comparison: Comparison::GreaterThan,
        description: "Population over",
        sampler: sample_population,
    },
    PredicateTemplate {
        kind: AttributeKind::Co2Emissions,
        comparison: Comparison::GreaterThan,
        description: "CO2 emissions over",
        sampler: sample_co2_emissions,
    },
    PredicateTemplate {
        kind: AttributeKind::Region,
        comparison: Comparison::Equals,
        description: "Region in",
        sampler: sample_region,
    },
];

pub fn template(kind: AttributeKind) -> &'static PredicateTemplate {
    match kind {
        AttributeKind::Tourists => &CATALOG[0],
        AttributeKind::GdpPerCapita => &CATALOG[1],
        AttributeKind::Population => &CATALOG[2],
        AttributeKind::Co2Emissions => &CATALOG[3],
        AttributeKind::Region => &CATALOG[4],
    }
}

/// `kind > threshold` with the catalog description. Panics in debug builds if
/// `kind` is `Region`.
pub fn threshold(kind: AttributeKind, value: i64) -> Predicate {
    debug_assert!(kind.is_numeric());
    template(kind).with_value(PredicateValue::Threshold(value))
}

/// `region == name` with the catalog description.
pub fn region(name: impl Into<String>) -> Predicate {
    template(AttributeKind::Region).with_value(PredicateValue::Region(name.into()))
}

/// Sampling range for a numeric kind; `None` for `Region`.
pub fn numeric_range(kind: AttributeKind) -> Option<std::ops::Range<i64>> {
    match kind {
        AttributeKind::Tourists => Some(TOURISTS_RANGE),
        AttributeKind::GdpPerCapita => Some(GDP_PER_CAPITA_RANGE),
        AttributeKind::Population => Some(POPULATION_RANGE),
        AttributeKind::Co2Emissions => Some(CO2_EMISSIONS_RANGE),
        AttributeKind::Region => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_covers_every_kind_once() {
        for kind in AttributeKind::ALL {
            assert_eq!(CATALOG.iter().filter(|t| t.kind == kind).count(), 1);
            assert_eq!(template(kind).kind, kind);
        }
    }

    #[test]
    fn test_numeric_samples_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for kind in AttributeKind::ALL.into_iter().filter(|k| k.is_numeric()) {
            let range = numeric_range(kind).unwrap();
            for _ in 0..2000 {
                match template(kind).instantiate(&mut rng).value {
                    PredicateValue::Threshold(t) => {
                        assert!(range.contains(&t), "{kind} threshold {t} out of range")
                    }
                    other => panic!("{kind} produced {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_region_samples_from_fixed_set() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            match template(AttributeKind::Region).instantiate(&mut rng).value {
                PredicateValue::Region(r) => {
                    assert!(SAMPLED_REGIONS.contains(&r.as_str()), "unexpected region {r}");
                    seen.insert(r);
                }
                other => panic!("region produced {other:?}"),
            }
        }
        assert_eq!(seen.len(), SAMPLED_REGIONS.len());
    }

    #[test]
    fn test_label_format() {
        assert_eq!(threshold(AttributeKind::Population, 41234).label(), "Population over 41234");
        assert_eq!(region("Europe").label(), "Region in Europe");
    }
}
