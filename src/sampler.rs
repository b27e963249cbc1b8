//! Condition sampler: draws the row and column predicates for one grid.
//!
//! Templates are drawn uniformly with replacement and instantiated on every
//! draw. A draw is kept when its kind is new to the selection. The built-in
//! catalog has 5 kinds for 6 slots, so once every kind is in use a draw is also
//! kept when its kind is new to the group it would join. Rows and columns are
//! therefore each pairwise distinct and together cover the whole catalog.

use rand::Rng;
use tracing::debug;

use crate::catalog::{PredicateTemplate, CATALOG};
use crate::constants::{GRID_SIZE, SELECTION_SIZE};
use crate::error::{GridError, Result};
use crate::types::{AttributeKind, ConditionSet, Predicate};

pub struct ConditionSampler<'a> {
    templates: &'a [PredicateTemplate],
    distinct_kinds: usize,
}

impl Default for ConditionSampler<'static> {
    fn default() -> Self {
        Self {
            templates: &CATALOG,
            distinct_kinds: CATALOG.len(),
        }
    }
}

impl<'a> ConditionSampler<'a> {
    /// Sampler over a custom template slice. Fails if it cannot fill a group
    /// of [`GRID_SIZE`] with distinct kinds, which would otherwise loop forever.
    pub fn with_templates(templates: &'a [PredicateTemplate]) -> Result<Self> {
        let kinds = distinct_kinds(templates.iter().map(|t| t.kind));
        if kinds < GRID_SIZE {
            return Err(GridError::CatalogTooSmall {
                kinds,
                needed: GRID_SIZE,
            });
        }
        Ok(Self {
            templates,
            distinct_kinds: kinds,
        })
    }

    /// Draw [`SELECTION_SIZE`] predicates: the first [`GRID_SIZE`] accepted
    /// become rows, the rest columns, both in acceptance order.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ConditionSet {
        let mut selected: Vec<Predicate> = Vec::with_capacity(SELECTION_SIZE);
        let mut draws = 0usize;

        while selected.len() < SELECTION_SIZE {
            draws += 1;
            let template = &self.templates[rng.random_range(0..self.templates.len())];
            let candidate = template.instantiate(&mut *rng);
            if self.accepts(&selected, &candidate) {
                selected.push(candidate);
            }
        }
        debug!(draws, "sampled grid conditions");

        let columns = selected.split_off(GRID_SIZE);
        ConditionSet {
            rows: into_group(selected),
            columns: into_group(columns),
        }
    }

    fn accepts(&self, selected: &[Predicate], candidate: &Predicate) -> bool {
        if !selected.iter().any(|p| p.same_kind(candidate)) {
            return true;
        }
        if distinct_kinds(selected.iter().map(|p| p.kind)) < self.distinct_kinds {
            return false;
        }
        // Every kind is in use: only the group being filled must stay distinct.
        let group_start = if selected.len() < GRID_SIZE { 0 } else { GRID_SIZE };
        !selected[group_start..].iter().any(|p| p.same_kind(candidate))
    }
}

/// Sample with the built-in catalog.
pub fn sample_conditions<R: Rng>(rng: &mut R) -> ConditionSet {
    ConditionSampler::default().sample(rng)
}

fn distinct_kinds(kinds: impl Iterator<Item = AttributeKind>) -> usize {
    let mut seen: Vec<AttributeKind> = Vec::with_capacity(AttributeKind::ALL.len());
    for kind in kinds {
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    seen.len()
}

fn into_group(preds: Vec<Predicate>) -> [Predicate; GRID_SIZE] {
    match preds.try_into() {
        Ok(group) => group,
        Err(v) => unreachable!("group has {} predicates", v.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::template;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn kinds(preds: &[Predicate]) -> Vec<AttributeKind> {
        preds.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn test_groups_distinct_and_catalog_covered() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let set = sample_conditions(&mut rng);
            assert_eq!(distinct_kinds(set.rows.iter().map(|p| p.kind)), GRID_SIZE);
            assert_eq!(distinct_kinds(set.columns.iter().map(|p| p.kind)), GRID_SIZE);
            let all = set.rows.iter().chain(set.columns.iter()).map(|p| p.kind);
            assert_eq!(distinct_kinds(all), AttributeKind::ALL.len());
        }
    }

    #[test]
    fn test_first_five_draws_distinct() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let set = sample_conditions(&mut rng);
            let mut first_five = kinds(&set.rows);
            first_five.extend(kinds(&set.columns[..2]));
            assert_eq!(distinct_kinds(first_five.into_iter()), 5);
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = sample_conditions(&mut SmallRng::seed_from_u64(99));
        let b = sample_conditions(&mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_small_catalog_rejected() {
        let two = [
            template(AttributeKind::Population).clone(),
            template(AttributeKind::Region).clone(),
        ];
        match ConditionSampler::with_templates(&two) {
            Err(GridError::CatalogTooSmall { kinds: 2, needed: 3 }) => {}
            other => panic!("expected CatalogTooSmall, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_three_kind_catalog_keeps_groups_distinct() {
        let three = [
            template(AttributeKind::Population).clone(),
            template(AttributeKind::Tourists).clone(),
            template(AttributeKind::Region).clone(),
        ];
        let sampler = ConditionSampler::with_templates(&three).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let set = sampler.sample(&mut rng);
            assert_eq!(distinct_kinds(set.rows.iter().map(|p| p.kind)), 3);
            assert_eq!(distinct_kinds(set.columns.iter().map(|p| p.kind)), 3);
        }
    }
}
