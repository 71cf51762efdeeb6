// crates/subsidy-ledger/src/registry.rs
//
// Parameter registry: per-operator, per-criteria gas usage and minimum rate.
//
// The registry is partitioned by caller. An operator can only write its own
// partition, and it does so in batches of three parallel lists. A batch is
// validated in full before anything is written, so a rejected batch never
// leaves a partial update behind.

use std::collections::BTreeMap;

use subsidy_core::{Address, CriteriaId, SubsidyError};

use crate::record::{CriteriaParams, SubsidyKey};

/// Configuration store for all operators.
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    params: BTreeMap<SubsidyKey, CriteriaParams>,
}

impl ParameterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Upsert parameters for a batch of criteria in the caller's partition.
    ///
    /// Entry `i` sets `criteria[i]` to `{gas_usage[i], min_gas_per_second[i]}`,
    /// overwriting prior values. If a criteria appears twice, the later entry
    /// wins.
    ///
    /// # Errors
    /// Returns `SubsidyError::ArrayLengthsDoNotMatch` if the three lists are
    /// not the same length. Nothing is written in that case.
    pub fn configure(
        &mut self,
        caller: &Address,
        criteria: &[CriteriaId],
        gas_usage: &[u32],
        min_gas_per_second: &[u32],
    ) -> Result<(), SubsidyError> {
        if criteria.len() != gas_usage.len() || criteria.len() != min_gas_per_second.len() {
            return Err(SubsidyError::ArrayLengthsDoNotMatch {
                criteria: criteria.len(),
                gas_usage: gas_usage.len(),
                min_gas_per_second: min_gas_per_second.len(),
            });
        }

        for ((&id, &usage), &min_rate) in criteria.iter().zip(gas_usage).zip(min_gas_per_second) {
            self.params.insert(
                SubsidyKey::new(*caller, id),
                CriteriaParams {
                    gas_usage: usage,
                    min_gas_per_second: min_rate,
                },
            );
        }
        Ok(())
    }

    /// Parameters for `(operator, criteria)`; zeroed if never configured.
    pub fn get(&self, operator: &Address, criteria: CriteriaId) -> CriteriaParams {
        self.params
            .get(&SubsidyKey::new(*operator, criteria))
            .copied()
            .unwrap_or_default()
    }

    /// All configured entries, ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&SubsidyKey, &CriteriaParams)> {
        self.params.iter()
    }

    pub(crate) fn insert(&mut self, key: SubsidyKey, params: CriteriaParams) {
        self.params.insert(key, params);
    }

    /// Number of configured entries.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> Address {
        Address::repeat_byte(0x0a)
    }

    #[test]
    fn test_configure_sets_params() {
        let mut registry = ParameterRegistry::new();
        registry
            .configure(&operator(), &[1, 2], &[50_000, 80_000], &[5, 7])
            .unwrap();

        let p1 = registry.get(&operator(), 1);
        assert_eq!(p1.gas_usage, 50_000);
        assert_eq!(p1.min_gas_per_second, 5);
        let p2 = registry.get(&operator(), 2);
        assert_eq!(p2.gas_usage, 80_000);
        assert_eq!(p2.min_gas_per_second, 7);
    }

    #[test]
    fn test_unconfigured_is_zeroed() {
        let registry = ParameterRegistry::new();
        assert_eq!(registry.get(&operator(), 42), CriteriaParams::default());
    }

    #[test]
    fn test_configure_overwrites() {
        let mut registry = ParameterRegistry::new();
        registry.configure(&operator(), &[1], &[50_000], &[5]).unwrap();
        registry.configure(&operator(), &[1], &[60_000], &[9]).unwrap();

        let p = registry.get(&operator(), 1);
        assert_eq!(p.gas_usage, 60_000);
        assert_eq!(p.min_gas_per_second, 9);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_configure_is_idempotent() {
        let mut once = ParameterRegistry::new();
        once.configure(&operator(), &[1, 2, 3], &[10, 20, 30], &[1, 2, 3])
            .unwrap();

        let mut twice = once.clone();
        twice
            .configure(&operator(), &[1, 2, 3], &[10, 20, 30], &[1, 2, 3])
            .unwrap();

        let a: Vec<_> = once.entries().collect();
        let b: Vec<_> = twice.entries().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_criteria_last_wins() {
        let mut registry = ParameterRegistry::new();
        registry
            .configure(&operator(), &[4, 4], &[100, 200], &[1, 2])
            .unwrap();
        assert_eq!(registry.get(&operator(), 4).gas_usage, 200);
        assert_eq!(registry.get(&operator(), 4).min_gas_per_second, 2);
    }

    #[test]
    fn test_mismatched_lengths_mutate_nothing() {
        let mut registry = ParameterRegistry::new();
        registry.configure(&operator(), &[1], &[50_000], &[5]).unwrap();

        let short_usage = registry.configure(&operator(), &[1, 2], &[1], &[1, 2]);
        let short_min = registry.configure(&operator(), &[1, 2], &[1, 2], &[1]);
        let short_criteria = registry.configure(&operator(), &[1], &[1, 2], &[1, 2]);
        for result in [short_usage, short_min, short_criteria] {
            assert!(matches!(
                result,
                Err(SubsidyError::ArrayLengthsDoNotMatch { .. })
            ));
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&operator(), 1).gas_usage, 50_000);
    }

    #[test]
    fn test_empty_batch_is_accepted() {
        let mut registry = ParameterRegistry::new();
        registry.configure(&operator(), &[], &[], &[]).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_partitions_are_per_operator() {
        let mut registry = ParameterRegistry::new();
        let other = Address::repeat_byte(0x0b);
        registry.configure(&operator(), &[1], &[50_000], &[5]).unwrap();

        assert!(!registry.get(&other, 1).is_configured());
        registry.configure(&other, &[1], &[10], &[1]).unwrap();
        assert_eq!(registry.get(&operator(), 1).gas_usage, 50_000);
        assert_eq!(registry.get(&other, 1).gas_usage, 10);
    }
}
