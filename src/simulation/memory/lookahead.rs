//! Depth-aware memo of recursive sub-searches within one decision.

use crate::simulation::vectors::{ActuatorVector, SensoryVector, SituationKey};
use std::collections::HashMap;

/// Best action found from a situation, and the depth it was searched to.
#[derive(Clone, Debug, PartialEq)]
pub struct LookaheadEntry {
    pub best_action: ActuatorVector,
    pub utility: f64,
    pub depth: u32,
}

/// Memoizes the best action and utility discovered for each situation.
///
/// Only valid within one top-level decision, since utilities depend on the
/// experience store, which changes between decisions.
#[derive(Clone, Debug, Default)]
pub struct LookaheadCache {
    entries: HashMap<SituationKey, LookaheadEntry>,
}

impl LookaheadCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `situation` only if it was searched at least
    /// `depth` deep. A shallower result must not cut a deeper search short.
    #[must_use]
    pub fn get(&self, situation: &SensoryVector, depth: u32) -> Option<&LookaheadEntry> {
        self.entries
            .get(&situation.key())
            .filter(|entry| entry.depth >= depth)
    }

    /// Stores a result, replacing whatever was there.
    pub fn put(
        &mut self,
        situation: &SensoryVector,
        best_action: ActuatorVector,
        utility: f64,
        depth: u32,
    ) {
        self.entries.insert(
            situation.key(),
            LookaheadEntry {
                best_action,
                utility,
                depth,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_at_same_or_shallower_depth() {
        let mut cache = LookaheadCache::new();
        let s = SensoryVector::from_bits(&[1, 0, 1]);
        cache.put(&s, ActuatorVector::from_bits(&[0, 1]), 0.7, 2);

        for depth in 0..=2 {
            let entry = cache.get(&s, depth).expect("should hit");
            assert!((entry.utility - 0.7).abs() < 1e-12);
        }
    }

    #[test]
    fn test_miss_when_deeper_search_requested() {
        let mut cache = LookaheadCache::new();
        let s = SensoryVector::from_bits(&[1, 0, 1]);
        cache.put(&s, ActuatorVector::from_bits(&[0, 1]), 0.7, 1);

        assert!(cache.get(&s, 2).is_none());
        assert!(cache.get(&SensoryVector::from_bits(&[0, 0, 0]), 0).is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let mut cache = LookaheadCache::new();
        let s = SensoryVector::from_bits(&[1]);
        cache.put(&s, ActuatorVector::from_bits(&[1]), 0.9, 3);
        cache.put(&s, ActuatorVector::from_bits(&[0]), 0.2, 1);

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&s, 3).is_none());
        assert_eq!(
            cache.get(&s, 1).map(|e| e.best_action.clone()),
            Some(ActuatorVector::from_bits(&[0]))
        );
    }

    #[test]
    fn test_clear() {
        let mut cache = LookaheadCache::new();
        cache.put(&SensoryVector::from_bits(&[1]), ActuatorVector::from_bits(&[1]), 0.5, 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
