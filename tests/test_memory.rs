//! Tests for the experience store and the lookahead cache.

use organism_planner::simulation::memory::{ExperienceStore, Likelihood, LookaheadCache};
use organism_planner::simulation::{ActuatorVector, SensoryVector};

fn s(bits: &[u8]) -> SensoryVector {
    SensoryVector::from_bits(bits)
}

fn a(bits: &[u8]) -> ActuatorVector {
    ActuatorVector::from_bits(bits)
}

// === Experience store ===

#[test]
fn test_unknown_pair_has_no_evidence() {
    let store = ExperienceStore::new();
    let lik = store.transition_probability(&s(&[1, 0, 0]), &a(&[1, 0]), &s(&[0, 1, 0]));
    assert_eq!(lik, Likelihood::NO_EVIDENCE);
    assert!((lik.p - 0.0).abs() < 1e-12);
    assert!((lik.ci - 1.0).abs() < 1e-12);
    assert!((lik.optimistic() - 1.0).abs() < 1e-12);
}

#[test]
fn test_single_observation_is_fully_confident() {
    let mut store = ExperienceStore::new();
    store.add_one(&s(&[1, 0, 0]), &a(&[1, 0]), &s(&[0, 1, 0]));

    let lik = store.transition_probability(&s(&[1, 0, 0]), &a(&[1, 0]), &s(&[0, 1, 0]));
    assert!((lik.p - 1.0).abs() < 1e-12);
    // p(1-p) = 0, so the interval collapses even at n = 1
    assert!(lik.ci.abs() < 1e-12);
}

#[test]
fn test_unseen_outcome_of_known_action_is_zero() {
    let mut store = ExperienceStore::new();
    store.add_one(&s(&[1, 0, 0]), &a(&[1, 0]), &s(&[0, 1, 0]));

    let lik = store.transition_probability(&s(&[1, 0, 0]), &a(&[1, 0]), &s(&[0, 0, 1]));
    assert!(lik.p.abs() < 1e-12);
    assert!(lik.ci.abs() < 1e-12);
}

#[test]
fn test_split_outcomes() {
    let mut store = ExperienceStore::new();
    let start = s(&[1, 0, 0]);
    let go = a(&[1, 0]);
    store.add(&start, &go, &s(&[0, 1, 0]), 3);
    store.add(&start, &go, &s(&[0, 0, 1]), 1);

    let lik = store.transition_probability(&start, &go, &s(&[0, 1, 0]));
    assert!((lik.p - 0.75).abs() < 1e-12);
    let expected_ci = (2.0 * 1.96 * (0.75_f64 * 0.25 / 4.0).sqrt()).min(1.0);
    assert!((lik.ci - expected_ci).abs() < 1e-12);

    let probabilities: f64 = [s(&[0, 1, 0]), s(&[0, 0, 1])]
        .iter()
        .map(|o| store.transition_probability(&start, &go, o).p)
        .sum();
    assert!((probabilities - 1.0).abs() < 1e-12);
}

#[test]
fn test_interval_shrinks_with_evidence() {
    let mut store = ExperienceStore::new();
    let start = s(&[1, 0]);
    let go = a(&[1]);
    let mut previous = f64::INFINITY;

    for _ in 0..10 {
        store.add_one(&start, &go, &s(&[0, 1]));
        store.add_one(&start, &go, &s(&[1, 1]));
        let lik = store.transition_probability(&start, &go, &s(&[0, 1]));
        assert!((lik.p - 0.5).abs() < 1e-12);
        assert!(lik.ci < previous);
        previous = lik.ci;
    }
}

#[test]
fn test_counts_are_consistent() {
    let mut store = ExperienceStore::new();
    let start = s(&[1, 0, 0]);
    store.add(&start, &a(&[1, 0]), &s(&[0, 1, 0]), 2);
    store.add(&start, &a(&[0, 1]), &s(&[0, 0, 1]), 5);
    store.add_one(&s(&[0, 1, 0]), &a(&[0, 1]), &s(&[1, 0, 0]));

    assert_eq!(store.situation_count(&start), 7);
    assert_eq!(store.action_count(&start, &a(&[0, 1])), 5);
    assert_eq!(store.outcome_count(&start, &a(&[1, 0]), &s(&[0, 1, 0])), 2);
    assert_eq!(store.situations(), 2);
    assert_eq!(store.len(), 8);
}

#[test]
fn test_counts_never_decrease() {
    let mut store = ExperienceStore::new();
    let start = s(&[1, 0, 0]);
    let go = a(&[1, 0]);
    let mut last = 0;

    for outcome in [[0, 1, 0], [0, 0, 1], [0, 1, 0], [1, 1, 1]] {
        store.add_one(&start, &go, &s(&outcome));
        let count = store.action_count(&start, &go);
        assert!(count > last);
        last = count;
    }
    assert_eq!(store.outcome_count(&start, &go, &s(&[0, 1, 0])), 2);
}

#[test]
fn test_known_outcomes_sorted_and_filtered() {
    let mut store = ExperienceStore::new();
    let start = s(&[1, 0]);
    let go = a(&[1]);
    store.add(&start, &go, &s(&[0, 1]), 1);
    store.add(&start, &go, &s(&[1, 1]), 8);
    store.add(&start, &go, &s(&[0, 0]), 11);

    let all = store.known_outcomes(&start, &go, 0.0);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].0, s(&[0, 0]));
    assert!(all.windows(2).all(|w| w[0].1.p >= w[1].1.p));

    let likely = store.known_outcomes(&start, &go, 0.1);
    assert_eq!(likely.len(), 2);
    assert!(likely.iter().all(|(_, lik)| lik.p >= 0.1));

    assert!(store.known_outcomes(&start, &a(&[0]), 0.0).is_empty());
}

#[test]
fn test_known_actions() {
    let mut store = ExperienceStore::new();
    let start = s(&[1, 0]);
    store.add_one(&start, &a(&[1, 0]), &s(&[0, 1]));
    store.add_one(&start, &a(&[0, 1]), &s(&[0, 1]));
    store.add_one(&start, &a(&[1, 0]), &s(&[1, 1]));

    let actions = store.known_actions(&start);
    assert_eq!(actions.len(), 2);
    assert!(actions.contains(&a(&[1, 0])));
    assert!(actions.contains(&a(&[0, 1])));
    assert!(store.known_actions(&s(&[0, 0])).is_empty());
}

// === Lookahead cache ===

#[test]
fn test_cache_serves_only_deep_enough_entries() {
    let mut cache = LookaheadCache::new();
    let state = s(&[0, 1, 0]);
    cache.put(&state, a(&[1, 0]), 0.7, 2);

    assert!(cache.get(&state, 0).is_some());
    assert!(cache.get(&state, 2).is_some());
    assert!(cache.get(&state, 3).is_none());
    assert!(cache.get(&s(&[1, 1, 1]), 0).is_none());
}

#[test]
fn test_cache_put_overwrites() {
    let mut cache = LookaheadCache::new();
    let state = s(&[0, 1, 0]);
    cache.put(&state, a(&[1, 0]), 0.2, 1);
    cache.put(&state, a(&[0, 1]), 0.9, 3);

    let entry = cache.get(&state, 3).unwrap();
    assert_eq!(entry.best_action, a(&[0, 1]));
    assert!((entry.utility - 0.9).abs() < 1e-12);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}
