//! Fixed-length Boolean vectors for sensors and actuators.
//!
//! Sensory and actuator vectors share one representation but carry a kind
//! marker, so the planner can never confuse a situation with an action.

use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::fmt;
use std::marker::PhantomData;

/// Marker for vectors read from sensors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sensory {}

/// Marker for vectors sent to actuators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Actuator {}

/// An immutable, fixed-length vector of 0/1 values.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitVector<K> {
    bits: Vec<bool>,
    kind: PhantomData<K>,
}

/// Everything the agent perceives at one point in time.
pub type SensoryVector = BitVector<Sensory>;

/// A combination of effector commands.
pub type ActuatorVector = BitVector<Actuator>;

impl<K> BitVector<K> {
    /// Creates a vector from Boolean values.
    #[must_use]
    pub fn new(bits: Vec<bool>) -> Self {
        Self {
            bits,
            kind: PhantomData,
        }
    }

    /// Creates a vector from 0/1 integers. Any nonzero value counts as 1.
    #[must_use]
    pub fn from_bits(values: &[u8]) -> Self {
        Self::new(values.iter().map(|&v| v != 0).collect())
    }

    /// Creates an all-zero vector.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![false; len])
    }

    /// Creates a vector with exactly one active element.
    #[must_use]
    pub fn one_hot(len: usize, index: usize) -> Self {
        let mut bits = vec![false; len];
        if let Some(bit) = bits.get_mut(index) {
            *bit = true;
        }
        Self::new(bits)
    }

    /// Creates a vector with every element drawn uniformly from {0, 1}.
    pub fn random_uniform(len: usize, rng: &mut impl Rng) -> Self {
        Self::new((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Creates a sparse vector whose number of active elements is drawn from
    /// a Gaussian, truncated toward zero and clipped to `[0, len]`.
    pub fn random_sparse(len: usize, mean: f64, stdev: f64, rng: &mut impl Rng) -> Self {
        let draw = Normal::new(mean, stdev).map_or(mean, |normal| normal.sample(rng));
        let n_active = if draw.is_finite() && draw > 0.0 {
            (draw as usize).min(len)
        } else {
            0
        };

        let mut bits = vec![false; len];
        for i in index::sample(rng, len, n_active) {
            bits[i] = true;
        }
        Self::new(bits)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Number of active elements.
    #[must_use]
    pub fn count_active(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Index of the single active element, or `None` if zero or several are set.
    #[must_use]
    pub fn single_active(&self) -> Option<usize> {
        let mut active = self.bits.iter().enumerate().filter(|(_, &b)| b);
        match (active.next(), active.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    /// Canonical map key for this vector.
    #[must_use]
    pub fn key(&self) -> SituationKey {
        SituationKey(self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect())
    }
}

impl<K> fmt::Debug for BitVector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.key())
    }
}

impl<K> fmt::Display for BitVector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Canonical string key of a vector: one `'0'` or `'1'` per element.
///
/// Injective over vectors of equal length. Ordering is lexicographic, which
/// keeps enumeration of keyed maps deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SituationKey(String);

impl SituationKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SituationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
