//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;
use crate::nav::error::PolicyError;
use crate::nav::types::{Action, Observation};

/// Uniformly random actions in `[-1, 1]^4`.
///
/// Seeded, so runs are reproducible. Used for sanity checks and as a
/// lower-bound baseline.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new random policy.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, _observation: &Observation) -> Result<Action, PolicyError> {
        let mut sample = || self.rng.gen_range(-1.0_f64..=1.0);
        Ok(Action::new(sample(), sample(), sample(), sample()))
    }

    fn name(&self) -> &str {
        "random"
    }
}
