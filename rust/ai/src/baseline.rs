//! Fixed policies used as reference points.
//!
//! Neither learns; both ignore the observation entirely. Against a fair
//! single-zero wheel every allocation has the same expected return per unit
//! staked, so these mostly serve to sanity-check the tooling and to compare
//! variance between a spread and a concentrated stake.

use croupier_engine::env::{Observation, ACTION_DIM, ACTION_HIGH, ACTION_LOW};

use crate::checkpoint::PolicyState;
use crate::Policy;

/// Zero logits: the stake is split evenly across all ten bets.
///
/// ```rust
/// use croupier_ai::Policy;
/// use croupier_ai::baseline::UniformPolicy;
/// use croupier_engine::env::Observation;
///
/// let logits = UniformPolicy.predict(&Observation([0.0; 8]));
/// assert!(logits.iter().all(|&z| z == 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPolicy;

impl Policy for UniformPolicy {
    fn predict(&self, _observation: &Observation) -> Vec<f64> {
        vec![0.0; ACTION_DIM]
    }

    fn name(&self) -> &str {
        "uniform"
    }

    fn state(&self) -> PolicyState {
        PolicyState::Uniform
    }
}

/// Saturated logits on RED, the bottom of the range everywhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedPolicy;

impl Policy for RedPolicy {
    fn predict(&self, _observation: &Observation) -> Vec<f64> {
        let mut logits = vec![ACTION_LOW; ACTION_DIM];
        logits[0] = ACTION_HIGH;
        logits
    }

    fn name(&self) -> &str {
        "red"
    }

    fn state(&self) -> PolicyState {
        PolicyState::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_engine::env::softmax_weights;

    #[test]
    fn uniform_weights_are_even() {
        let w = softmax_weights(&UniformPolicy.predict(&Observation([0.3; 8])));
        assert!(w.iter().all(|x| (x - 0.1).abs() < 1e-12));
    }

    #[test]
    fn red_puts_almost_everything_on_red() {
        let w = softmax_weights(&RedPolicy.predict(&Observation([1.0; 8])));
        assert!(w[0] > 0.999_99);
        assert!(w[1..].iter().all(|&x| x < 1e-6));
    }
}
