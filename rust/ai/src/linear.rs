//! Linear policy trained by random-search hill climbing.
//!
//! Logits are `W · obs + b`, clipped to the declared action range. While
//! training, [`LinearPolicy::predict`] uses a perturbed *candidate*; after
//! every `episodes_per_candidate` episodes the candidate's mean return is
//! compared with the best so far and kept if it is strictly better. The
//! perturbations come from the policy's own seeded RNG, so a fixed seed and a
//! fixed environment seed reproduce the same training run.

use croupier_engine::env::{Observation, ACTION_DIM, ACTION_HIGH, ACTION_LOW, OBSERVATION_DIM};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::checkpoint::PolicyState;
use crate::{Policy, Transition};

/// Weight matrix (one row per action) and bias vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub weights: [[f64; OBSERVATION_DIM]; ACTION_DIM],
    pub bias: [f64; ACTION_DIM],
}

impl Default for LinearParams {
    fn default() -> Self {
        Self {
            weights: [[0.0; OBSERVATION_DIM]; ACTION_DIM],
            bias: [0.0; ACTION_DIM],
        }
    }
}

impl LinearParams {
    pub fn logits(&self, observation: &Observation) -> Vec<f64> {
        self.weights
            .iter()
            .zip(self.bias.iter())
            .map(|(row, b)| {
                let z: f64 = row
                    .iter()
                    .zip(observation.as_slice())
                    .map(|(w, &x)| w * f64::from(x))
                    .sum::<f64>()
                    + b;
                z.clamp(ACTION_LOW, ACTION_HIGH)
            })
            .collect()
    }

    fn perturbed<R: Rng + ?Sized>(&self, sigma: f64, rng: &mut R) -> Self {
        let mut next = self.clone();
        for row in next.weights.iter_mut() {
            for w in row.iter_mut() {
                *w += rng.random_range(-sigma..=sigma);
            }
        }
        for b in next.bias.iter_mut() {
            *b += rng.random_range(-sigma..=sigma);
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillClimbConfig {
    /// Half-width of the uniform perturbation applied to every parameter
    pub sigma: f64,
    /// Episodes averaged before a candidate is judged
    pub episodes_per_candidate: usize,
    pub seed: u64,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            sigma: 0.5,
            episodes_per_candidate: 4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinearPolicy {
    best: LinearParams,
    best_score: Option<f64>,
    candidate: LinearParams,
    search: HillClimbConfig,
    rng: ChaCha8Rng,
    training: bool,
    episode_return: f64,
    candidate_returns: Vec<f64>,
    candidates_judged: usize,
    accepted: usize,
}

impl LinearPolicy {
    /// Zero parameters in training mode. The first candidate judged is the
    /// zero policy itself, which sets the baseline score.
    pub fn new(search: HillClimbConfig) -> Self {
        Self::from_params(LinearParams::default(), search)
    }

    pub fn from_params(params: LinearParams, search: HillClimbConfig) -> Self {
        Self {
            candidate: params.clone(),
            best: params,
            best_score: None,
            rng: ChaCha8Rng::seed_from_u64(search.seed),
            search,
            training: true,
            episode_return: 0.0,
            candidate_returns: Vec::new(),
            candidates_judged: 0,
            accepted: 0,
        }
    }

    /// A frozen policy that only predicts, as restored from a checkpoint.
    pub fn frozen(params: LinearParams, best_score: Option<f64>) -> Self {
        let mut p = Self::from_params(params, HillClimbConfig::default());
        p.training = false;
        p.best_score = best_score;
        p
    }

    pub fn params(&self) -> &LinearParams {
        &self.best
    }
    pub fn best_score(&self) -> Option<f64> {
        self.best_score
    }
    pub fn candidates_judged(&self) -> usize {
        self.candidates_judged
    }
    pub fn accepted(&self) -> usize {
        self.accepted
    }
    pub fn is_training(&self) -> bool {
        self.training
    }

    fn judge_candidate(&mut self) {
        let n = self.candidate_returns.len() as f64;
        let score = self.candidate_returns.iter().sum::<f64>() / n;
        self.candidate_returns.clear();
        self.candidates_judged += 1;

        let improved = self.best_score.is_none_or(|best| score > best);
        if improved {
            self.best = self.candidate.clone();
            self.best_score = Some(score);
            self.accepted += 1;
        }
        tracing::debug!(
            candidate = self.candidates_judged,
            score,
            best = self.best_score,
            improved,
            "candidate judged"
        );
        self.candidate = self.best.perturbed(self.search.sigma, &mut self.rng);
    }
}

impl Policy for LinearPolicy {
    fn predict(&self, observation: &Observation) -> Vec<f64> {
        if self.training {
            self.candidate.logits(observation)
        } else {
            self.best.logits(observation)
        }
    }

    fn observe(&mut self, transition: &Transition) {
        if self.training {
            self.episode_return += transition.reward;
        }
    }

    fn end_episode(&mut self) {
        if !self.training {
            return;
        }
        self.candidate_returns
            .push(std::mem::take(&mut self.episode_return));
        if self.candidate_returns.len() >= self.search.episodes_per_candidate.max(1) {
            self.judge_candidate();
        }
    }

    fn set_training(&mut self, training: bool) {
        if self.training && !training {
            // an unfinished candidate batch is dropped
            self.candidate_returns.clear();
            self.episode_return = 0.0;
        }
        self.training = training;
    }

    fn name(&self) -> &str {
        "linear"
    }

    fn state(&self) -> PolicyState {
        PolicyState::Linear {
            weights: self.best.weights.iter().map(|r| r.to_vec()).collect(),
            bias: self.best.bias.to_vec(),
            score: self.best_score,
        }
    }
}
