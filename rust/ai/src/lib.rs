//! # croupier-ai: Betting Policies for the Roulette Environment
//!
//! Provides policies that turn an environment [`Observation`] into the ten
//! allocation logits expected by [`croupier_engine::env::RouletteEnv::step`],
//! together with a small trainable policy, rollout helpers and checkpoints.
//!
//! ## Core Components
//!
//! - [`Policy`] - Trait defining the predict/observe interface
//! - [`baseline`] - Fixed policies for comparison (`uniform`, `red`)
//! - [`linear`] - Linear policy trained by seeded random-search hill climbing
//! - [`rollout`] - Episode runner, training loop and deterministic evaluation
//! - [`checkpoint`] - Versioned JSON save/load
//! - [`create_policy`] - Factory function for creating policies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use croupier_ai::create_policy;
//! use croupier_ai::rollout::evaluate;
//! use croupier_engine::env::{EnvConfig, RouletteEnv};
//!
//! let mut policy = create_policy("uniform").unwrap();
//! let mut env = RouletteEnv::new(EnvConfig { seed: Some(1), ..EnvConfig::default() }).unwrap();
//! let summaries = evaluate(policy.as_mut(), &mut env, 3).unwrap();
//! assert_eq!(summaries.len(), 3);
//! ```
//!
//! ## Policy Types
//!
//! - `"uniform"` - Zero logits, an even split over the whole menu
//! - `"red"` - Everything on RED
//! - `"linear"` - Trainable linear map from observation to logits

use croupier_engine::env::{Observation, OBSERVATION_DIM};
use serde::{Deserialize, Serialize};

pub mod baseline;
pub mod checkpoint;
pub mod errors;
pub mod linear;
pub mod rollout;

pub use errors::{CheckpointError, PolicyError};

use checkpoint::PolicyState;

/// Names accepted by [`create_policy`].
pub const POLICY_NAMES: [&str; 3] = ["uniform", "red", "linear"];

/// One environment step as seen by a learning policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Observation the action was chosen from
    pub observation: Observation,
    /// Logits handed to the environment
    pub action: Vec<f64>,
    /// Net result of the spin
    pub reward: f64,
    /// Observation after the spin
    pub next_observation: Observation,
    /// Episode ended on this step (terminated or truncated)
    pub done: bool,
}

/// Trait defining the interface for betting policies.
///
/// # Required Methods
///
/// - [`predict`](Policy::predict) - Map an observation to allocation logits
/// - [`name`](Policy::name) - Return the policy's identifier
/// - [`state`](Policy::state) - Snapshot for checkpoints
///
/// Learning policies also override [`observe`](Policy::observe),
/// [`end_episode`](Policy::end_episode) and
/// [`set_training`](Policy::set_training); the defaults do nothing.
///
/// # Example Implementation
///
/// ```rust
/// use croupier_ai::Policy;
/// use croupier_ai::checkpoint::PolicyState;
/// use croupier_engine::env::{Observation, ACTION_DIM};
///
/// struct AllBlack;
///
/// impl Policy for AllBlack {
///     fn predict(&self, _obs: &Observation) -> Vec<f64> {
///         let mut logits = vec![-8.0; ACTION_DIM];
///         logits[1] = 8.0;
///         logits
///     }
///
///     fn name(&self) -> &str {
///         "all-black"
///     }
///
///     fn state(&self) -> PolicyState {
///         PolicyState::Uniform
///     }
/// }
/// ```
pub trait Policy: Send {
    /// Choose logits for the next spin.
    ///
    /// # Arguments
    ///
    /// * `observation` - The environment's current observation
    ///
    /// # Returns
    ///
    /// `ACTION_DIM` logits. The result depends only on the observation and
    /// the policy's current parameters.
    fn predict(&self, observation: &Observation) -> Vec<f64>;

    /// Feed back the outcome of one step.
    fn observe(&mut self, _transition: &Transition) {}

    /// Called once after the last step of every episode.
    fn end_episode(&mut self) {}

    /// Switch between learning and frozen behaviour.
    fn set_training(&mut self, _training: bool) {}

    /// Return the name/identifier of this policy.
    fn name(&self) -> &str;

    /// Serializable snapshot of the parameters [`predict`](Policy::predict)
    /// uses when not training.
    fn state(&self) -> PolicyState;
}

/// Factory function to create policies by name.
///
/// # Arguments
///
/// * `name` - One of [`POLICY_NAMES`]
///
/// # Returns
///
/// A boxed policy, or [`PolicyError::UnknownPolicy`]
///
/// # Example
///
/// ```rust
/// use croupier_ai::create_policy;
///
/// let policy = create_policy("red").unwrap();
/// assert_eq!(policy.name(), "red");
/// assert!(create_policy("martingale").is_err());
/// ```
pub fn create_policy(name: &str) -> Result<Box<dyn Policy>, PolicyError> {
    match name {
        "uniform" => Ok(Box::new(baseline::UniformPolicy)),
        "red" => Ok(Box::new(baseline::RedPolicy)),
        "linear" => Ok(Box::new(linear::LinearPolicy::new(
            linear::HillClimbConfig::default(),
        ))),
        other => Err(PolicyError::UnknownPolicy(other.to_string())),
    }
}

/// Build an [`Observation`] from raw features supplied by an external agent.
pub fn observation_from_slice(values: &[f32]) -> Result<Observation, PolicyError> {
    let arr: [f32; OBSERVATION_DIM] =
        values
            .try_into()
            .map_err(|_| PolicyError::ObservationLength {
                expected: OBSERVATION_DIM,
                actual: values.len(),
            })?;
    Ok(Observation(arr))
}
