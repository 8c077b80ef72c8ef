//! Reinforcement-learning view of a roulette session.
//!
//! An agent hands [`RouletteEnv::step`] ten logits; they are turned into a
//! softmax allocation of `bet_fraction × bankroll` across a fixed menu of
//! bets, settled on one spin, and the net result comes back as the reward.

use serde::{Deserialize, Serialize};

use crate::bet::{BetKind, BetSlip, StakeSource};
use crate::errors::{EnvError, GameError};
use crate::session::{Session, SessionConfig, TerminationReason};
use crate::spin::SpinGenerator;
use crate::wheel::{Color, Half, Parity, Pocket};

pub const ACTION_DIM: usize = 10;
pub const OBSERVATION_DIM: usize = 8;

/// Declared bounds of each action component.
pub const ACTION_LOW: f64 = -8.0;
pub const ACTION_HIGH: f64 = 8.0;

/// Logits are clipped to `[-LOGIT_CLIP, LOGIT_CLIP]` before the softmax.
pub const LOGIT_CLIP: f64 = 10.0;

/// Straight numbers on the agent's menu, in action order.
pub const STRAIGHT_TARGETS: [u8; 4] = [7, 17, 23, 32];

/// Bet kind addressed by each action component.
pub const ACTION_KINDS: [BetKind; ACTION_DIM] = [
    BetKind::Red,
    BetKind::Black,
    BetKind::Even,
    BetKind::Odd,
    BetKind::Low,
    BetKind::High,
    BetKind::Straight(Pocket::from_table(STRAIGHT_TARGETS[0])),
    BetKind::Straight(Pocket::from_table(STRAIGHT_TARGETS[1])),
    BetKind::Straight(Pocket::from_table(STRAIGHT_TARGETS[2])),
    BetKind::Straight(Pocket::from_table(STRAIGHT_TARGETS[3])),
];

/// Numerically stable softmax over clipped logits.
///
/// ```
/// use croupier_engine::env::softmax_weights;
///
/// let w = softmax_weights(&[0.0; 4]);
/// assert!(w.iter().all(|&x| (x - 0.25).abs() < 1e-12));
/// ```
pub fn softmax_weights(logits: &[f64]) -> Vec<f64> {
    if logits.is_empty() {
        return Vec::new();
    }
    let clipped: Vec<f64> = logits
        .iter()
        .map(|&z| z.clamp(-LOGIT_CLIP, LOGIT_CLIP))
        .collect();
    let max = clipped.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = clipped.iter().map(|&z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Fractional split of the bankroll across [`ACTION_KINDS`].
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    weights: [f64; ACTION_DIM],
    fraction: f64,
}

impl Allocation {
    /// Validate `logits` and turn them into weights.
    pub fn from_logits(logits: &[f64], fraction: f64) -> Result<Self, EnvError> {
        if logits.len() != ACTION_DIM {
            return Err(EnvError::ActionLength {
                expected: ACTION_DIM,
                actual: logits.len(),
            });
        }
        if let Some(index) = logits.iter().position(|z| !z.is_finite()) {
            return Err(EnvError::NonFiniteAction { index });
        }
        let mut weights = [0.0; ACTION_DIM];
        weights.copy_from_slice(&softmax_weights(logits));
        Ok(Self { weights, fraction })
    }

    pub fn weights(&self) -> &[f64; ACTION_DIM] {
        &self.weights
    }
}

impl StakeSource for Allocation {
    fn stake_slip(&self, bankroll: f64) -> Result<BetSlip, GameError> {
        let stake = self.fraction * bankroll.max(0.0);
        BetSlip::from_stakes(
            ACTION_KINDS
                .iter()
                .zip(self.weights.iter())
                .map(|(&kind, &w)| (kind, w * stake)),
        )
    }
}

/// Session limits plus the agent-side knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    pub session: SessionConfig,
    /// Share of the bankroll staked each spin, in `(0, 1]`
    pub bet_fraction: f64,
    /// Seed for the spin generator; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            bet_fraction: 0.10,
            seed: None,
        }
    }
}

impl EnvConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        self.session.validate()?;
        if !(self.bet_fraction > 0.0 && self.bet_fraction <= 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "bet_fraction must be in (0, 1], got {}",
                self.bet_fraction
            )));
        }
        Ok(())
    }
}

/// Eight features: normalized bankroll, then the previous outcome's
/// zero/red/black/even/odd/low/high indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation(pub [f32; OBSERVATION_DIM]);

impl Observation {
    pub fn new(bankroll: f64, initial_bankroll: f64, last: Option<Pocket>) -> Self {
        let mut v = [0.0f32; OBSERVATION_DIM];
        v[0] = (bankroll / initial_bankroll.max(1e-9)).clamp(0.0, 1.0) as f32;
        if let Some(p) = last {
            let flags = [
                p.is_zero(),
                p.color() == Color::Red,
                p.color() == Color::Black,
                p.parity() == Parity::Even,
                p.parity() == Parity::Odd,
                p.half() == Half::Low,
                p.half() == Half::High,
            ];
            for (slot, flag) in v[1..].iter_mut().zip(flags) {
                *slot = if flag { 1.0 } else { 0.0 };
            }
        }
        Observation(v)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn bankroll_ratio(&self) -> f32 {
        self.0[0]
    }
}

/// Box-shaped space descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSpace {
    pub low: f64,
    pub high: f64,
    pub dim: usize,
}

pub type ActionSpace = BoxSpace;
pub type ObservationSpace = BoxSpace;

/// Diagnostics for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub pocket: Pocket,
    pub bankroll: f64,
    pub stake: f64,
    pub payout: f64,
    pub reward: f64,
    pub weights: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination: Option<TerminationReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    /// Session hit a termination reason, step cap included
    pub terminated: bool,
    /// Always false; the step cap is a terminal state of the session
    pub truncated: bool,
    pub info: StepInfo,
}

impl StepOutcome {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

#[derive(Debug, Clone)]
pub struct RouletteEnv {
    config: EnvConfig,
    session: Session,
    spins: SpinGenerator,
}

impl RouletteEnv {
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let session = Session::new(config.session.clone())?;
        let spins = match config.seed {
            Some(seed) => SpinGenerator::new_with_seed(seed),
            None => SpinGenerator::from_entropy(),
        };
        Ok(Self {
            config,
            session,
            spins,
        })
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn action_space() -> ActionSpace {
        BoxSpace {
            low: ACTION_LOW,
            high: ACTION_HIGH,
            dim: ACTION_DIM,
        }
    }

    pub fn observation_space() -> ObservationSpace {
        BoxSpace {
            low: 0.0,
            high: 1.0,
            dim: OBSERVATION_DIM,
        }
    }

    /// Start a new episode. `Some(seed)` restarts the outcome stream;
    /// `None` continues it.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.spins.reseed(seed);
        }
        self.session.reset();
        self.observation()
    }

    pub fn observation(&self) -> Observation {
        Observation::new(
            self.session.bankroll(),
            self.config.session.initial_bankroll,
            self.session.last_outcome(),
        )
    }

    /// Play one spin with the allocation given by `action`.
    ///
    /// A malformed action or a finished episode is rejected before the
    /// generator or the session are touched.
    pub fn step(&mut self, action: &[f64]) -> Result<StepOutcome, EnvError> {
        let allocation = Allocation::from_logits(action, self.config.bet_fraction)?;
        if self.session.status().is_terminated() {
            return Err(EnvError::EpisodeFinished);
        }
        let slip = self.session.commit(&allocation)?;

        let pocket = self.spins.draw();
        let result = self.session.apply(pocket, slip)?;

        let reason = result.status.reason();
        let terminated = reason.is_some();
        let truncated = false;
        let reward = result.settlement.net;

        Ok(StepOutcome {
            observation: self.observation(),
            reward,
            terminated,
            truncated,
            info: StepInfo {
                pocket,
                bankroll: result.bankroll,
                stake: result.settlement.total_stake,
                payout: result.settlement.payout,
                reward,
                weights: allocation.weights().to_vec(),
                termination: reason,
            },
        })
    }
}
