use serde::{Deserialize, Serialize};

use crate::bet::{BetSlip, StakeSource};
use crate::errors::GameError;
use crate::settle::{settle, Settlement};
use crate::wheel::Pocket;

/// Why a session stopped accepting spins.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Bankroll fell to or below the bankrupt threshold
    Bankrupt,
    /// Bankroll reached the target
    TargetReached,
    /// Step counter hit the configured cap
    StepCap,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TerminationReason::Bankrupt => "bankrupt",
            TerminationReason::TargetReached => "target_reached",
            TerminationReason::StepCap => "step_cap",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Terminated(TerminationReason),
}

impl SessionStatus {
    pub fn is_terminated(self) -> bool {
        matches!(self, SessionStatus::Terminated(_))
    }

    pub fn reason(self) -> Option<TerminationReason> {
        match self {
            SessionStatus::Active => None,
            SessionStatus::Terminated(r) => Some(r),
        }
    }
}

/// Bankroll limits for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub initial_bankroll: f64,
    pub bankrupt_threshold: f64,
    /// Stop once the bankroll reaches this value; `None` plays on indefinitely
    pub target_bankroll: Option<f64>,
    /// Stop after this many spins; `None` means no cap
    pub max_steps: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_bankroll: 100.0,
            bankrupt_threshold: 0.0,
            target_bankroll: Some(200.0),
            max_steps: Some(2_000),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !self.initial_bankroll.is_finite() || self.initial_bankroll <= 0.0 {
            return Err(GameError::InvalidConfig(
                "initial_bankroll must be a positive number".into(),
            ));
        }
        if !self.bankrupt_threshold.is_finite() {
            return Err(GameError::InvalidConfig(
                "bankrupt_threshold must be finite".into(),
            ));
        }
        if let Some(target) = self.target_bankroll {
            if target.is_nan() || target <= self.bankrupt_threshold {
                return Err(GameError::InvalidConfig(
                    "target_bankroll must exceed bankrupt_threshold".into(),
                ));
            }
        }
        if self.max_steps == Some(0) {
            return Err(GameError::InvalidConfig("max_steps must be >= 1".into()));
        }
        Ok(())
    }
}

/// Immutable record of one completed spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub pocket: Pocket,
    pub slip: BetSlip,
    #[serde(flatten)]
    pub settlement: Settlement,
    pub bankroll: f64,
    pub step: u64,
    pub status: SessionStatus,
}

/// Bankroll and termination state machine shared by the table and the
/// training environment.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    bankroll: f64,
    steps: u64,
    last_outcome: Option<Pocket>,
    status: SessionStatus,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        config.validate()?;
        let bankroll = config.initial_bankroll;
        Ok(Self {
            config,
            bankroll,
            steps: 0,
            last_outcome: None,
            status: SessionStatus::Active,
        })
    }

    pub fn reset(&mut self) {
        self.bankroll = self.config.initial_bankroll;
        self.steps = 0;
        self.last_outcome = None;
        self.status = SessionStatus::Active;
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }
    pub fn steps(&self) -> u64 {
        self.steps
    }
    pub fn last_outcome(&self) -> Option<Pocket> {
        self.last_outcome
    }
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Terminated(r) => Err(GameError::SessionTerminated(r)),
        }
    }

    /// Ask `source` for this round's slip and check it can be covered by the
    /// current bankroll. Nothing is mutated.
    pub fn commit(&self, source: &dyn StakeSource) -> Result<BetSlip, GameError> {
        self.ensure_active()?;
        let slip = source.stake_slip(self.bankroll)?;
        slip.validate_against(self.bankroll)?;
        Ok(slip)
    }

    /// Settle `slip` on `pocket` and advance the state machine by one spin.
    ///
    /// The slip is validated first; a rejected slip leaves the session
    /// untouched.
    pub fn apply(&mut self, pocket: Pocket, slip: BetSlip) -> Result<SpinResult, GameError> {
        self.ensure_active()?;
        slip.validate_against(self.bankroll)?;

        let settlement = settle(pocket, &slip);
        self.bankroll += settlement.net;
        self.steps += 1;
        self.last_outcome = Some(pocket);
        self.status = self.evaluate();

        tracing::debug!(
            pocket = pocket.number(),
            stake = settlement.total_stake,
            payout = settlement.payout,
            bankroll = self.bankroll,
            step = self.steps,
            "spin settled"
        );
        if let SessionStatus::Terminated(reason) = self.status {
            tracing::info!(
                %reason,
                bankroll = self.bankroll,
                steps = self.steps,
                "session terminated"
            );
        }

        Ok(SpinResult {
            pocket,
            slip,
            settlement,
            bankroll: self.bankroll,
            step: self.steps,
            status: self.status,
        })
    }

    fn evaluate(&self) -> SessionStatus {
        if self.bankroll <= self.config.bankrupt_threshold {
            return SessionStatus::Terminated(TerminationReason::Bankrupt);
        }
        if let Some(target) = self.config.target_bankroll {
            if self.bankroll >= target {
                return SessionStatus::Terminated(TerminationReason::TargetReached);
            }
        }
        if let Some(cap) = self.config.max_steps {
            if self.steps >= cap {
                return SessionStatus::Terminated(TerminationReason::StepCap);
            }
        }
        SessionStatus::Active
    }
}
