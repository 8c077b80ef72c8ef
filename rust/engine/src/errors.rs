use thiserror::Error;

use crate::session::TerminationReason;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("Invalid pocket: {0} (must be 0-36)")]
    InvalidPocket(u8),
    #[error("Invalid stake amount: {amount}")]
    InvalidStake { amount: f64 },
    #[error("Total stake {stake} exceeds bankroll {bankroll}")]
    StakeExceedsBankroll { stake: f64, bankroll: f64 },
    #[error("Bet slip is empty")]
    EmptyBetSlip,
    #[error("A spin is already in progress")]
    SpinInProgress,
    #[error("No spin in progress")]
    NoSpinInProgress,
    #[error("Session already terminated ({0})")]
    SessionTerminated(TerminationReason),
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum EnvError {
    #[error("Action has length {actual}, expected {expected}")]
    ActionLength { expected: usize, actual: usize },
    #[error("Action component {index} is not finite")]
    NonFiniteAction { index: usize },
    #[error("Episode has finished; call reset() before stepping again")]
    EpisodeFinished,
    #[error(transparent)]
    Game(#[from] GameError),
}
