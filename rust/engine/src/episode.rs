use serde::{Deserialize, Serialize};

use crate::env::StepOutcome;
use crate::session::TerminationReason;

/// One finished episode, as written to the training and evaluation tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// One-based index within the run
    pub episode: usize,
    /// Bankroll the episode started from
    pub initial_bankroll: f64,
    /// Bankroll after the last step
    pub final_bankroll: f64,
    /// `final_bankroll - initial_bankroll`
    pub profit: f64,
    /// Number of spins played
    pub steps: u64,
    /// Undiscounted sum of rewards
    #[serde(rename = "return")]
    pub episode_return: f64,
    /// Why the episode stopped; `None` if the caller cut it short
    #[serde(default)]
    pub reason: Option<TerminationReason>,
}

/// Accumulates step outcomes into an [`EpisodeSummary`].
#[derive(Debug, Clone)]
pub struct EpisodeTracker {
    episode: usize,
    initial_bankroll: f64,
    bankroll: f64,
    steps: u64,
    episode_return: f64,
    reason: Option<TerminationReason>,
}

impl EpisodeTracker {
    pub fn new(episode: usize, initial_bankroll: f64) -> Self {
        Self {
            episode,
            initial_bankroll,
            bankroll: initial_bankroll,
            steps: 0,
            episode_return: 0.0,
            reason: None,
        }
    }

    pub fn record(&mut self, outcome: &StepOutcome) {
        self.steps += 1;
        self.episode_return += outcome.reward;
        self.bankroll = outcome.info.bankroll;
        self.reason = outcome.info.termination;
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn finish(self) -> EpisodeSummary {
        EpisodeSummary {
            episode: self.episode,
            initial_bankroll: self.initial_bankroll,
            final_bankroll: self.bankroll,
            profit: self.bankroll - self.initial_bankroll,
            steps: self.steps,
            episode_return: self.episode_return,
            reason: self.reason,
        }
    }
}

/// Aggregate figures over a batch of episodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpisodeStats {
    pub episodes: usize,
    pub mean_return: f64,
    /// Population standard deviation of the returns
    pub std_return: f64,
    pub mean_final_bankroll: f64,
    pub mean_profit: f64,
}

impl EpisodeStats {
    /// `None` for an empty batch.
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Option<Self> {
        if summaries.is_empty() {
            return None;
        }
        let n = summaries.len() as f64;
        let mean = |f: fn(&EpisodeSummary) -> f64| summaries.iter().map(f).sum::<f64>() / n;
        let mean_return = mean(|s| s.episode_return);
        let var = summaries
            .iter()
            .map(|s| (s.episode_return - mean_return).powi(2))
            .sum::<f64>()
            / n;
        Some(Self {
            episodes: summaries.len(),
            mean_return,
            std_return: var.sqrt(),
            mean_final_bankroll: mean(|s| s.final_bankroll),
            mean_profit: mean(|s| s.profit),
        })
    }
}
