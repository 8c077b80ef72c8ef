//! Command-line argument definitions.
//!
//! Flags left unset fall back to the layered configuration (see
//! [`crate::config`]); `eval` carries its own large-bankroll defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_MODEL_DIR: &str = "models";
pub const MODEL_FILE: &str = "linear_roulette.json";
pub const TRAINING_CSV: &str = "training_episodes.csv";
pub const DEFAULT_EVAL_CSV: &str = "eval_large_bankroll.csv";

#[derive(Parser, Debug)]
#[command(
    name = "croupier",
    author,
    version,
    about = "Croupier Roulette CLI",
    long_about = "European roulette table, spin sampler, and policy training/evaluation"
)]
pub struct CroupierCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play at the interactive table, one command per line on stdin
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Starting bankroll (default 1000)
        #[arg(long)]
        bankroll: Option<f64>,
    },
    /// Print a sample of pockets from the outcome generator
    Spin {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Train a policy and write its checkpoint and episode log
    Train {
        #[arg(long, value_enum, default_value_t = PolicyKind::Linear)]
        policy: PolicyKind,
        #[arg(long, default_value_t = 500_000)]
        timesteps: u64,
        #[arg(long)]
        bet_fraction: Option<f64>,
        #[arg(long)]
        max_steps: Option<u64>,
        #[arg(long)]
        target_bankroll: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Deterministic episodes run after training for the episode log
        #[arg(long, default_value_t = 50)]
        eval_episodes: usize,
        /// Hill-climbing perturbation half-width
        #[arg(long, default_value_t = 0.5)]
        sigma: f64,
        /// Episodes averaged before a candidate is judged
        #[arg(long, default_value_t = 4)]
        episodes_per_candidate: usize,
        #[arg(long, default_value = DEFAULT_MODEL_DIR)]
        out_dir: PathBuf,
    },
    /// Evaluate a saved checkpoint and write per-episode results
    Eval {
        #[arg(long, default_value = "models/linear_roulette.json")]
        model: PathBuf,
        #[arg(long, default_value_t = 20)]
        episodes: usize,
        #[arg(long, default_value_t = 1_000_000.0)]
        bankroll: f64,
        #[arg(long, default_value_t = 0.10)]
        bet_fraction: f64,
        #[arg(long, default_value_t = 2_000)]
        max_steps: u64,
        #[arg(long, default_value_t = 2_000_000.0)]
        target_bankroll: f64,
        #[arg(long, default_value_t = 123)]
        seed: u64,
        #[arg(long, default_value = DEFAULT_EVAL_CSV)]
        out_csv: PathBuf,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Policy trained by the `train` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Linear logits trained by hill climbing
    Linear,
    /// Even split across every bet
    Uniform,
    /// Everything on RED
    Red,
}

impl PolicyKind {
    /// Returns the name used by `croupier_ai::create_policy`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use croupier_cli::cli::PolicyKind;
    /// assert_eq!(PolicyKind::Red.as_str(), "red");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Linear => "linear",
            PolicyKind::Uniform => "uniform",
            PolicyKind::Red => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definitions_are_consistent() {
        CroupierCli::command().debug_assert();
    }

    #[test]
    fn eval_defaults() {
        let cli = CroupierCli::try_parse_from(["croupier", "eval"]).unwrap();
        match cli.cmd {
            Commands::Eval {
                model,
                episodes,
                bankroll,
                bet_fraction,
                max_steps,
                target_bankroll,
                seed,
                out_csv,
            } => {
                assert_eq!(model, PathBuf::from("models/linear_roulette.json"));
                assert_eq!(episodes, 20);
                assert_eq!(bankroll, 1_000_000.0);
                assert_eq!(bet_fraction, 0.10);
                assert_eq!(max_steps, 2_000);
                assert_eq!(target_bankroll, 2_000_000.0);
                assert_eq!(seed, 123);
                assert_eq!(out_csv, PathBuf::from(DEFAULT_EVAL_CSV));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn train_flags_parse() {
        let cli = CroupierCli::try_parse_from([
            "croupier",
            "train",
            "--timesteps",
            "1000",
            "--bet-fraction",
            "0.2",
            "--policy",
            "red",
            "--out-dir",
            "out",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Train {
                policy,
                timesteps,
                bet_fraction,
                max_steps,
                out_dir,
                ..
            } => {
                assert_eq!(policy, PolicyKind::Red);
                assert_eq!(timesteps, 1000);
                assert_eq!(bet_fraction, Some(0.2));
                assert_eq!(max_steps, None);
                assert_eq!(out_dir, PathBuf::from("out"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn policy_names_match_ai_crate() {
        for kind in [PolicyKind::Linear, PolicyKind::Uniform, PolicyKind::Red] {
            assert!(croupier_ai::POLICY_NAMES.contains(&kind.as_str()));
        }
    }
}
