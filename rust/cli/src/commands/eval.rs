//! Checkpoint evaluation command.
//!
//! Loads a saved policy and plays a fixed number of seeded episodes with it,
//! writing one CSV row per episode. A missing or unreadable checkpoint is an
//! error; there is no fallback to an untrained policy.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CliError;
use crate::formatters::format_amount;
use crate::io_utils::create_output;
use croupier_ai::checkpoint;
use croupier_ai::rollout::evaluate;
use croupier_engine::env::{EnvConfig, RouletteEnv};
use croupier_engine::episode::{EpisodeStats, EpisodeSummary};
use croupier_engine::session::SessionConfig;

/// Arguments of the `eval` command.
#[derive(Debug, Clone)]
pub struct EvalArgs {
    pub model: PathBuf,
    pub episodes: usize,
    pub bankroll: f64,
    pub bet_fraction: f64,
    pub max_steps: u64,
    pub target_bankroll: f64,
    pub seed: u64,
    pub out_csv: PathBuf,
}

impl EvalArgs {
    fn env_config(&self) -> EnvConfig {
        EnvConfig {
            session: SessionConfig {
                initial_bankroll: self.bankroll,
                bankrupt_threshold: 0.0,
                target_bankroll: Some(self.target_bankroll),
                max_steps: Some(self.max_steps),
            },
            bet_fraction: self.bet_fraction,
            seed: Some(self.seed),
        }
    }
}

/// Evaluate a checkpoint.
///
/// The environment is seeded once with `seed` and the episodes continue
/// its outcome stream, so the same arguments always produce the same table.
///
/// # Errors
///
/// Returns `CliError::Policy` if the checkpoint cannot be loaded,
/// `CliError::Config` for invalid environment settings, and `CliError::Io`
/// if the CSV cannot be written.
pub fn handle_eval_command(args: &EvalArgs, out: &mut dyn Write) -> Result<(), CliError> {
    if args.episodes == 0 {
        return Err(CliError::InvalidInput("episodes must be >= 1".into()));
    }
    let mut env = RouletteEnv::new(args.env_config())?;
    let mut policy = checkpoint::load_policy(&args.model)?;
    tracing::info!(
        model = %args.model.display(),
        policy = policy.name(),
        episodes = args.episodes,
        seed = args.seed,
        "evaluation started"
    );

    let episodes = evaluate(&mut *policy, &mut env, args.episodes)?;
    write_eval_csv(&args.out_csv, &episodes)?;
    tracing::info!(path = %args.out_csv.display(), "evaluation written");

    if let Some(stats) = EpisodeStats::from_summaries(&episodes) {
        writeln!(out, "Episodes: {}", stats.episodes)?;
        writeln!(
            out,
            "Mean return: {:.4} ± {:.4}",
            stats.mean_return, stats.std_return
        )?;
        writeln!(
            out,
            "Mean final bankroll: {}",
            format_amount(stats.mean_final_bankroll)
        )?;
        writeln!(out, "Mean profit: {}", format_amount(stats.mean_profit))?;
    }
    writeln!(out, "Results: {}", args.out_csv.display())?;
    Ok(())
}

fn write_eval_csv(path: &Path, episodes: &[EpisodeSummary]) -> Result<(), CliError> {
    let mut w = create_output(path)?;
    writeln!(w, "episode,initial_bankroll,final_bankroll,profit,steps")?;
    for e in episodes {
        writeln!(
            w,
            "{},{:.2},{:.2},{:.2},{}",
            e.episode, e.initial_bankroll, e.final_bankroll, e.profit, e.steps
        )?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_ai::baseline::UniformPolicy;
    use croupier_ai::checkpoint::Checkpoint;

    fn args(dir: &Path) -> EvalArgs {
        EvalArgs {
            model: dir.join("model.json"),
            episodes: 4,
            bankroll: 1_000.0,
            bet_fraction: 0.1,
            max_steps: 30,
            target_bankroll: 2_000.0,
            seed: 123,
            out_csv: dir.join("nested").join("eval.csv"),
        }
    }

    #[test]
    fn missing_checkpoint_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let result = handle_eval_command(&args(dir.path()), &mut out);
        assert!(matches!(result, Err(CliError::Policy(_))));
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn writes_one_row_per_episode() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(dir.path());
        checkpoint::save(&a.model, &Checkpoint::from_policy(&UniformPolicy)).unwrap();

        let mut out = Vec::new();
        handle_eval_command(&a, &mut out).unwrap();

        let csv = std::fs::read_to_string(&a.out_csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "episode,initial_bankroll,final_bankroll,profit,steps"
        );
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("1,1000.00,"));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Episodes: 4"));
        assert!(text.contains("Mean profit: "));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let a = args(dir.path());
        checkpoint::save(&a.model, &Checkpoint::from_policy(&UniformPolicy)).unwrap();

        handle_eval_command(&a, &mut Vec::new()).unwrap();
        let first = std::fs::read_to_string(&a.out_csv).unwrap();
        handle_eval_command(&a, &mut Vec::new()).unwrap();
        assert_eq!(first, std::fs::read_to_string(&a.out_csv).unwrap());
    }

    #[test]
    fn invalid_settings_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.target_bankroll = -1.0;
        assert!(matches!(
            handle_eval_command(&a, &mut Vec::new()),
            Err(CliError::Config(_))
        ));
    }
}
