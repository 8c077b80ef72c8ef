//! Policy training command.
//!
//! Trains a policy against the roulette environment for a step budget, saves
//! the checkpoint, then replays a fixed number of deterministic episodes with
//! the frozen policy and logs them to `training_episodes.csv`.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{MODEL_FILE, PolicyKind, TRAINING_CSV};
use crate::config;
use crate::error::CliError;
use crate::formatters::format_amount;
use crate::io_utils::{create_output, ensure_parent_dir};
use croupier_ai::checkpoint::{self, Checkpoint};
use croupier_ai::linear::{HillClimbConfig, LinearPolicy};
use croupier_ai::rollout::{TrainConfig, evaluate, train};
use croupier_ai::{Policy, create_policy};
use croupier_engine::env::{EnvConfig, RouletteEnv};
use croupier_engine::episode::{EpisodeStats, EpisodeSummary};

const DEFAULT_TRAIN_SEED: u64 = 42;

/// Arguments of the `train` command. `None` fields come from configuration.
#[derive(Debug, Clone)]
pub struct TrainArgs {
    pub policy: PolicyKind,
    pub timesteps: u64,
    pub bet_fraction: Option<f64>,
    pub max_steps: Option<u64>,
    pub target_bankroll: Option<f64>,
    pub seed: Option<u64>,
    pub eval_episodes: usize,
    pub sigma: f64,
    pub episodes_per_candidate: usize,
    pub out_dir: PathBuf,
}

/// Handle the train command.
///
/// Writes `<out_dir>/linear_roulette.json` and
/// `<out_dir>/training_episodes.csv`, then prints a summary.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for a zero step budget or episode count
/// or a non-positive `sigma`, `CliError::Config` for an invalid resolved
/// configuration, and `CliError::Io`/`CliError::Policy` when artifacts
/// cannot be written.
pub fn handle_train_command(args: &TrainArgs, out: &mut dyn Write) -> Result<(), CliError> {
    if args.timesteps == 0 {
        return Err(CliError::InvalidInput("timesteps must be >= 1".into()));
    }
    if args.eval_episodes == 0 {
        return Err(CliError::InvalidInput("eval-episodes must be >= 1".into()));
    }
    if args.episodes_per_candidate == 0 {
        return Err(CliError::InvalidInput(
            "episodes-per-candidate must be >= 1".into(),
        ));
    }
    if !(args.sigma.is_finite() && args.sigma > 0.0) {
        return Err(CliError::InvalidInput("sigma must be > 0".into()));
    }

    let env_config = resolve_env_config(args)?;
    let seed = env_config.seed.unwrap_or(DEFAULT_TRAIN_SEED);
    let mut env = RouletteEnv::new(env_config)?;

    let mut policy: Box<dyn Policy> = match args.policy {
        PolicyKind::Linear => Box::new(LinearPolicy::new(HillClimbConfig {
            sigma: args.sigma,
            episodes_per_candidate: args.episodes_per_candidate,
            seed,
        })),
        other => create_policy(other.as_str())?,
    };

    tracing::info!(
        policy = policy.name(),
        timesteps = args.timesteps,
        seed,
        "training started"
    );
    let report = train(
        &mut *policy,
        &mut env,
        &TrainConfig {
            timesteps: args.timesteps,
            seed,
            seed_cycle: args.episodes_per_candidate,
        },
    )?;

    let model_path = args.out_dir.join(MODEL_FILE);
    ensure_parent_dir(&model_path)?;
    let mut ckpt = Checkpoint::from_policy(&*policy);
    ckpt.trained_at = Some(chrono::Utc::now().to_rfc3339());
    ckpt.timesteps = Some(report.timesteps);
    checkpoint::save(&model_path, &ckpt)?;

    env.reset(Some(seed));
    let episodes = evaluate(&mut *policy, &mut env, args.eval_episodes)?;
    let csv_path = args.out_dir.join(TRAINING_CSV);
    write_training_csv(&csv_path, &episodes)?;
    tracing::info!(path = %csv_path.display(), rows = episodes.len(), "episode log written");

    writeln!(
        out,
        "Trained {} for {} steps over {} episodes",
        policy.name(),
        report.timesteps,
        report.episodes
    )?;
    writeln!(out, "Checkpoint: {}", model_path.display())?;
    writeln!(out, "Episode log: {}", csv_path.display())?;
    if let Some(stats) = EpisodeStats::from_summaries(&episodes) {
        writeln!(
            out,
            "Evaluation over {} episodes: mean return {:.4} ± {:.4}",
            stats.episodes, stats.mean_return, stats.std_return
        )?;
        writeln!(
            out,
            "Mean final bankroll: {}",
            format_amount(stats.mean_final_bankroll)
        )?;
    }
    Ok(())
}

/// Configuration layers with the command's flags on top.
fn resolve_env_config(args: &TrainArgs) -> Result<EnvConfig, CliError> {
    let mut cfg = config::load()?;
    if let Some(v) = args.bet_fraction {
        cfg.bet_fraction = v;
    }
    if let Some(v) = args.max_steps {
        cfg.max_steps = v;
    }
    if let Some(v) = args.target_bankroll {
        cfg.target_bankroll = v;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    config::validate(&cfg)?;
    let mut env = cfg.env_config();
    env.seed = Some(cfg.seed.unwrap_or(DEFAULT_TRAIN_SEED));
    Ok(env)
}

fn write_training_csv(path: &Path, episodes: &[EpisodeSummary]) -> Result<(), CliError> {
    let mut w = create_output(path)?;
    writeln!(w, "episode,return,length,final_bankroll")?;
    for e in episodes {
        writeln!(
            w,
            "{},{:.4},{},{:.2}",
            e.episode, e.episode_return, e.steps, e.final_bankroll
        )?;
    }
    w.flush()?;
    Ok(())
}
