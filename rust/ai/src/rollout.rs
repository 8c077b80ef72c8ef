use croupier_engine::env::RouletteEnv;
use croupier_engine::episode::{EpisodeStats, EpisodeSummary, EpisodeTracker};
use croupier_engine::errors::EnvError;
use serde::Serialize;

use crate::{Policy, Transition};

/// Play one episode from the environment's current state.
///
/// The caller resets the environment first. Every step is fed back through
/// [`Policy::observe`] and the episode is closed with
/// [`Policy::end_episode`].
pub fn run_episode(
    policy: &mut dyn Policy,
    env: &mut RouletteEnv,
    episode: usize,
) -> Result<EpisodeSummary, EnvError> {
    let mut tracker = EpisodeTracker::new(episode, env.session().bankroll());
    let mut observation = env.observation();
    loop {
        let action = policy.predict(&observation);
        let outcome = env.step(&action)?;
        tracker.record(&outcome);
        let done = outcome.done();
        policy.observe(&Transition {
            observation,
            action,
            reward: outcome.reward,
            next_observation: outcome.observation,
            done,
        });
        observation = outcome.observation;
        if done {
            break;
        }
    }
    policy.end_episode();
    Ok(tracker.finish())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    /// Stop starting new episodes once this many steps have been taken
    pub timesteps: u64,
    /// Base seed for the training episodes
    pub seed: u64,
    /// Episodes cycle through this many seeds so that every candidate of a
    /// hill-climbing policy is judged on the same spins
    pub seed_cycle: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainReport {
    pub episodes: usize,
    pub timesteps: u64,
    pub stats: Option<EpisodeStats>,
}

/// Run training episodes until the step budget is spent.
pub fn train(
    policy: &mut dyn Policy,
    env: &mut RouletteEnv,
    config: &TrainConfig,
) -> Result<TrainReport, EnvError> {
    policy.set_training(true);
    let cycle = config.seed_cycle.max(1);
    let mut summaries = Vec::new();
    let mut timesteps = 0u64;
    while timesteps < config.timesteps {
        let index = summaries.len();
        env.reset(Some(config.seed.wrapping_add((index % cycle) as u64)));
        let summary = run_episode(policy, env, index + 1)?;
        timesteps += summary.steps;
        summaries.push(summary);
    }
    policy.set_training(false);
    let report = TrainReport {
        episodes: summaries.len(),
        timesteps,
        stats: EpisodeStats::from_summaries(&summaries),
    };
    tracing::info!(
        policy = policy.name(),
        episodes = report.episodes,
        timesteps = report.timesteps,
        "training finished"
    );
    Ok(report)
}

/// Run `episodes` frozen episodes, continuing the environment's current
/// outcome stream between them.
pub fn evaluate(
    policy: &mut dyn Policy,
    env: &mut RouletteEnv,
    episodes: usize,
) -> Result<Vec<EpisodeSummary>, EnvError> {
    policy.set_training(false);
    let mut summaries = Vec::with_capacity(episodes);
    for episode in 1..=episodes {
        env.reset(None);
        summaries.push(run_episode(policy, env, episode)?);
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::UniformPolicy;
    use crate::checkpoint::PolicyState;
    use crate::linear::{HillClimbConfig, LinearPolicy};
    use croupier_engine::env::EnvConfig;
    use croupier_engine::session::SessionConfig;

    fn env(seed: u64, max_steps: u64) -> RouletteEnv {
        RouletteEnv::new(EnvConfig {
            session: SessionConfig {
                max_steps: Some(max_steps),
                ..SessionConfig::default()
            },
            seed: Some(seed),
            ..EnvConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn episode_summary_matches_session() {
        let mut e = env(4, 50);
        e.reset(None);
        let s = run_episode(&mut UniformPolicy, &mut e, 1).unwrap();
        assert_eq!(s.episode, 1);
        assert_eq!(s.steps, e.session().steps());
        assert_eq!(s.final_bankroll, e.session().bankroll());
        assert!(s.reason.is_some());
    }

    #[test]
    fn evaluation_is_reproducible() {
        let run = || {
            let mut e = env(123, 40);
            evaluate(&mut UniformPolicy, &mut e, 5).unwrap()
        };
        let a = run();
        assert_eq!(a, run());
        assert_eq!(a.len(), 5);
        assert_eq!(a.iter().map(|s| s.episode).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn training_respects_budget_and_freezes() {
        let mut policy = LinearPolicy::new(HillClimbConfig {
            episodes_per_candidate: 2,
            ..HillClimbConfig::default()
        });
        let mut e = env(1, 30);
        let report = train(
            &mut policy,
            &mut e,
            &TrainConfig {
                timesteps: 300,
                seed: 1,
                seed_cycle: 2,
            },
        )
        .unwrap();
        assert!(report.timesteps >= 300);
        assert!(report.episodes >= 10);
        assert!(policy.candidates_judged() >= 5);
        assert!(matches!(policy.state(), PolicyState::Linear { .. }));
        assert!(!policy.is_training());
    }

    #[test]
    fn trained_policy_is_deterministic() {
        let train_once = || {
            let mut policy = LinearPolicy::new(HillClimbConfig::default());
            let mut e = env(9, 25);
            let cfg = TrainConfig {
                timesteps: 500,
                seed: 9,
                seed_cycle: 4,
            };
            train(&mut policy, &mut e, &cfg).unwrap();
            policy.params().clone()
        };
        assert_eq!(train_once(), train_once());
    }
}
