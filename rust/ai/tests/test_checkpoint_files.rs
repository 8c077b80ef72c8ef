use croupier_ai::checkpoint::{self, Checkpoint, PolicyState};
use croupier_ai::linear::{HillClimbConfig, LinearPolicy};
use croupier_ai::rollout::{evaluate, train, TrainConfig};
use croupier_ai::{CheckpointError, Policy};
use croupier_engine::env::{EnvConfig, RouletteEnv};
use croupier_engine::session::SessionConfig;
use tempfile::TempDir;

fn env(seed: u64) -> RouletteEnv {
    RouletteEnv::new(EnvConfig {
        session: SessionConfig {
            max_steps: Some(40),
            ..SessionConfig::default()
        },
        seed: Some(seed),
        ..EnvConfig::default()
    })
    .expect("valid env")
}

#[test]
fn trained_policy_survives_a_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linear_roulette.json");

    let mut policy = LinearPolicy::new(HillClimbConfig::default());
    let cfg = TrainConfig {
        timesteps: 400,
        seed: 42,
        seed_cycle: 4,
    };
    train(&mut policy, &mut env(42), &cfg).unwrap();
    let mut ck = Checkpoint::from_policy(&policy);
    ck.timesteps = Some(400);
    checkpoint::save(&path, &ck).unwrap();

    let loaded = checkpoint::load(&path).unwrap();
    assert_eq!(loaded.timesteps, Some(400));
    assert!(matches!(loaded.state, PolicyState::Linear { .. }));
    let mut restored = loaded.into_policy().unwrap();

    let original = evaluate(&mut policy, &mut env(123), 3).unwrap();
    let replayed = evaluate(restored.as_mut(), &mut env(123), 3).unwrap();
    assert_eq!(original, replayed);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = checkpoint::load_policy(&dir.path().join("nope.json"))
        .err()
        .unwrap();
    assert!(matches!(err, CheckpointError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn corrupt_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{\"version\":1,").unwrap();
    assert!(matches!(
        checkpoint::load(&path).unwrap_err(),
        CheckpointError::Parse(_)
    ));
}

#[test]
fn baseline_policies_round_trip() {
    let dir = TempDir::new().unwrap();
    for name in ["uniform", "red"] {
        let policy = croupier_ai::create_policy(name).unwrap();
        let path = dir.path().join(format!("{name}.json"));
        checkpoint::save(&path, &Checkpoint::from_policy(policy.as_ref())).unwrap();
        let restored = checkpoint::load_policy(&path).unwrap();
        assert_eq!(restored.name(), name);
    }
}
