//! Train a small policy through the CLI, then evaluate the checkpoint it wrote.

use std::path::Path;

use croupier_ai::checkpoint::{self, PolicyState};
use croupier_cli::exit_code;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = croupier_cli::run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn train(out_dir: &Path, policy: &str) -> String {
    let (code, out, err) = run(&[
        "croupier",
        "train",
        "--policy",
        policy,
        "--timesteps",
        "600",
        "--max-steps",
        "25",
        "--target-bankroll",
        "200",
        "--bet-fraction",
        "0.1",
        "--seed",
        "7",
        "--eval-episodes",
        "5",
        "--episodes-per-candidate",
        "2",
        "--out-dir",
        out_dir.to_str().unwrap(),
    ]);
    assert_eq!(code, exit_code::SUCCESS, "train failed: {}", err);
    out
}

#[test]
fn train_writes_checkpoint_and_episode_log() {
    let dir = tempfile::tempdir().unwrap();
    let out = train(dir.path(), "linear");

    assert!(out.contains("Trained linear for"));
    assert!(out.contains("Evaluation over 5 episodes: mean return"));
    assert!(out.contains("Mean final bankroll: "));

    let ckpt = checkpoint::load(&dir.path().join("linear_roulette.json")).unwrap();
    assert_eq!(ckpt.version, 1);
    assert!(matches!(ckpt.state, PolicyState::Linear { .. }));
    assert!(ckpt.timesteps.unwrap() >= 600);

    let csv = std::fs::read_to_string(dir.path().join("training_episodes.csv")).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows[0], "episode,return,length,final_bankroll");
    assert_eq!(rows.len(), 6);
    for (i, row) in rows[1..].iter().enumerate() {
        let cols: Vec<&str> = row.split(',').collect();
        assert_eq!(cols.len(), 4);
        assert_eq!(cols[0], (i + 1).to_string());
        let length: u64 = cols[2].parse().unwrap();
        assert!((1..=25).contains(&length));
    }
}

#[test]
fn training_is_deterministic_for_a_seed() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    train(a.path(), "linear");
    train(b.path(), "linear");

    let load = |d: &Path| checkpoint::load(&d.join("linear_roulette.json")).unwrap().state;
    assert_eq!(load(a.path()), load(b.path()));
    let csv = |d: &Path| std::fs::read_to_string(d.join("training_episodes.csv")).unwrap();
    assert_eq!(csv(a.path()), csv(b.path()));
}

#[test]
fn eval_reads_trained_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    train(dir.path(), "red");
    let model = dir.path().join("linear_roulette.json");
    let csv = dir.path().join("reports").join("eval.csv");

    let args = [
        "croupier",
        "eval",
        "--model",
        model.to_str().unwrap(),
        "--episodes",
        "6",
        "--bankroll",
        "1000",
        "--target-bankroll",
        "2000",
        "--max-steps",
        "50",
        "--seed",
        "123",
        "--out-csv",
        csv.to_str().unwrap(),
    ];
    let (code, out, err) = run(&args);
    assert_eq!(code, exit_code::SUCCESS, "eval failed: {}", err);
    assert!(out.contains("Episodes: 6"));
    assert!(out.contains("Mean return: "));
    assert!(out.contains("Mean profit: "));
    assert!(out.contains(&format!("Results: {}", csv.display())));

    let text = std::fs::read_to_string(&csv).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows[0], "episode,initial_bankroll,final_bankroll,profit,steps");
    assert_eq!(rows.len(), 7);
    for row in &rows[1..] {
        let cols: Vec<f64> = row.split(',').map(|c| c.parse().unwrap()).collect();
        assert_eq!(cols[1], 1000.0);
        // profit column is final minus initial
        assert!((cols[3] - (cols[2] - cols[1])).abs() < 0.011);
        assert!(cols[4] >= 1.0 && cols[4] <= 50.0);
    }

    // same arguments, same table
    run(&args);
    assert_eq!(text, std::fs::read_to_string(&csv).unwrap());
}

#[test]
fn eval_rejects_invalid_fraction() {
    let dir = tempfile::tempdir().unwrap();
    train(dir.path(), "uniform");
    let (code, _, err) = run(&[
        "croupier",
        "eval",
        "--model",
        dir.path().join("linear_roulette.json").to_str().unwrap(),
        "--bet-fraction",
        "1.5",
        "--out-csv",
        dir.path().join("eval.csv").to_str().unwrap(),
    ]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("bet_fraction"));
}
