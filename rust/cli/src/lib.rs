//! # Croupier CLI Library
//!
//! Command-line front end for the Croupier roulette engine: an interactive
//! table, an outcome sampler, and training/evaluation of betting policies.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["croupier", "spin", "--seed", "7", "--count", "3"];
//! let code = croupier_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play at the interactive table
//! - `spin`: Print a sample of seeded outcomes
//! - `train`: Train a policy, save a checkpoint and an episode log
//! - `eval`: Evaluate a checkpoint and write per-episode results
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, CroupierCli};
use commands::{
    EvalArgs, TrainArgs, handle_cfg_command, handle_eval_command, handle_play_command,
    handle_spin_command, handle_train_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "spin", "train", "eval", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`]
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["croupier", "spin", "--seed", "42"];
/// let code = croupier_cli::run(args, &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CroupierCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout with success
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Croupier Roulette CLI");
                    write_or_exit!(err, "Usage: croupier <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: croupier --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play { seed, bankroll } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(seed, bankroll, out, err, &mut stdin_lock)
        }
        Commands::Spin { seed, count } => handle_spin_command(seed, count, out),
        Commands::Train {
            policy,
            timesteps,
            bet_fraction,
            max_steps,
            target_bankroll,
            seed,
            eval_episodes,
            sigma,
            episodes_per_candidate,
            out_dir,
        } => handle_train_command(
            &TrainArgs {
                policy,
                timesteps,
                bet_fraction,
                max_steps,
                target_bankroll,
                seed,
                eval_episodes,
                sigma,
                episodes_per_candidate,
                out_dir,
            },
            out,
        ),
        Commands::Eval {
            model,
            episodes,
            bankroll,
            bet_fraction,
            max_steps,
            target_bankroll,
            seed,
            out_csv,
        } => handle_eval_command(
            &EvalArgs {
                model,
                episodes,
                bankroll,
                bet_fraction,
                max_steps,
                target_bankroll,
                seed,
                out_csv,
            },
            out,
        ),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, err) = run_capture(&["croupier", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage: croupier"));
        assert!(out.contains("train"));
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, out, err) = run_capture(&["croupier", "deal"]);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}", c)), "missing {}", c);
        }
    }

    #[test]
    fn handler_errors_are_prefixed() {
        let (code, _, err) = run_capture(&[
            "croupier",
            "eval",
            "--model",
            "/nonexistent/croupier/model.json",
        ]);
        assert_eq!(code, 2);
        assert!(err.starts_with("Error: "));
    }
}
