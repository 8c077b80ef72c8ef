//! # Play Command
//!
//! The interactive roulette table, driven one line at a time from stdin.
//!
//! Bets are built up on a slip with the current chip size, then `spin`
//! commits the slip, runs the wheel animation to rest, and settles. The
//! session runs until the player quits, stdin closes, or the bankroll is gone.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_amount, format_net, format_pocket, format_slip, format_wheel_window};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{HELP, ParseResult, parse_table_command};
use croupier_engine::session::{SessionStatus, SpinResult};
use croupier_engine::table::{TABLE_BANKROLL, Table, TableEvent};
use std::io::{BufRead, Write};

/// Animation step used to run a spin to rest, in seconds (one 60 Hz frame).
const FRAME_DT: f64 = 1.0 / 60.0;

/// Pockets shown either side of the ball after a spin.
const WHEEL_WINDOW: usize = 3;

/// Handle the play command: interactive table session
///
/// # Arguments
///
/// * `seed` - Outcome seed (default: config seed, else random)
/// * `bankroll` - Starting bankroll (default: 1000)
/// * `out` - Output stream for table display
/// * `err` - Error stream for rejected commands
/// * `stdin` - Input stream for table commands
///
/// # Examples
///
/// ```
/// use croupier_cli::commands::handle_play_command;
/// use std::io::Cursor;
///
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let mut input = Cursor::new(b"red\nspin\nq\n");
/// handle_play_command(Some(7), None, &mut out, &mut err, &mut input).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("Result:"));
/// ```
pub fn handle_play_command(
    seed: Option<u64>,
    bankroll: Option<f64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seed = match seed {
        Some(s) => s,
        None => config::load()?.seed.unwrap_or_else(rand::random),
    };
    let mut session = Table::default_config();
    session.initial_bankroll = bankroll.unwrap_or(TABLE_BANKROLL);
    let mut table = Table::new(session, seed)?;

    writeln!(
        out,
        "play: seed={} bankroll={}",
        seed,
        format_amount(table.session().bankroll())
    )?;
    writeln!(out, "{}", HELP)?;
    tracing::info!(seed, "table opened");

    loop {
        write_status(&table, out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            break;
        };
        let cmd = match parse_table_command(&input) {
            ParseResult::Command(cmd) => cmd,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        let event = match table.handle(cmd) {
            Ok(event) => event,
            Err(e) => {
                // rejected commands leave the table as it was
                ui::write_error(err, &e.to_string())?;
                continue;
            }
        };

        match event {
            TableEvent::ChipChanged(chip) => writeln!(out, "Chip: {}", chip)?,
            TableEvent::SlipCleared => writeln!(out, "Slip cleared")?,
            TableEvent::BetPlaced { kind, amount } => {
                writeln!(out, "Bet: {} {}", kind, format_amount(amount))?
            }
            TableEvent::StraightMode(on) => writeln!(
                out,
                "Straight mode: {} (number {})",
                if on { "on" } else { "off" },
                table.straight_number()
            )?,
            TableEvent::StraightNumber(p) => writeln!(out, "Straight number: {}", format_pocket(p))?,
            TableEvent::Ignored => {
                ui::display_warning(err, "straight mode is off; type 's' to select a number")?
            }
            TableEvent::SpinStarted { stake } => {
                writeln!(
                    out,
                    "Spinning... stake {} | Bankroll: {}",
                    format_amount(stake),
                    format_amount(table.visible_bankroll())
                )?;
                let result = table.finish_spin(FRAME_DT)?;
                write_result(&table, &result, out)?;
                if let SessionStatus::Terminated(reason) = result.status {
                    writeln!(out, "Session over: {}", reason)?;
                    break;
                }
            }
        }
    }

    writeln!(
        out,
        "Spins played: {} Final bankroll: {}",
        table.session().steps(),
        format_amount(table.session().bankroll())
    )?;
    Ok(())
}

fn write_status(table: &Table, out: &mut dyn Write) -> Result<(), CliError> {
    let straight = if table.straight_mode() {
        format!(" | straight {}", table.straight_number())
    } else {
        String::new()
    };
    writeln!(
        out,
        "Bankroll: {} | Chip: {} | Slip: {} | Total: {}{}",
        format_amount(table.visible_bankroll()),
        table.chip(),
        format_slip(table.slip()),
        format_amount(table.slip().total()),
        straight
    )?;
    Ok(())
}

fn write_result(table: &Table, result: &SpinResult, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Wheel: {}", format_wheel_window(table.motion(), WHEEL_WINDOW))?;
    writeln!(out, "Result: {}", format_pocket(result.pocket))?;
    writeln!(
        out,
        "Payout: {} Net: {} Bankroll: {}",
        format_amount(result.settlement.payout),
        format_net(result.settlement.net),
        format_amount(result.bankroll)
    )?;
    Ok(())
}
