//! Outcome sampler.
//!
//! Prints `count` pockets drawn from a seeded [`SpinGenerator`] along with a
//! color tally, which makes it easy to check that a seed reproduces the same
//! sequence.

use crate::config;
use crate::error::CliError;
use crate::formatters::{color_name, format_pocket};
use croupier_engine::spin::SpinGenerator;
use croupier_engine::wheel::Color;
use std::io::Write;

/// Handle the spin command.
///
/// The seed comes from `--seed`, then `CROUPIER_SEED`/the config file, then
/// entropy. The chosen seed is always printed so a run can be repeated.
pub fn handle_spin_command(
    seed: Option<u64>,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if count == 0 {
        return Err(CliError::InvalidInput("count must be >= 1".to_string()));
    }
    let seed = match seed {
        Some(s) => s,
        None => config::load()?.seed.unwrap_or_else(rand::random),
    };

    let mut spins = SpinGenerator::new_with_seed(seed);
    writeln!(out, "Spin sample: seed={} count={}", seed, count)?;

    let mut tally = [0usize; 3];
    for i in 1..=count {
        let pocket = spins.draw();
        tally[color_slot(pocket.color())] += 1;
        writeln!(out, "{:>4}: {}", i, format_pocket(pocket))?;
    }
    writeln!(
        out,
        "{}={} {}={} {}={}",
        color_name(Color::Red),
        tally[1],
        color_name(Color::Black),
        tally[2],
        color_name(Color::Green),
        tally[0]
    )?;
    tracing::info!(seed, count, "spin sample printed");
    Ok(())
}

fn color_slot(color: Color) -> usize {
    match color {
        Color::Green => 0,
        Color::Red => 1,
        Color::Black => 2,
    }
}
