//! Configuration command handler.
//!
//! Displays the resolved configuration with the source of every value
//! (default, file, or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "bankroll": {
//!     "value": 100.0,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 7,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::display_warning(err, "configuration could not be resolved")?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "bankroll": {
            "value": config.bankroll,
            "source": sources.bankroll,
        },
        "bet_fraction": {
            "value": config.bet_fraction,
            "source": sources.bet_fraction,
        },
        "max_steps": {
            "value": config.max_steps,
            "source": sources.max_steps,
        },
        "target_bankroll": {
            "value": config.target_bankroll,
            "source": sources.target_bankroll,
        },
        "bankrupt_threshold": {
            "value": config.bankrupt_threshold,
            "source": sources.bankrupt_threshold,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
