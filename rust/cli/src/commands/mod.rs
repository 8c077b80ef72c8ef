//! Command handler modules for the Croupier CLI.
//!
//! Each command is implemented in its own module file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: output streams (`&mut dyn Write`) and stdin
//!   (`&mut dyn BufRead`) are passed as parameters
//! - Error propagation: all errors propagated via [`crate::CliError`]
//!
//! # Example
//!
//! ```rust
//! use croupier_cli::commands::handle_spin_command;
//!
//! let mut out = Vec::new();
//! handle_spin_command(Some(42), 3, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("seed=42"));
//! ```

mod cfg;
mod eval;
mod play;
mod spin;
mod train;

pub use cfg::handle_cfg_command;
pub use eval::{EvalArgs, handle_eval_command};
pub use play::handle_play_command;
pub use spin::handle_spin_command;
pub use train::{TrainArgs, handle_train_command};
