//! Input parsing for the interactive table.
//!
//! Each line typed at the table maps to one [`TableCommand`]. Keys follow the
//! layout of the betting board: digits 1-6 for the even-money bets, arrows
//! (as `<`/`>`) for the straight selector.

use croupier_engine::bet::BetKind;
use croupier_engine::table::TableCommand;

/// Result type for parsing user input at the table.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid table command parsed from input
    Command(TableCommand),
    /// User entered a quit command
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const HELP: &str = "Commands: 1/red 2/black 3/even 4/odd 5/low 6/high, \
up/+ down/- (chip), c/clear, s/straight, </prev >/next, p/place, spin, q/quit";

/// Parse user input string into a table command.
///
/// Input is case-insensitive and only the first word counts.
///
/// # Example
///
/// ```rust
/// # use croupier_cli::validation::{parse_table_command, ParseResult};
/// use croupier_engine::bet::BetKind;
/// use croupier_engine::table::TableCommand;
///
/// assert_eq!(
///     parse_table_command("RED"),
///     ParseResult::Command(TableCommand::Bet(BetKind::Red))
/// );
/// assert_eq!(parse_table_command("q"), ParseResult::Quit);
///
/// match parse_table_command("split 5") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_table_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let Some(word) = input.split_whitespace().next() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    let cmd = match word {
        "q" | "quit" | "esc" | "exit" => return ParseResult::Quit,
        "1" | "red" => TableCommand::Bet(BetKind::Red),
        "2" | "black" => TableCommand::Bet(BetKind::Black),
        "3" | "even" => TableCommand::Bet(BetKind::Even),
        "4" | "odd" => TableCommand::Bet(BetKind::Odd),
        "5" | "low" => TableCommand::Bet(BetKind::Low),
        "6" | "high" => TableCommand::Bet(BetKind::High),
        "up" | "u" | "+" => TableCommand::ChipUp,
        "down" | "d" | "-" => TableCommand::ChipDown,
        "c" | "clear" => TableCommand::ClearSlip,
        "s" | "straight" => TableCommand::ToggleStraightMode,
        "<" | "left" | "prev" => TableCommand::PrevStraight,
        ">" | "right" | "next" => TableCommand::NextStraight,
        "p" | "place" | "enter" => TableCommand::PlaceStraight,
        "spin" | "space" => TableCommand::Spin,
        other => {
            return ParseResult::Invalid(format!("Unrecognized command '{}'. {}", other, HELP));
        }
    };
    ParseResult::Command(cmd)
}
