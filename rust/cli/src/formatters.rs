//! Pocket, slip, and wheel formatters for terminal display.
//!
//! Pure functions over engine types. Color is shown with a Unicode disc
//! where the terminal supports it and with a letter otherwise.
//!
//! ## Example
//!
//! ```rust
//! use croupier_engine::wheel::Pocket;
//! use croupier_cli::formatters::format_pocket;
//!
//! let p = Pocket::new(32).unwrap();
//! assert!(format_pocket(p).starts_with("32 "));
//! assert!(format_pocket(p).ends_with("red"));
//! ```

use croupier_engine::bet::BetSlip;
use croupier_engine::physics::{WheelMotion, angle_wrap, pocket_segments};
use croupier_engine::wheel::{Color, POCKET_COUNT, Pocket, pocket_at_index};

/// Same detection as the rest of the CLI: modern Windows terminals and every
/// Unix-like terminal are assumed to render Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::Green => "green",
        Color::Red => "red",
        Color::Black => "black",
    }
}

fn color_marker(color: Color) -> &'static str {
    if supports_unicode() {
        match color {
            Color::Green => "🟢",
            Color::Red => "🔴",
            Color::Black => "⚫",
        }
    } else {
        match color {
            Color::Green => "G",
            Color::Red => "R",
            Color::Black => "B",
        }
    }
}

/// `"17 ⚫ black"` (or `"17 B black"` without Unicode).
pub fn format_pocket(pocket: Pocket) -> String {
    let color = pocket.color();
    format!(
        "{} {} {}",
        pocket.number(),
        color_marker(color),
        color_name(color)
    )
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Signed amount, `+12.00` / `-5.00`.
pub fn format_net(net: f64) -> String {
    format!("{:+.2}", net)
}

/// Non-zero stakes in slip order, e.g. `RED 10.00, STRAIGHT 17 5.00`.
pub fn format_slip(slip: &BetSlip) -> String {
    let parts: Vec<String> = slip
        .iter()
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(kind, amount)| format!("{} {}", kind, format_amount(amount)))
        .collect();
    if parts.is_empty() {
        "(empty)".to_string()
    } else {
        parts.join(", ")
    }
}

/// The pockets either side of the ball on the physical wheel, with the one
/// under the ball in brackets: `6 27 13 [36] 11 30 8`.
///
/// The ball's pocket is located from the segment layout at the wheel's
/// current rotation.
pub fn format_wheel_window(motion: &WheelMotion, radius: usize) -> String {
    let ball = angle_wrap(motion.ball_angle());
    let center = pocket_segments(motion.wheel_angle())
        .position(|seg| {
            let start = angle_wrap(seg.start);
            let rel = angle_wrap(ball - start);
            rel < seg.end - seg.start
        })
        .unwrap_or_else(|| motion.pocket_under_ball().wheel_index());

    let radius = radius.min(POCKET_COUNT / 2);
    (0..=2 * radius)
        .map(|k| {
            let idx = (center + POCKET_COUNT + k - radius) % POCKET_COUNT;
            let p = pocket_at_index(idx);
            if k == radius {
                format!("[{}]", p.number())
            } else {
                p.number().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_engine::bet::BetKind;

    #[test]
    fn pocket_shows_number_and_color() {
        let zero = format_pocket(Pocket::ZERO);
        assert!(zero.starts_with("0 "));
        assert!(zero.ends_with("green"));
        assert!(format_pocket(Pocket::new(17).unwrap()).ends_with("black"));
    }

    #[test]
    fn slip_lists_nonzero_stakes() {
        assert_eq!(format_slip(&BetSlip::new()), "(empty)");
        let slip = BetSlip::from_stakes([
            (BetKind::Red, 10.0),
            (BetKind::Straight(Pocket::new(17).unwrap()), 5.0),
        ])
        .unwrap();
        let s = format_slip(&slip);
        assert!(s.contains("RED 10.00"));
        assert!(s.contains("5.00"));
    }

    #[test]
    fn net_is_signed() {
        assert_eq!(format_net(12.0), "+12.00");
        assert_eq!(format_net(-5.5), "-5.50");
    }

    #[test]
    fn idle_wheel_window_agrees_with_ball() {
        let motion = WheelMotion::new();
        let window = format_wheel_window(&motion, 3);
        let under = motion.pocket_under_ball().number();
        assert!(window.contains(&format!("[{}]", under)));
        assert_eq!(window.split(' ').count(), 7);
    }
}
