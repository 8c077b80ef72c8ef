use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Number of pockets on a European wheel (0 through 36).
pub const POCKET_COUNT: usize = 37;

/// Physical pocket order, clockwise when viewed from above, starting at zero.
pub const WHEEL_ORDER: [u8; POCKET_COUNT] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// The eighteen red pockets.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Pocket color. Zero is the only green pocket.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// The zero pocket
    Green,
    /// One of [`RED_NUMBERS`]
    Red,
    /// Any other non-zero pocket
    Black,
}

/// Pocket parity. Zero has no parity for betting purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Pocket half. Zero belongs to neither half.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    None,
    /// 1 through 18
    Low,
    /// 19 through 36
    High,
}

/// A single wheel pocket, guaranteed to be in `0..=36`.
///
/// ```
/// use croupier_engine::wheel::{Color, Pocket};
///
/// let p = Pocket::new(3).unwrap();
/// assert_eq!(p.color(), Color::Red);
/// assert!(Pocket::new(37).is_err());
/// ```
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Pocket(u8);

impl Pocket {
    pub const ZERO: Pocket = Pocket(0);

    pub fn new(n: u8) -> Result<Self, GameError> {
        if (n as usize) < POCKET_COUNT {
            Ok(Pocket(n))
        } else {
            Err(GameError::InvalidPocket(n))
        }
    }

    /// For compile-time tables of known-good pockets.
    pub(crate) const fn from_table(n: u8) -> Pocket {
        Pocket(n % POCKET_COUNT as u8)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn color(self) -> Color {
        if self.0 == 0 {
            Color::Green
        } else if RED_NUMBERS.contains(&self.0) {
            Color::Red
        } else {
            Color::Black
        }
    }

    pub fn parity(self) -> Parity {
        match self.0 {
            0 => Parity::None,
            n if n % 2 == 0 => Parity::Even,
            _ => Parity::Odd,
        }
    }

    pub fn half(self) -> Half {
        match self.0 {
            0 => Half::None,
            1..=18 => Half::Low,
            _ => Half::High,
        }
    }

    /// Index of this pocket in [`WHEEL_ORDER`].
    pub fn wheel_index(self) -> usize {
        WHEEL_ORDER
            .iter()
            .position(|&n| n == self.0)
            .unwrap_or_default()
    }

    /// Previous number on the betting layout, wrapping 0 -> 36.
    pub fn prev(self) -> Pocket {
        if self.0 == 0 {
            Pocket(36)
        } else {
            Pocket(self.0 - 1)
        }
    }

    /// Next number on the betting layout, wrapping 36 -> 0.
    pub fn next(self) -> Pocket {
        if self.0 == 36 {
            Pocket(0)
        } else {
            Pocket(self.0 + 1)
        }
    }
}

impl TryFrom<u8> for Pocket {
    type Error = GameError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Pocket::new(n)
    }
}

impl From<Pocket> for u8 {
    fn from(p: Pocket) -> u8 {
        p.0
    }
}

impl std::fmt::Display for Pocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pocket sitting at `index` of the physical layout (taken modulo 37).
pub fn pocket_at_index(index: usize) -> Pocket {
    Pocket(WHEEL_ORDER[index % POCKET_COUNT])
}

pub fn all_pockets() -> impl Iterator<Item = Pocket> {
    (0..POCKET_COUNT as u8).map(Pocket)
}
