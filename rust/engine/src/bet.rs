use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::wheel::{Color, Half, Parity, Pocket};

/// Total return multiplier for a winning even-money bet (stake back plus 1:1).
pub const EVEN_MONEY_RETURN: f64 = 2.0;
/// Total return multiplier for a winning straight bet (stake back plus 35:1).
pub const STRAIGHT_RETURN: f64 = 36.0;

/// Relative slack allowed when comparing a committed stake to the bankroll,
/// so that a fraction-of-bankroll split that rounds up by one ulp is accepted.
pub const STAKE_TOLERANCE: f64 = 1e-9;

/// A kind of wager on the layout.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BetKind {
    Red,
    Black,
    Even,
    Odd,
    /// 1 through 18
    Low,
    /// 19 through 36
    High,
    /// A single pocket, zero included
    Straight(Pocket),
}

/// The six even-money kinds in their canonical order.
pub const EVEN_MONEY_KINDS: [BetKind; 6] = [
    BetKind::Red,
    BetKind::Black,
    BetKind::Even,
    BetKind::Odd,
    BetKind::Low,
    BetKind::High,
];

impl BetKind {
    pub fn is_even_money(self) -> bool {
        !matches!(self, BetKind::Straight(_))
    }

    /// Whether a ball landing in `pocket` wins this bet. Zero loses every
    /// even-money bet.
    pub fn wins(self, pocket: Pocket) -> bool {
        match self {
            BetKind::Red => pocket.color() == Color::Red,
            BetKind::Black => pocket.color() == Color::Black,
            BetKind::Even => pocket.parity() == Parity::Even,
            BetKind::Odd => pocket.parity() == Parity::Odd,
            BetKind::Low => pocket.half() == Half::Low,
            BetKind::High => pocket.half() == Half::High,
            BetKind::Straight(target) => target == pocket,
        }
    }

    /// Total amount returned per unit staked when this bet wins.
    pub fn return_multiplier(self) -> f64 {
        if self.is_even_money() {
            EVEN_MONEY_RETURN
        } else {
            STRAIGHT_RETURN
        }
    }
}

impl std::fmt::Display for BetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetKind::Red => write!(f, "RED"),
            BetKind::Black => write!(f, "BLACK"),
            BetKind::Even => write!(f, "EVEN"),
            BetKind::Odd => write!(f, "ODD"),
            BetKind::Low => write!(f, "LOW"),
            BetKind::High => write!(f, "HIGH"),
            BetKind::Straight(p) => write!(f, "STRAIGHT {}", p),
        }
    }
}

fn check_amount(amount: f64) -> Result<(), GameError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(GameError::InvalidStake { amount });
    }
    Ok(())
}

/// Stake per bet kind for one round.
///
/// Amounts are always finite and non-negative; placing on a kind that already
/// carries a stake adds to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<StakeEntry>", try_from = "Vec<StakeEntry>")]
pub struct BetSlip {
    stakes: BTreeMap<BetKind, f64>,
}

impl BetSlip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a slip from `(kind, amount)` pairs, rejecting the whole batch if
    /// any amount is invalid.
    pub fn from_stakes<I>(stakes: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (BetKind, f64)>,
    {
        let mut slip = BetSlip::new();
        for (kind, amount) in stakes {
            slip.place(kind, amount)?;
        }
        Ok(slip)
    }

    pub fn place(&mut self, kind: BetKind, amount: f64) -> Result<(), GameError> {
        check_amount(amount)?;
        *self.stakes.entry(kind).or_insert(0.0) += amount;
        Ok(())
    }

    pub fn stake(&self, kind: BetKind) -> f64 {
        self.stakes.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.stakes.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }

    pub fn clear(&mut self) {
        self.stakes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (BetKind, f64)> + '_ {
        self.stakes.iter().map(|(k, v)| (*k, *v))
    }

    /// Check every amount and that the total fits inside `bankroll`.
    pub fn validate_against(&self, bankroll: f64) -> Result<(), GameError> {
        for (_, amount) in self.iter() {
            check_amount(amount)?;
        }
        let stake = self.total();
        if stake > bankroll.max(0.0) * (1.0 + STAKE_TOLERANCE) {
            return Err(GameError::StakeExceedsBankroll { stake, bankroll });
        }
        Ok(())
    }
}

/// Serialized form of one slip line; JSON maps cannot key on `Straight(n)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeEntry {
    pub kind: BetKind,
    pub amount: f64,
}

impl From<BetSlip> for Vec<StakeEntry> {
    fn from(slip: BetSlip) -> Self {
        slip.iter()
            .map(|(kind, amount)| StakeEntry { kind, amount })
            .collect()
    }
}

impl TryFrom<Vec<StakeEntry>> for BetSlip {
    type Error = GameError;

    fn try_from(entries: Vec<StakeEntry>) -> Result<Self, Self::Error> {
        BetSlip::from_stakes(entries.into_iter().map(|e| (e.kind, e.amount)))
    }
}

/// Anything that can produce this round's bet slip from the current bankroll.
///
/// A player's hand-built slip ignores the bankroll; an agent's allocation
/// sizes its stake from it. Both feed the same settlement.
pub trait StakeSource {
    fn stake_slip(&self, bankroll: f64) -> Result<BetSlip, GameError>;
}

impl StakeSource for BetSlip {
    fn stake_slip(&self, _bankroll: f64) -> Result<BetSlip, GameError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u8) -> Pocket {
        Pocket::new(n).unwrap()
    }

    #[test]
    fn zero_loses_all_even_money() {
        for kind in EVEN_MONEY_KINDS {
            assert!(!kind.wins(Pocket::ZERO), "{} should lose on zero", kind);
        }
        assert!(BetKind::Straight(Pocket::ZERO).wins(Pocket::ZERO));
    }

    #[test]
    fn even_money_predicates() {
        assert!(BetKind::Red.wins(p(3)));
        assert!(BetKind::Black.wins(p(2)));
        assert!(BetKind::Even.wins(p(2)));
        assert!(BetKind::Odd.wins(p(3)));
        assert!(BetKind::Low.wins(p(18)));
        assert!(BetKind::High.wins(p(19)));
        assert!(!BetKind::Red.wins(p(2)));
    }

    #[test]
    fn place_accumulates() {
        let mut slip = BetSlip::new();
        slip.place(BetKind::Red, 10.0).unwrap();
        slip.place(BetKind::Red, 5.0).unwrap();
        slip.place(BetKind::Straight(p(17)), 2.5).unwrap();
        assert_eq!(slip.stake(BetKind::Red), 15.0);
        assert_eq!(slip.total(), 17.5);
    }

    #[test]
    fn negative_and_nan_rejected() {
        let mut slip = BetSlip::new();
        assert!(matches!(
            slip.place(BetKind::Odd, -1.0),
            Err(GameError::InvalidStake { .. })
        ));
        assert!(slip.place(BetKind::Odd, f64::NAN).is_err());
        assert!(slip.place(BetKind::Odd, f64::INFINITY).is_err());
        assert!(slip.is_empty());
    }

    #[test]
    fn from_stakes_rejects_whole_batch() {
        let r = BetSlip::from_stakes([(BetKind::Red, 10.0), (BetKind::Black, -3.0)]);
        assert!(r.is_err());
    }

    #[test]
    fn validate_against_bankroll() {
        let slip = BetSlip::from_stakes([(BetKind::Red, 60.0), (BetKind::Low, 40.0)]).unwrap();
        assert!(slip.validate_against(100.0).is_ok());
        assert!(matches!(
            slip.validate_against(99.0),
            Err(GameError::StakeExceedsBankroll { .. })
        ));
    }

    #[test]
    fn slip_serializes_as_entry_list() {
        let slip =
            BetSlip::from_stakes([(BetKind::Red, 1.0), (BetKind::Straight(p(0)), 2.0)]).unwrap();
        let json = serde_json::to_string(&slip).unwrap();
        assert!(json.contains("\"straight\":0"));
        let back: BetSlip = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slip);
        assert!(serde_json::from_str::<BetSlip>(r#"[{"kind":"red","amount":-1.0}]"#).is_err());
    }

    #[test]
    fn multipliers() {
        assert_eq!(BetKind::High.return_multiplier(), 2.0);
        assert_eq!(BetKind::Straight(p(7)).return_multiplier(), 36.0);
    }
}
