use serde::{Deserialize, Serialize};

use crate::bet::BetSlip;
use crate::wheel::Pocket;

/// Money movement for one spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Everything handed back to the player, winning stakes included
    pub payout: f64,
    /// Sum of all stakes on the slip
    pub total_stake: f64,
    /// `payout - total_stake`
    pub net: f64,
}

/// Settles `slip` against the winning `pocket`.
///
/// Winning even-money bets return twice their stake, a winning straight bet
/// returns 36 times its stake, and every losing stake is forfeited. An empty
/// or all-zero slip settles to zero.
///
/// ```
/// use croupier_engine::bet::{BetKind, BetSlip};
/// use croupier_engine::settle::settle;
/// use croupier_engine::wheel::Pocket;
///
/// let slip = BetSlip::from_stakes([(BetKind::Straight(Pocket::new(17).unwrap()), 10.0)]).unwrap();
/// let s = settle(Pocket::new(17).unwrap(), &slip);
/// assert_eq!(s.payout, 360.0);
/// assert_eq!(s.net, 350.0);
/// ```
pub fn settle(pocket: Pocket, slip: &BetSlip) -> Settlement {
    let mut payout = 0.0;
    for (kind, stake) in slip.iter() {
        if kind.wins(pocket) {
            payout += stake * kind.return_multiplier();
        }
    }
    let total_stake = slip.total();
    Settlement {
        payout,
        total_stake,
        net: payout - total_stake,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::{BetKind, EVEN_MONEY_KINDS};
    use crate::spin::SpinGenerator;

    fn p(n: u8) -> Pocket {
        Pocket::new(n).unwrap()
    }

    fn slip(stakes: &[(BetKind, f64)]) -> BetSlip {
        BetSlip::from_stakes(stakes.iter().copied()).unwrap()
    }

    #[test]
    fn straight_hit_and_miss() {
        let s = slip(&[(BetKind::Straight(p(17)), 10.0)]);
        let hit = settle(p(17), &s);
        assert_eq!((hit.payout, hit.net), (360.0, 350.0));
        let miss = settle(p(18), &s);
        assert_eq!((miss.payout, miss.net), (0.0, -10.0));
    }

    #[test]
    fn red_on_three_and_zero() {
        let s = slip(&[(BetKind::Red, 50.0)]);
        assert_eq!(settle(p(3), &s).payout, 100.0);
        assert_eq!(settle(Pocket::ZERO, &s).payout, 0.0);
        assert_eq!(settle(Pocket::ZERO, &s).net, -50.0);
    }

    #[test]
    fn straight_zero_pays_on_zero() {
        let s = slip(&[(BetKind::Straight(Pocket::ZERO), 1.0), (BetKind::Even, 1.0)]);
        let r = settle(Pocket::ZERO, &s);
        assert_eq!(r.payout, 36.0);
        assert_eq!(r.total_stake, 2.0);
    }

    #[test]
    fn empty_and_zero_slips_are_no_ops() {
        let empty = settle(p(5), &BetSlip::new());
        assert_eq!((empty.payout, empty.net, empty.total_stake), (0.0, 0.0, 0.0));
        let zeros = slip(&[(BetKind::Red, 0.0), (BetKind::Straight(p(5)), 0.0)]);
        let r = settle(p(5), &zeros);
        assert_eq!((r.payout, r.net), (0.0, 0.0));
    }

    #[test]
    fn mixed_slip_sums_each_winner() {
        // 32 is red, even, high
        let s = slip(&[
            (BetKind::Red, 10.0),
            (BetKind::Even, 10.0),
            (BetKind::Low, 10.0),
            (BetKind::Straight(p(32)), 1.0),
        ]);
        let r = settle(p(32), &s);
        assert_eq!(r.payout, 20.0 + 20.0 + 36.0);
        assert_eq!(r.net, 76.0 - 31.0);
    }

    #[test]
    fn mean_payout_matches_expectation_of_the_odds() {
        // Every kind returns 36 units across the 37 pockets per unit staked,
        // so the mean payout for a total stake S is 36/37 * S.
        let mut stakes: Vec<(BetKind, f64)> = EVEN_MONEY_KINDS.iter().map(|&k| (k, 5.0)).collect();
        for n in [7, 17, 23, 32] {
            stakes.push((BetKind::Straight(p(n)), 2.5));
        }
        let s = slip(&stakes);
        let total = s.total();

        let mut gen = SpinGenerator::new_with_seed(2024);
        let trials = 200_000;
        let mut sum = 0.0;
        for _ in 0..trials {
            sum += settle(gen.draw(), &s).payout;
        }
        let mean = sum / trials as f64;
        let expected = total * 36.0 / 37.0;
        assert!(
            (mean - expected).abs() < 0.02 * total,
            "mean {} vs expected {}",
            mean,
            expected
        );
    }
}
