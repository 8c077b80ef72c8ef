//! Interactive table state for the human-played game.
//!
//! All of the game's mutable state (session, slip under construction, chip
//! size, straight-number selector, wheel animation) lives in one [`Table`]
//! owned by the front end, so several tables can run side by side.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bet::{BetKind, BetSlip};
use crate::errors::GameError;
use crate::physics::WheelMotion;
use crate::session::{Session, SessionConfig, SpinResult};
use crate::spin::SpinGenerator;
use crate::wheel::Pocket;

pub const MIN_CHIP: u32 = 5;
pub const MAX_CHIP: u32 = 1_000;
pub const CHIP_STEP: u32 = 5;
pub const DEFAULT_CHIP: u32 = 10;
pub const DEFAULT_STRAIGHT_NUMBER: u8 = 17;
pub const TABLE_BANKROLL: f64 = 1_000.0;

/// Keeps the animation stream apart from the outcome stream.
const COSMETIC_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// One input from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCommand {
    ChipUp,
    ChipDown,
    ClearSlip,
    /// Add the current chip to an even-money kind
    Bet(BetKind),
    ToggleStraightMode,
    PrevStraight,
    NextStraight,
    /// Add the current chip on the selected straight number
    PlaceStraight,
    Spin,
}

/// What a command changed, for the front end to display.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    ChipChanged(u32),
    SlipCleared,
    BetPlaced { kind: BetKind, amount: f64 },
    StraightMode(bool),
    StraightNumber(Pocket),
    SpinStarted { stake: f64 },
    /// The command has no effect in the current state
    Ignored,
}

#[derive(Debug)]
pub struct Table {
    session: Session,
    spins: SpinGenerator,
    cosmetic: ChaCha8Rng,
    motion: WheelMotion,
    slip: BetSlip,
    committed: Option<BetSlip>,
    chip: u32,
    straight_mode: bool,
    straight_number: Pocket,
    last_result: Option<SpinResult>,
}

impl Table {
    /// A table with no target and no spin cap, starting from [`TABLE_BANKROLL`].
    pub fn default_config() -> SessionConfig {
        SessionConfig {
            initial_bankroll: TABLE_BANKROLL,
            bankrupt_threshold: 0.0,
            target_bankroll: None,
            max_steps: None,
        }
    }

    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, GameError> {
        Ok(Self {
            session: Session::new(config)?,
            spins: SpinGenerator::new_with_seed(seed),
            cosmetic: ChaCha8Rng::seed_from_u64(seed ^ COSMETIC_SEED_SALT),
            motion: WheelMotion::new(),
            slip: BetSlip::new(),
            committed: None,
            chip: DEFAULT_CHIP,
            straight_mode: false,
            straight_number: Pocket::new(DEFAULT_STRAIGHT_NUMBER)?,
            last_result: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
    pub fn motion(&self) -> &WheelMotion {
        &self.motion
    }
    pub fn slip(&self) -> &BetSlip {
        &self.slip
    }
    pub fn chip(&self) -> u32 {
        self.chip
    }
    pub fn straight_mode(&self) -> bool {
        self.straight_mode
    }
    pub fn straight_number(&self) -> Pocket {
        self.straight_number
    }
    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }
    pub fn is_spinning(&self) -> bool {
        self.committed.is_some()
    }

    /// Stake locked in by the spin in progress, or zero between spins.
    pub fn committed_stake(&self) -> f64 {
        self.committed.as_ref().map(BetSlip::total).unwrap_or(0.0)
    }

    /// Bankroll as shown to the player: the committed stake is off the table
    /// from launch until the spin settles.
    pub fn visible_bankroll(&self) -> f64 {
        self.session.bankroll() - self.committed_stake()
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && self.slip.total() > 0.0 && self.session.commit(&self.slip).is_ok()
    }

    pub fn handle(&mut self, cmd: TableCommand) -> Result<TableEvent, GameError> {
        match cmd {
            TableCommand::ChipUp => {
                self.chip = (self.chip + CHIP_STEP).min(MAX_CHIP);
                Ok(TableEvent::ChipChanged(self.chip))
            }
            TableCommand::ChipDown => {
                self.chip = self.chip.saturating_sub(CHIP_STEP).max(MIN_CHIP);
                Ok(TableEvent::ChipChanged(self.chip))
            }
            TableCommand::ClearSlip => {
                self.slip.clear();
                Ok(TableEvent::SlipCleared)
            }
            TableCommand::Bet(kind) => self.place(kind),
            TableCommand::ToggleStraightMode => {
                self.straight_mode = !self.straight_mode;
                Ok(TableEvent::StraightMode(self.straight_mode))
            }
            TableCommand::PrevStraight if self.straight_mode => {
                self.straight_number = self.straight_number.prev();
                Ok(TableEvent::StraightNumber(self.straight_number))
            }
            TableCommand::NextStraight if self.straight_mode => {
                self.straight_number = self.straight_number.next();
                Ok(TableEvent::StraightNumber(self.straight_number))
            }
            TableCommand::PlaceStraight if self.straight_mode => {
                self.place(BetKind::Straight(self.straight_number))
            }
            TableCommand::PrevStraight
            | TableCommand::NextStraight
            | TableCommand::PlaceStraight => Ok(TableEvent::Ignored),
            TableCommand::Spin => {
                let stake = self.launch_spin()?;
                Ok(TableEvent::SpinStarted { stake })
            }
        }
    }

    fn place(&mut self, kind: BetKind) -> Result<TableEvent, GameError> {
        let amount = f64::from(self.chip);
        self.slip.place(kind, amount)?;
        Ok(TableEvent::BetPlaced { kind, amount })
    }

    /// Lock in the current slip, draw the outcome, and start the animation.
    /// Returns the committed stake.
    pub fn launch_spin(&mut self) -> Result<f64, GameError> {
        if self.is_spinning() {
            return Err(GameError::SpinInProgress);
        }
        if self.slip.total() <= 0.0 {
            return Err(GameError::EmptyBetSlip);
        }
        let committed = self.session.commit(&self.slip)?;
        let stake = committed.total();

        let pocket = self.spins.draw();
        self.motion.launch(pocket, &mut self.cosmetic);
        self.slip.clear();
        self.committed = Some(committed);
        self.last_result = None;
        tracing::debug!(stake, "table spin launched");
        Ok(stake)
    }

    /// Advance the animation. Settles and returns the spin result on the tick
    /// the ball comes to rest.
    pub fn tick(&mut self, dt: f64) -> Result<Option<SpinResult>, GameError> {
        let Some(pocket) = self.motion.tick(dt) else {
            return Ok(None);
        };
        let slip = self.committed.take().unwrap_or_default();
        let result = self.session.apply(pocket, slip)?;
        self.last_result = Some(result.clone());
        Ok(Some(result))
    }

    /// Run the animation forward in `dt` steps until the spin settles.
    pub fn finish_spin(&mut self, dt: f64) -> Result<SpinResult, GameError> {
        if !self.is_spinning() {
            return Err(GameError::NoSpinInProgress);
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "animation step must be positive, got {}",
                dt
            )));
        }
        loop {
            if let Some(result) = self.tick(dt)? {
                return Ok(result);
            }
        }
    }

    /// Start a fresh session with the same configuration; the outcome stream
    /// continues.
    pub fn reset(&mut self) {
        self.session.reset();
        self.motion = WheelMotion::new();
        self.slip.clear();
        self.committed = None;
        self.last_result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStatus;

    fn table(seed: u64) -> Table {
        Table::new(Table::default_config(), seed).unwrap()
    }

    #[test]
    fn chip_is_bounded() {
        let mut t = table(1);
        for _ in 0..10 {
            t.handle(TableCommand::ChipDown).unwrap();
        }
        assert_eq!(t.chip(), MIN_CHIP);
        for _ in 0..300 {
            t.handle(TableCommand::ChipUp).unwrap();
        }
        assert_eq!(t.chip(), MAX_CHIP);
    }

    #[test]
    fn straight_selector_needs_mode() {
        let mut t = table(1);
        assert_eq!(
            t.handle(TableCommand::NextStraight).unwrap(),
            TableEvent::Ignored
        );
        assert_eq!(
            t.handle(TableCommand::PlaceStraight).unwrap(),
            TableEvent::Ignored
        );
        t.handle(TableCommand::ToggleStraightMode).unwrap();
        t.handle(TableCommand::NextStraight).unwrap();
        assert_eq!(t.straight_number().number(), 18);
        t.handle(TableCommand::PlaceStraight).unwrap();
        assert_eq!(
            t.slip().stake(BetKind::Straight(Pocket::new(18).unwrap())),
            10.0
        );
    }

    #[test]
    fn empty_slip_cannot_spin() {
        let mut t = table(1);
        assert!(!t.can_spin());
        assert_eq!(
            t.handle(TableCommand::Spin).unwrap_err(),
            GameError::EmptyBetSlip
        );
    }

    #[test]
    fn oversized_slip_cannot_spin() {
        let cfg = SessionConfig {
            initial_bankroll: 15.0,
            ..Table::default_config()
        };
        let mut t = Table::new(cfg, 1).unwrap();
        t.handle(TableCommand::Bet(BetKind::Red)).unwrap();
        t.handle(TableCommand::Bet(BetKind::Red)).unwrap();
        assert!(matches!(
            t.launch_spin(),
            Err(GameError::StakeExceedsBankroll { .. })
        ));
        assert_eq!(t.slip().total(), 20.0);
        assert!(!t.is_spinning());
    }

    #[test]
    fn spin_settles_through_the_session() {
        let mut t = table(42);
        t.handle(TableCommand::Bet(BetKind::Red)).unwrap();
        t.handle(TableCommand::Bet(BetKind::Odd)).unwrap();
        let stake = t.launch_spin().unwrap();
        assert_eq!(stake, 20.0);
        assert!(t.slip().is_empty());
        assert_eq!(t.session().bankroll(), TABLE_BANKROLL);
        assert_eq!(t.visible_bankroll(), TABLE_BANKROLL - 20.0);
        assert_eq!(t.launch_spin(), Err(GameError::SpinInProgress));

        let r = t.finish_spin(1.0 / 3.6).unwrap();
        assert_eq!(r.settlement.total_stake, 20.0);
        assert_eq!(r.bankroll, TABLE_BANKROLL + r.settlement.net);
        assert_eq!(t.motion().pocket_under_ball(), r.pocket);
        assert_eq!(t.session().steps(), 1);
        assert_eq!(t.session().status(), SessionStatus::Active);
        assert!(!t.is_spinning());
        assert_eq!(t.visible_bankroll(), r.bankroll);
    }

    #[test]
    fn outcomes_follow_the_seed() {
        let play = |seed| {
            let mut t = table(seed);
            (0..5)
                .map(|_| {
                    t.handle(TableCommand::Bet(BetKind::Black)).unwrap();
                    t.launch_spin().unwrap();
                    t.finish_spin(0.5).unwrap().pocket
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(play(99), play(99));

        let mut gen = SpinGenerator::new_with_seed(99);
        let direct: Vec<Pocket> = (0..5).map(|_| gen.draw()).collect();
        assert_eq!(play(99), direct);
    }

    #[test]
    fn bets_during_a_spin_wait_for_the_next_round() {
        let mut t = table(7);
        t.handle(TableCommand::Bet(BetKind::High)).unwrap();
        t.launch_spin().unwrap();
        t.handle(TableCommand::Bet(BetKind::Low)).unwrap();
        let r = t.finish_spin(0.5).unwrap();
        assert_eq!(r.slip.stake(BetKind::Low), 0.0);
        assert_eq!(t.slip().stake(BetKind::Low), 10.0);
    }
}
