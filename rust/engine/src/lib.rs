//! # croupier-engine: European Roulette Core
//!
//! A deterministic single-zero roulette simulation shared by an interactive
//! table and a reinforcement-learning environment. Every outcome comes from a
//! seeded generator, so runs are reproducible for scientific comparison and
//! debugging.
//!
//! ## Core Modules
//!
//! - [`wheel`] - Pocket newtype, colors, parity, halves and the wheel order
//! - [`spin`] - Seeded uniform pocket draws (ChaCha20)
//! - [`bet`] - Bet kinds, bet slips and the [`bet::StakeSource`] seam
//! - [`settle`] - Payout calculation, the single source of money movement
//! - [`session`] - Bankroll and termination state machine
//! - [`physics`] - Cosmetic wheel and ball motion, pocket geometry
//! - [`table`] - Interactive table state for human play
//! - [`env`] - RL environment adapter (logits in, reward out)
//! - [`episode`] - Episode summaries and batch statistics
//! - [`errors`] - Error types for game and environment operations
//!
//! ## Quick Start
//!
//! ```rust
//! use croupier_engine::bet::{BetKind, BetSlip};
//! use croupier_engine::settle::settle;
//! use croupier_engine::wheel::Pocket;
//!
//! let p17 = Pocket::new(17).unwrap();
//! let slip = BetSlip::from_stakes([(BetKind::Straight(p17), 10.0)]).unwrap();
//! let s = settle(p17, &slip);
//! assert_eq!(s.payout, 360.0);
//! assert_eq!(s.net, 350.0);
//! ```
//!
//! ## Deterministic Spins
//!
//! ```rust
//! use croupier_engine::spin::SpinGenerator;
//!
//! let mut a = SpinGenerator::new_with_seed(42);
//! let mut b = SpinGenerator::new_with_seed(42);
//! assert_eq!(a.draw(), b.draw());
//! ```
//!
//! ## Environment
//!
//! ```rust
//! use croupier_engine::env::{EnvConfig, RouletteEnv, ACTION_DIM};
//!
//! let mut env = RouletteEnv::new(EnvConfig { seed: Some(7), ..EnvConfig::default() }).unwrap();
//! let obs = env.reset(None);
//! assert_eq!(obs.bankroll_ratio(), 1.0);
//! let out = env.step(&[0.0; ACTION_DIM]).unwrap();
//! assert!((out.info.stake - 10.0).abs() < 1e-9);
//! ```

pub mod bet;
pub mod env;
pub mod episode;
pub mod errors;
pub mod physics;
pub mod session;
pub mod settle;
pub mod spin;
pub mod table;
pub mod wheel;
