//! headsup-holdem: heads-up Texas Hold'em rules engine
//!
//! Goals:
//! - Deterministic dealing and evaluation, driven by an injected RNG
//! - Small, well-documented public API
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use headsup_holdem::cards::{Card, Rank, Suit};
//! use headsup_holdem::evaluator::{evaluate_holdem, Category};
//! use headsup_holdem::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spade),
//!     Card::new(Rank::Ace, Suit::Heart),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Club),
//!     Card::new(Rank::Queen, Suit::Diamond),
//!     Card::new(Rank::Jack, Suit::Heart),
//!     Card::new(Rank::Three, Suit::Spade),
//!     Card::new(Rank::Two, Suit::Club),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::OnePair);
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use headsup_holdem::betting::{Action, Phase};
//! use headsup_holdem::config::GameConfig;
//! use headsup_holdem::game::Game;
//!
//! let mut game = Game::with_seed(GameConfig::default(), 42).unwrap();
//! game.start_hand().unwrap();
//! game.apply(Action::Raise(400)).unwrap();
//! game.apply(Action::Fold).unwrap();
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.phase, Phase::HandComplete);
//! assert_eq!(snap.players[1].stack, 3200);
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod snapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
