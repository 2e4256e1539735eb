//! # holdem-engine: Texas Hold'em Table Engine
//!
//! Rules engine for multi-player No-Limit Texas Hold'em cash tables
//! (2 to 9 seats). Owns the deck, betting rounds, pot settlement with side
//! pots, lifetime player stats and per-hand history. Transport, accounts
//! and persistence belong to the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded ChaCha20 deck shuffling and dealing
//! - [`player`] - Player state, actions and chip amounts
//! - [`hand`] - Hand evaluation and comparison
//! - [`rules`] - Action validation and blind structure per limit tier
//! - [`pot`] - Main pot and side pot construction
//! - [`table`] - The table state machine
//! - [`snapshot`] - Serializable table views
//! - [`admin`] - Operator mutations (force fold, chip management)
//! - [`history`] - Hand records and results
//! - [`shared`] - Thread-safe table handle
//! - [`errors`] - Error types for table operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, HandRank};
//!
//! let hole = parse_cards("Ah Kh").unwrap();
//! let board = parse_cards("Qh Jh Th 2c 3d").unwrap();
//!
//! let strength = evaluate(&hole, &board);
//! assert_eq!(strength.rank, HandRank::RoyalFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! Seeded tables deal reproducible hands:
//!
//! ```rust
//! use holdem_engine::player::PlayerAction;
//! use holdem_engine::table::{Table, TableConfig};
//!
//! let config = TableConfig { limit: 100, seed: Some(42), ..TableConfig::default() };
//! let mut table = Table::new(1, config);
//! table.seat_player(1, "alice", 5_000).unwrap();
//! table.seat_player(2, "bob", 5_000).unwrap();
//! table.start_hand().unwrap();
//!
//! let first = table.current_player().unwrap().id();
//! assert_eq!(first, 2);
//! table.make_action(first, PlayerAction::Call).unwrap();
//! ```

pub mod admin;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod history;
pub mod player;
pub mod pot;
pub mod rules;
pub mod shared;
pub mod snapshot;
pub mod table;

pub use errors::GameError;
pub use shared::SharedTable;
pub use table::{Table, TableConfig};
