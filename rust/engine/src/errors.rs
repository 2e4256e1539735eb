use thiserror::Error;

use crate::player::{Chips, PlayerId};

/// Every failure the engine reports. Precondition failures are detected
/// before any state is touched, so callers can retry with corrected input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Not enough players: at least 2 players with chips are required")]
    NotEnoughPlayers,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Player {0} is not seated at this table")]
    UnknownPlayer(PlayerId),
    #[error("Player {0} is already seated")]
    PlayerAlreadySeated(PlayerId),
    #[error("Table is full ({max_seats} seats)")]
    TableFull { max_seats: usize },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: PlayerId, actual: PlayerId },
    #[error("Player {0} cannot act (folded or all-in)")]
    PlayerCannotAct(PlayerId),
    #[error("Cannot check: {to_call} to call")]
    CannotCheck { to_call: Chips },
    #[error("Insufficient chips: need {needed}, have {available}")]
    InsufficientChips { needed: Chips, available: Chips },
    #[error("Raise to {amount} must exceed the current bet of {current}")]
    RaiseTooSmall { amount: Chips, current: Chips },
    #[error("Player has no chips left")]
    NoChips,
    #[error("Invalid amount: {0}")]
    InvalidAmount(Chips),
    #[error("Player {0} already folded")]
    AlreadyFolded(PlayerId),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Table state unavailable (lock poisoned)")]
    TableUnavailable,
}
