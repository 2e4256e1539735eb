use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandStrength;
use crate::player::{Chips, PlayerAction, PlayerId};
use crate::pot::Pot;

/// Stages of a hand, in the order they are played.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStage {
    /// No hand in progress
    Waiting,
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Hands revealed and pots settled
    Showdown,
}

impl GameStage {
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            GameStage::Preflop | GameStage::Flop | GameStage::Turn | GameStage::River
        )
    }
}

/// Records a single accepted action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    /// The betting stage when this action occurred
    pub stage: GameStage,
    pub action: PlayerAction,
    /// Chips moved into the pot by this action
    pub amount: Chips,
    /// Set when the table auto-folded the player on timeout
    #[serde(default)]
    pub timed_out: bool,
}

/// Chips awarded to one player at settlement.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: Chips,
    /// Hand that won at showdown; `None` when everyone else folded
    pub hand: Option<HandStrength>,
}

/// Outcome of a finished hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub payouts: Vec<Payout>,
    pub pots: Vec<Pot>,
    /// False when the hand ended because all but one player folded
    pub showdown: bool,
    /// Every live hand shown at showdown
    #[serde(default)]
    pub shown: Vec<(PlayerId, HandStrength)>,
}

impl HandResult {
    pub fn winners(&self) -> Vec<PlayerId> {
        self.payouts.iter().map(|p| p.player_id).collect()
    }

    pub fn total_paid(&self) -> Chips {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}

/// Complete record of a hand: actions, board and outcome.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Sequence number of the hand at its table, starting at 1
    pub hand_number: u64,
    pub started_at: DateTime<Utc>,
    pub dealer_seat: usize,
    /// Chronological list of all accepted actions
    pub actions: Vec<ActionRecord>,
    /// Community cards (up to 5)
    pub board: Vec<Card>,
    pub result: Option<HandResult>,
}

impl HandRecord {
    pub(crate) fn new(hand_number: u64, dealer_seat: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            hand_number,
            started_at,
            dealer_seat,
            actions: Vec::new(),
            board: Vec::with_capacity(5),
            result: None,
        }
    }
}
