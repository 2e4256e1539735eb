use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Chip amounts in minor units (1/100 of a chip).
pub type Chips = u64;

/// Stable identity of a seated player, assigned by the caller.
pub type PlayerId = u64;

/// Minor units per whole chip.
pub const CHIP_SCALE: Chips = 100;

/// Renders minor units as whole chips: `150` -> `"1.50"`, `200` -> `"2"`.
pub fn format_chips(amount: Chips) -> String {
    let whole = amount / CHIP_SCALE;
    let frac = amount % CHIP_SCALE;
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{}.{:02}", whole, frac)
    }
}

/// Represents a player action during a betting round.
/// `Raise` carries the new total stake for the round, not the increment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when the player already matches the table bet)
    Check,
    /// Call the current bet
    Call,
    /// Raise the round's stake to the given total
    Raise(Chips),
    /// Bet all remaining chips
    AllIn,
}

/// Lifetime counters kept across hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hands_played: u32,
    pub hands_won: u32,
    pub biggest_win: Chips,
}

/// A seated player: stack, per-round and per-hand commitments, hole cards
/// and fold/all-in flags.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    chips: Chips,
    hole: Vec<Card>,
    /// Committed during the current betting round
    current_bet: Chips,
    /// Committed during the whole hand (side pot accounting)
    total_bet: Chips,
    folded: bool,
    all_in: bool,
    /// Dealt into the hand in progress
    in_hand: bool,
    /// Has acted since the last bet or raise of this round
    pub(crate) acted: bool,
    stats: PlayerStats,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, chips: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            hole: Vec::with_capacity(2),
            current_bet: 0,
            total_bet: 0,
            folded: false,
            all_in: false,
            in_hand: false,
            acted: false,
            stats: PlayerStats::default(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> Chips {
        self.chips
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn total_bet(&self) -> Chips {
        self.total_bet
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn in_hand(&self) -> bool {
        self.in_hand
    }
    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }

    /// Win rate in percent, 0 before the first hand.
    pub fn win_rate(&self) -> f64 {
        if self.stats.hands_played == 0 {
            0.0
        } else {
            self.stats.hands_won as f64 / self.stats.hands_played as f64 * 100.0
        }
    }

    /// Folded or all-in players are skipped when prompting for action.
    pub fn can_act(&self) -> bool {
        self.in_hand && !(self.folded || self.all_in)
    }

    /// Still contesting the pot.
    pub fn is_live(&self) -> bool {
        self.in_hand && !self.folded
    }

    /// Clears per-hand state. Players without chips sit the hand out.
    pub(crate) fn reset_hand(&mut self) {
        self.hole.clear();
        self.current_bet = 0;
        self.total_bet = 0;
        self.folded = false;
        self.all_in = false;
        self.acted = false;
        self.in_hand = self.chips > 0;
    }

    pub(crate) fn reset_round(&mut self) {
        self.current_bet = 0;
        self.acted = false;
    }

    pub(crate) fn give_card(&mut self, c: Card) {
        self.hole.push(c);
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }

    /// Moves up to `amount` from the stack into this round's stake and
    /// returns what was actually committed. Emptying the stack marks the
    /// player all-in.
    pub(crate) fn bet(&mut self, amount: Chips) -> Chips {
        let actual = amount.min(self.chips);
        self.chips -= actual;
        self.current_bet += actual;
        self.total_bet += actual;
        if self.chips == 0 && self.in_hand {
            self.all_in = true;
        }
        actual
    }

    pub(crate) fn add_chips(&mut self, amount: Chips) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub(crate) fn take_chips(&mut self, amount: Chips) -> bool {
        match self.chips.checked_sub(amount) {
            Some(left) => {
                self.chips = left;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_chips(&mut self, amount: Chips) {
        self.chips = amount;
    }

    pub(crate) fn record_hand(&mut self, won: Option<Chips>) {
        self.stats.hands_played += 1;
        if let Some(amount) = won {
            self.stats.hands_won += 1;
            self.stats.biggest_win = self.stats.biggest_win.max(amount);
        }
    }
}
