use serde::Serialize;

use crate::cards::Card;
use crate::history::{GameStage, HandResult};
use crate::player::{Chips, Player, PlayerId, PlayerStats};
use crate::table::Table;

/// Read-only view of one seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub seat: usize,
    pub id: PlayerId,
    pub name: String,
    pub chips: Chips,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub in_hand: bool,
    pub is_turn: bool,
    /// Empty when hidden from the viewer
    pub hole_cards: Vec<Card>,
    pub stats: PlayerStats,
    pub win_rate: f64,
}

/// Serializable view of a table, detached from the live state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub table_id: u64,
    pub stage: GameStage,
    pub hand_number: u64,
    pub pot: Chips,
    pub current_bet: Chips,
    pub community_cards: Vec<Card>,
    pub dealer_position: usize,
    pub acting_seat: Option<usize>,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub players: Vec<PlayerSnapshot>,
    pub last_result: Option<HandResult>,
}

impl Table {
    /// Full view, every hole card visible.
    pub fn snapshot(&self) -> TableSnapshot {
        self.build_snapshot(|_| true)
    }

    /// View for one seat: only `viewer`'s own hole cards are shown.
    pub fn snapshot_for(&self, viewer: PlayerId) -> TableSnapshot {
        self.build_snapshot(|p| p.id() == viewer)
    }

    fn build_snapshot(&self, show_cards: impl Fn(&Player) -> bool) -> TableSnapshot {
        let acting_seat = self.current_seat();
        let players = self
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerSnapshot {
                seat,
                id: p.id(),
                name: p.name().to_string(),
                chips: p.chips(),
                current_bet: p.current_bet(),
                total_bet: p.total_bet(),
                folded: p.is_folded(),
                all_in: p.is_all_in(),
                in_hand: p.in_hand(),
                is_turn: acting_seat == Some(seat),
                hole_cards: if show_cards(p) {
                    p.hole_cards().to_vec()
                } else {
                    Vec::new()
                },
                stats: p.stats(),
                win_rate: p.win_rate(),
            })
            .collect();
        let limit = self.limit();
        TableSnapshot {
            table_id: self.id(),
            stage: self.stage(),
            hand_number: self.hands_started(),
            pot: self.pot(),
            current_bet: self.current_bet(),
            community_cards: self.community_cards().to_vec(),
            dealer_position: self.dealer_position(),
            acting_seat,
            small_blind: limit.small_blind,
            big_blind: limit.big_blind,
            players,
            last_result: self.last_result().cloned(),
        }
    }
}
