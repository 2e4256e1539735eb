//! Direct table mutations for operators. Authorization is the caller's
//! job; every operation here is logged at `info`.

use chrono::Utc;
use tracing::info;

use crate::errors::GameError;
use crate::history::{ActionRecord, GameStage};
use crate::player::{Chips, PlayerAction, PlayerId};
use crate::rules::ValidatedAction;
use crate::table::{ActionOutcome, Table};

impl Table {
    /// Folds a live player regardless of whose turn it is. Folding the
    /// acting player passes the turn; folding the last opponent ends the
    /// hand.
    pub fn force_fold(&mut self, player_id: PlayerId) -> Result<ActionOutcome, GameError> {
        if !self.stage().is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        let seat = self
            .seat_of(player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        let player = &self.players()[seat];
        if !player.in_hand() {
            return Err(GameError::PlayerCannotAct(player_id));
        }
        if player.is_folded() {
            return Err(GameError::AlreadyFolded(player_id));
        }
        info!(table_id = self.id(), player_id, "admin force fold");

        if self.current_seat() == Some(seat) {
            return self.apply(seat, PlayerAction::Fold, ValidatedAction::Fold, false, Utc::now());
        }

        let stage = self.stage();
        let target = self.player_at_mut(seat);
        target.fold();
        let message = format!("{} was folded by an admin", target.name());
        self.record_action(ActionRecord {
            player_id,
            stage,
            action: PlayerAction::Fold,
            amount: 0,
            timed_out: false,
        });
        let hand_result = self.advance_turn(seat, false)?;
        Ok(ActionOutcome {
            message,
            hand_result,
        })
    }

    /// Credits a player's stack and returns the new balance.
    pub fn add_chips(&mut self, player_id: PlayerId, amount: Chips) -> Result<Chips, GameError> {
        let seat = self.editable_seat(player_id, amount)?;
        let player = self.player_at_mut(seat);
        player.add_chips(amount);
        let balance = player.chips();
        info!(table_id = self.id(), player_id, amount, balance, "admin added chips");
        Ok(balance)
    }

    /// Debits a player's stack; never overdraws.
    pub fn remove_chips(&mut self, player_id: PlayerId, amount: Chips) -> Result<Chips, GameError> {
        let seat = self.editable_seat(player_id, amount)?;
        let player = self.player_at_mut(seat);
        let available = player.chips();
        if !player.take_chips(amount) {
            return Err(GameError::InsufficientChips {
                needed: amount,
                available,
            });
        }
        let balance = player.chips();
        info!(table_id = self.id(), player_id, amount, balance, "admin removed chips");
        Ok(balance)
    }

    /// Overwrites a player's stack. Zero is allowed and sits the player out.
    pub fn set_chips(&mut self, player_id: PlayerId, amount: Chips) -> Result<Chips, GameError> {
        if self.stage() != GameStage::Waiting {
            return Err(GameError::HandInProgress);
        }
        let seat = self
            .seat_of(player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        let player = self.player_at_mut(seat);
        let previous = player.chips();
        player.set_chips(amount);
        info!(table_id = self.id(), player_id, previous, balance = amount, "admin set chips");
        Ok(amount)
    }

    /// Moves chips between two seated players. Both stacks are checked
    /// before either is touched.
    pub fn transfer_chips(
        &mut self,
        from: PlayerId,
        to: PlayerId,
        amount: Chips,
    ) -> Result<(), GameError> {
        let from_seat = self.editable_seat(from, amount)?;
        let to_seat = self.seat_of(to).ok_or(GameError::UnknownPlayer(to))?;
        if from_seat == to_seat {
            return Err(GameError::InvalidAmount(amount));
        }
        let available = self.players()[from_seat].chips();
        if available < amount {
            return Err(GameError::InsufficientChips {
                needed: amount,
                available,
            });
        }
        self.player_at_mut(from_seat).take_chips(amount);
        self.player_at_mut(to_seat).add_chips(amount);
        info!(table_id = self.id(), from, to, amount, "admin transferred chips");
        Ok(())
    }

    fn editable_seat(&self, player_id: PlayerId, amount: Chips) -> Result<usize, GameError> {
        if self.stage() != GameStage::Waiting {
            return Err(GameError::HandInProgress);
        }
        if amount == 0 {
            return Err(GameError::InvalidAmount(amount));
        }
        self.seat_of(player_id)
            .ok_or(GameError::UnknownPlayer(player_id))
    }
}

#[cfg(test)]
mod tests {
    use crate::table::TableConfig;

    use super::*;

    fn table() -> Table {
        let mut t = Table::new(1, TableConfig::default());
        t.seat_player(1, "alice", 1_000).unwrap();
        t.seat_player(2, "bob", 500).unwrap();
        t
    }

    #[test]
    fn zero_amounts_are_rejected() {
        let mut t = table();
        assert_eq!(t.add_chips(1, 0), Err(GameError::InvalidAmount(0)));
        assert_eq!(t.set_chips(1, 0), Ok(0));
    }

    #[test]
    fn transfer_to_self_is_rejected() {
        let mut t = table();
        assert_eq!(t.transfer_chips(1, 1, 10), Err(GameError::InvalidAmount(10)));
        assert_eq!(t.player(1).unwrap().chips(), 1_000);
    }
}
