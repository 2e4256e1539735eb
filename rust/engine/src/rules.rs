use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Chips, Player, PlayerAction as A, CHIP_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Shortfall to the table bet
    Call(Chips),
    /// New round total `to`, of which `add` comes from the stack
    Raise { to: Chips, add: Chips },
    /// The whole remaining stack
    AllIn(Chips),
}

/// Validates a player action against the table bet and the player's stack.
///
/// # Arguments
///
/// * `player` - The acting player (current round stake and stack are read)
/// * `table_bet` - The highest stake committed by anyone this round
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - checking while behind the table bet
/// - [`GameError::InsufficientChips`] - calling or raising beyond the stack
/// - [`GameError::RaiseTooSmall`] - raising to a total that does not exceed the table bet
/// - [`GameError::NoChips`] - going all-in with an empty stack
///
/// # Examples
///
/// ```
/// use holdem_engine::player::{Player, PlayerAction};
/// use holdem_engine::rules::{validate_action, ValidatedAction};
///
/// let player = Player::new(1, "alice", 1_000);
/// let result = validate_action(&player, 200, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::Call(200)));
///
/// let result = validate_action(&player, 200, PlayerAction::Raise(600));
/// assert_eq!(result, Ok(ValidatedAction::Raise { to: 600, add: 600 }));
/// ```
pub fn validate_action(
    player: &Player,
    table_bet: Chips,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let stack = player.chips();
    let to_call = table_bet.saturating_sub(player.current_bet());
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => {
            if to_call > stack {
                Err(GameError::InsufficientChips {
                    needed: to_call,
                    available: stack,
                })
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Raise(to) => {
            if to <= table_bet {
                return Err(GameError::RaiseTooSmall {
                    amount: to,
                    current: table_bet,
                });
            }
            let add = to - player.current_bet();
            if add > stack {
                Err(GameError::InsufficientChips {
                    needed: add,
                    available: stack,
                })
            } else {
                Ok(ValidatedAction::Raise { to, add })
            }
        }
        A::AllIn => {
            if stack == 0 {
                Err(GameError::NoChips)
            } else {
                Ok(ValidatedAction::AllIn(stack))
            }
        }
    }
}

/// Blinds and buy-in range of a table limit tier, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLimit {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buyin: Chips,
    pub max_buyin: Chips,
}

/// Limit tiers with a fixed blind structure.
pub const KNOWN_TIERS: [u32; 3] = [100, 1_000, 10_000];

impl TableLimit {
    /// Blind structure for a tier; unknown tiers fall back to 1/2.
    ///
    /// ```
    /// use holdem_engine::rules::TableLimit;
    ///
    /// let limit = TableLimit::for_tier(100);
    /// assert_eq!((limit.small_blind, limit.big_blind), (10, 20));
    /// ```
    pub fn for_tier(tier: u32) -> Self {
        // (small blind, big blind, min buy-in, max buy-in) in minor units
        let (sb, bb, min, max) = match tier {
            100 => (10, 20, 10 * CHIP_SCALE, 100 * CHIP_SCALE),
            10_000 => (
                10 * CHIP_SCALE,
                20 * CHIP_SCALE,
                1_000 * CHIP_SCALE,
                10_000 * CHIP_SCALE,
            ),
            _ => (
                CHIP_SCALE,
                2 * CHIP_SCALE,
                100 * CHIP_SCALE,
                1_000 * CHIP_SCALE,
            ),
        };
        Self {
            small_blind: sb,
            big_blind: bb,
            min_buyin: min,
            max_buyin: max,
        }
    }
}
