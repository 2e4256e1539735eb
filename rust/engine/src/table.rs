use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{evaluate, HandStrength};
use crate::history::{ActionRecord, GameStage, HandRecord, HandResult, Payout};
use crate::player::{format_chips, Chips, Player, PlayerAction, PlayerId};
use crate::pot::{build_pots, split_evenly, Contribution, Pot};
use crate::rules::{validate_action, TableLimit, ValidatedAction};

/// Seconds the acting player may stay idle before being auto-folded.
pub const DEFAULT_ACTION_TIMEOUT_SECS: u64 = 60;

/// Seats per table; 9 players use at most 18 + 5 + 3 cards of the deck.
pub const MAX_SEATS: usize = 9;

/// Table settings fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Limit tier selecting the blind structure (see [`TableLimit::for_tier`])
    pub limit: u32,
    pub action_timeout_secs: u64,
    /// Seat cap, at most [`MAX_SEATS`]
    pub max_seats: usize,
    /// Deck seed; `None` seeds from the thread RNG
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            limit: 1_000,
            action_timeout_secs: DEFAULT_ACTION_TIMEOUT_SECS,
            max_seats: MAX_SEATS,
            seed: None,
        }
    }
}

/// Result of an accepted action. `hand_result` is set when the action
/// finished the hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: String,
    pub hand_result: Option<HandResult>,
}

/// One poker table: seats, deck, pot and the betting state machine for
/// the hand in progress.
///
/// # Examples
///
/// ```
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::table::{Table, TableConfig};
///
/// let mut table = Table::new(1, TableConfig { seed: Some(7), ..TableConfig::default() });
/// table.seat_player(10, "alice", 100_000).unwrap();
/// table.seat_player(20, "bob", 100_000).unwrap();
/// table.start_hand().unwrap();
///
/// let acting = table.current_player().unwrap().id();
/// let outcome = table.make_action(acting, PlayerAction::Fold).unwrap();
/// assert!(outcome.hand_result.is_some());
/// ```
#[derive(Debug)]
pub struct Table {
    id: u64,
    config: TableConfig,
    limit: TableLimit,
    deck: Deck,
    players: Vec<Player>,
    community_cards: Vec<Card>,
    pot: Chips,
    /// Highest stake committed this betting round
    current_bet: Chips,
    stage: GameStage,
    dealer_position: usize,
    current_player_index: usize,
    last_action_time: DateTime<Utc>,
    hands_started: u64,
    current_hand: Option<HandRecord>,
    last_hand: Option<HandRecord>,
}

impl Table {
    /// Creates an empty table. `max_seats` is capped at [`MAX_SEATS`] so a
    /// full table can always be dealt to the river from one deck.
    pub fn new(id: u64, mut config: TableConfig) -> Self {
        config.max_seats = config.max_seats.min(MAX_SEATS);
        let limit = TableLimit::for_tier(config.limit);
        let deck = Deck::new(config.seed);
        Self {
            id,
            config,
            limit,
            deck,
            players: Vec::new(),
            community_cards: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            stage: GameStage::Waiting,
            dealer_position: 0,
            current_player_index: 0,
            last_action_time: Utc::now(),
            hands_started: 0,
            current_hand: None,
            last_hand: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn limit(&self) -> TableLimit {
        self.limit
    }
    pub fn stage(&self) -> GameStage {
        self.stage
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn dealer_position(&self) -> usize {
        self.dealer_position
    }
    pub fn last_action_time(&self) -> DateTime<Utc> {
        self.last_action_time
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn hands_started(&self) -> u64 {
        self.hands_started
    }

    /// Record of the hand in progress.
    pub fn current_hand(&self) -> Option<&HandRecord> {
        self.current_hand.as_ref()
    }

    /// Record of the most recently finished hand.
    pub fn last_hand(&self) -> Option<&HandRecord> {
        self.last_hand.as_ref()
    }

    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_hand.as_ref().and_then(|h| h.result.as_ref())
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    /// Seat index of the player to act, while a betting round is open.
    pub fn current_seat(&self) -> Option<usize> {
        self.stage.is_betting().then_some(self.current_player_index)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_seat().map(|i| &self.players[i])
    }

    pub fn seat_player(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
        chips: Chips,
    ) -> Result<usize, GameError> {
        if self.stage != GameStage::Waiting {
            return Err(GameError::HandInProgress);
        }
        if self.seat_of(id).is_some() {
            return Err(GameError::PlayerAlreadySeated(id));
        }
        if self.players.len() >= self.config.max_seats {
            return Err(GameError::TableFull {
                max_seats: self.config.max_seats,
            });
        }
        let player = Player::new(id, name, chips);
        info!(table_id = self.id, player_id = id, name = player.name(), chips, "player seated");
        self.players.push(player);
        Ok(self.players.len() - 1)
    }

    pub fn unseat_player(&mut self, id: PlayerId) -> Result<Player, GameError> {
        if self.stage != GameStage::Waiting {
            return Err(GameError::HandInProgress);
        }
        let seat = self.seat_of(id).ok_or(GameError::UnknownPlayer(id))?;
        let player = self.players.remove(seat);
        if seat < self.dealer_position {
            self.dealer_position -= 1;
        }
        if self.dealer_position >= self.players.len() {
            self.dealer_position = 0;
        }
        info!(table_id = self.id, player_id = id, "player left");
        Ok(player)
    }

    /// Starts a new hand: shuffles, deals two hole cards to everyone with
    /// chips, posts the blinds and hands the action to the first seat after
    /// the big blind.
    pub fn start_hand(&mut self) -> Result<String, GameError> {
        if self.stage != GameStage::Waiting {
            return Err(GameError::HandInProgress);
        }
        if self.players.iter().filter(|p| p.chips() > 0).count() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        self.deck.reset();
        self.community_cards.clear();
        self.pot = 0;
        for p in &mut self.players {
            p.reset_hand();
        }

        let n = self.players.len();
        for _ in 0..2 {
            for offset in 1..=n {
                let seat = (self.dealer_position + offset) % n;
                if self.players[seat].in_hand() {
                    let card = self.deck.draw()?;
                    self.players[seat].give_card(card);
                }
            }
        }

        let now = Utc::now();
        self.hands_started += 1;
        self.current_hand = Some(HandRecord::new(
            self.hands_started,
            self.dealer_position,
            now,
        ));
        self.stage = GameStage::Preflop;
        self.last_action_time = now;

        let sb_seat = self.next_in_hand_after(self.dealer_position);
        let bb_seat = self.next_in_hand_after(sb_seat);
        self.pot += self.players[sb_seat].bet(self.limit.small_blind);
        self.pot += self.players[bb_seat].bet(self.limit.big_blind);
        self.current_bet = self.limit.big_blind;

        info!(
            table_id = self.id,
            hand = self.hands_started,
            dealer = self.dealer_position,
            small_blind = self.players[sb_seat].id(),
            big_blind = self.players[bb_seat].id(),
            "hand started"
        );

        // blinds can put everyone all-in before anybody acts
        self.current_player_index = bb_seat;
        self.advance_turn(bb_seat, true)?;

        Ok(format!(
            "Hand #{} started: blinds {}/{}",
            self.hands_started,
            format_chips(self.limit.small_blind),
            format_chips(self.limit.big_blind)
        ))
    }

    /// Applies an action for `player_id`. Rejected actions leave the table
    /// untouched.
    pub fn make_action(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<ActionOutcome, GameError> {
        if !self.stage.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        let seat = self
            .seat_of(player_id)
            .ok_or(GameError::UnknownPlayer(player_id))?;
        if seat != self.current_player_index {
            return Err(GameError::NotPlayersTurn {
                expected: self.players[self.current_player_index].id(),
                actual: player_id,
            });
        }
        if !self.players[seat].can_act() {
            return Err(GameError::PlayerCannotAct(player_id));
        }
        let validated = validate_action(&self.players[seat], self.current_bet, action)?;
        self.apply(seat, action, validated, false, Utc::now())
    }

    /// Auto-folds the acting player once they have been idle longer than
    /// the configured timeout. Returns `Ok(None)` when nothing was due.
    pub fn check_timeouts(&mut self) -> Result<Option<ActionOutcome>, GameError> {
        self.check_timeouts_at(Utc::now())
    }

    pub fn check_timeouts_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Option<ActionOutcome>, GameError> {
        if !self.stage.is_betting() {
            return Ok(None);
        }
        let timeout = i64::try_from(self.config.action_timeout_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        if now - self.last_action_time <= timeout {
            return Ok(None);
        }
        let seat = self.current_player_index;
        if !self.players[seat].can_act() {
            return Ok(None);
        }
        warn!(
            table_id = self.id,
            player_id = self.players[seat].id(),
            idle_secs = (now - self.last_action_time).num_seconds(),
            "action timed out, folding"
        );
        self.apply(seat, PlayerAction::Fold, ValidatedAction::Fold, true, now)
            .map(Some)
    }

    pub(crate) fn apply(
        &mut self,
        seat: usize,
        action: PlayerAction,
        validated: ValidatedAction,
        timed_out: bool,
        now: DateTime<Utc>,
    ) -> Result<ActionOutcome, GameError> {
        let name = self.players[seat].name().to_string();
        let (moved, message) = match validated {
            ValidatedAction::Fold => {
                self.players[seat].fold();
                (0, format!("{} folds", name))
            }
            ValidatedAction::Check => (0, format!("{} checks", name)),
            ValidatedAction::Call(amount) => {
                let moved = self.players[seat].bet(amount);
                (moved, format!("{} calls {}", name, format_chips(moved)))
            }
            ValidatedAction::Raise { to, add } => {
                let moved = self.players[seat].bet(add);
                self.current_bet = to;
                self.reopen_action(seat);
                (moved, format!("{} raises to {}", name, format_chips(to)))
            }
            ValidatedAction::AllIn(amount) => {
                let moved = self.players[seat].bet(amount);
                let committed = self.players[seat].current_bet();
                if committed > self.current_bet {
                    self.current_bet = committed;
                    self.reopen_action(seat);
                }
                (moved, format!("{} is all-in for {}", name, format_chips(moved)))
            }
        };
        self.pot += moved;
        self.players[seat].acted = true;
        self.last_action_time = now;

        let player_id = self.players[seat].id();
        debug!(
            table_id = self.id,
            player_id,
            stage = ?self.stage,
            ?action,
            amount = moved,
            pot = self.pot,
            "action applied"
        );
        if let Some(hand) = self.current_hand.as_mut() {
            hand.actions.push(ActionRecord {
                player_id,
                stage: self.stage,
                action,
                amount: moved,
                timed_out,
            });
        }

        let hand_result = self.advance_turn(seat, true)?;
        Ok(ActionOutcome {
            message,
            hand_result,
        })
    }

    /// A bet or raise gives everyone else still in the round another turn.
    fn reopen_action(&mut self, raiser: usize) {
        for (i, p) in self.players.iter_mut().enumerate() {
            if i != raiser {
                p.acted = false;
            }
        }
    }

    /// Moves the hand on after a change at `from`: ends it when at most one
    /// player is left, closes the round when everyone able to act has acted
    /// and matched the bet, otherwise (when `pass_turn` is set) gives the
    /// action to the next seat able to act.
    pub(crate) fn advance_turn(
        &mut self,
        from: usize,
        pass_turn: bool,
    ) -> Result<Option<HandResult>, GameError> {
        if self.players.iter().filter(|p| p.is_live()).count() <= 1 {
            return self.end_hand().map(Some);
        }
        if self.round_complete() {
            return self.next_round();
        }
        if pass_turn {
            if let Some(next) = self.next_to_act_after(from) {
                self.current_player_index = next;
            }
        }
        Ok(None)
    }

    fn round_complete(&self) -> bool {
        let actors: Vec<&Player> = self.players.iter().filter(|p| p.can_act()).collect();
        match actors.as_slice() {
            [] => true,
            // nobody left to bet against once this player has matched
            [only] => only.current_bet() >= self.current_bet,
            _ => actors
                .iter()
                .all(|p| p.acted && p.current_bet() == self.current_bet),
        }
    }

    /// Deals the next street. When fewer than two players can still bet,
    /// keeps dealing until the river and settles.
    fn next_round(&mut self) -> Result<Option<HandResult>, GameError> {
        loop {
            let (next, count) = match self.stage {
                GameStage::Preflop => (GameStage::Flop, 3),
                GameStage::Flop => (GameStage::Turn, 1),
                GameStage::Turn => (GameStage::River, 1),
                GameStage::River => return self.end_hand().map(Some),
                GameStage::Waiting | GameStage::Showdown => return Ok(None),
            };
            self.deck.burn()?;
            for _ in 0..count {
                let card = self.deck.draw()?;
                self.community_cards.push(card);
            }
            self.stage = next;
            for p in &mut self.players {
                p.reset_round();
            }
            self.current_bet = 0;
            if let Some(hand) = self.current_hand.as_mut() {
                hand.board = self.community_cards.clone();
            }
            debug!(
                table_id = self.id,
                stage = ?self.stage,
                board = ?self.community_cards,
                "stage advanced"
            );

            if self.players.iter().filter(|p| p.can_act()).count() >= 2 {
                if let Some(first) = self.next_to_act_after(self.dealer_position) {
                    self.current_player_index = first;
                }
                return Ok(None);
            }
        }
    }

    /// Settles the pot, updates stats, rotates the button and returns the
    /// table to `Waiting`.
    fn end_hand(&mut self) -> Result<HandResult, GameError> {
        let live: Vec<usize> = (0..self.players.len())
            .filter(|&i| self.players[i].is_live())
            .collect();

        let result = if let [winner] = live.as_slice() {
            let winner = *winner;
            let amount = self.pot;
            self.players[winner].add_chips(amount);
            HandResult {
                payouts: vec![Payout {
                    player_id: self.players[winner].id(),
                    amount,
                    hand: None,
                }],
                pots: vec![Pot {
                    amount,
                    eligible_seats: vec![winner],
                }],
                showdown: false,
                shown: Vec::new(),
            }
        } else {
            self.stage = GameStage::Showdown;
            self.showdown(&live)
        };

        for p in &mut self.players {
            if p.in_hand() {
                let won = result
                    .payouts
                    .iter()
                    .find(|w| w.player_id == p.id())
                    .map(|w| w.amount);
                p.record_hand(won);
            }
            p.reset_round();
        }

        info!(
            table_id = self.id,
            hand = self.hands_started,
            pot = self.pot,
            showdown = result.showdown,
            winners = ?result.winners(),
            "hand settled"
        );

        if let Some(mut hand) = self.current_hand.take() {
            hand.board = self.community_cards.clone();
            hand.result = Some(result.clone());
            self.last_hand = Some(hand);
        }
        self.pot = 0;
        self.current_bet = 0;
        self.stage = GameStage::Waiting;
        if !self.players.is_empty() {
            self.dealer_position = (self.dealer_position + 1) % self.players.len();
        }
        Ok(result)
    }

    fn showdown(&mut self, live: &[usize]) -> HandResult {
        let strengths: BTreeMap<usize, HandStrength> = live
            .iter()
            .map(|&i| {
                let p = &self.players[i];
                (i, evaluate(p.hole_cards(), &self.community_cards))
            })
            .collect();
        let contributions: Vec<Contribution> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_hand())
            .map(|(seat, p)| Contribution {
                seat,
                amount: p.total_bet(),
                folded: p.is_folded(),
            })
            .collect();
        let pots = build_pots(&contributions);

        let mut winnings: BTreeMap<usize, Chips> = BTreeMap::new();
        for pot in &pots {
            let Some(best) = pot.eligible_seats.iter().filter_map(|s| strengths.get(s)).max()
            else {
                continue;
            };
            let winners: Vec<usize> = self
                .seats_from_dealer()
                .into_iter()
                .filter(|s| pot.eligible_seats.contains(s) && strengths.get(s) == Some(best))
                .collect();
            for (seat, share) in split_evenly(pot.amount, &winners) {
                *winnings.entry(seat).or_insert(0) += share;
            }
        }

        let mut payouts = Vec::with_capacity(winnings.len());
        for seat in self.seats_from_dealer() {
            if let Some(&amount) = winnings.get(&seat) {
                self.players[seat].add_chips(amount);
                payouts.push(Payout {
                    player_id: self.players[seat].id(),
                    amount,
                    hand: strengths.get(&seat).cloned(),
                });
            }
        }
        let shown = strengths
            .iter()
            .map(|(&seat, s)| (self.players[seat].id(), s.clone()))
            .collect();
        HandResult {
            payouts,
            pots,
            showdown: true,
            shown,
        }
    }

    /// All seats, starting left of the dealer.
    fn seats_from_dealer(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..=n).map(|o| (self.dealer_position + o) % n).collect()
    }

    fn next_in_hand_after(&self, from: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|o| (from + o) % n)
            .find(|&i| self.players[i].in_hand())
            .unwrap_or(from)
    }

    fn next_to_act_after(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|o| (from + o) % n)
            .find(|&i| self.players[i].can_act())
    }

    pub(crate) fn player_at_mut(&mut self, seat: usize) -> &mut Player {
        &mut self.players[seat]
    }

    pub(crate) fn record_action(&mut self, record: ActionRecord) {
        if let Some(hand) = self.current_hand.as_mut() {
            hand.actions.push(record);
        }
    }
}
