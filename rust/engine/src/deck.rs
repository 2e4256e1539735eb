use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A shuffled deck dealt from the back without replacement.
///
/// The random source is a seeded ChaCha20 generator so that tests and
/// simulations can replay a shuffle exactly.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Creates a full, shuffled deck. `None` picks a random seed.
    pub fn new(seed: Option<u64>) -> Self {
        Self::new_with_seed(seed.unwrap_or_else(rand::random))
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.reset();
        deck
    }

    /// A shuffled deck holding every card except `known`.
    pub fn without(known: &[Card], seed: u64) -> Self {
        let cards = full_deck()
            .into_iter()
            .filter(|c| !known.contains(c))
            .collect();
        let mut deck = Self {
            cards,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.shuffle();
        deck
    }

    /// Restores all 52 cards and shuffles them.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.shuffle();
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Like [`Deck::deal`] but treats an empty deck as an error.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.deal().ok_or(GameError::DeckExhausted)
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
