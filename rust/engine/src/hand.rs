use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Hand categories from weakest to strongest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum HandRank {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandRank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }
}

/// Category plus tiebreak ranks (strengths 2..=14, ordered high -> low).
/// Field order makes the derived `Ord` compare category first, then the
/// tiebreak sequence lexicographically.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub rank: HandRank,
    pub tiebreak: Vec<u8>,
}

impl HandStrength {
    fn new(rank: HandRank, tiebreak: Vec<u8>) -> Self {
        Self { rank, tiebreak }
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank.name())?;
        let ranks: Vec<&str> = self
            .tiebreak
            .iter()
            .filter_map(|&v| Rank::from_u8(v).map(Rank::symbol))
            .collect();
        if !ranks.is_empty() {
            write!(f, " ({})", ranks.join(" "))?;
        }
        Ok(())
    }
}

/// Evaluates two hole cards together with up to five community cards.
pub fn evaluate(hole: &[Card], community: &[Card]) -> HandStrength {
    let mut cards = Vec::with_capacity(hole.len() + community.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(community);
    evaluate_cards(&cards)
}

/// Best category over the given cards (up to 7), checked from the
/// strongest category down; the first match wins.
pub fn evaluate_cards(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut suit_masks = [0u16; 4];
    let mut rank_mask = 0u16;
    for c in cards {
        let r = c.rank.strength();
        let s = c.suit.index();
        rank_counts[r as usize] += 1;
        suit_counts[s] += 1;
        suit_masks[s] |= 1u16 << r;
        rank_mask |= 1u16 << r;
    }
    let flush_suits: Vec<usize> = (0..4).filter(|&s| suit_counts[s] >= 5).collect();

    // Royal flush, then straight flush
    let best_straight_flush = flush_suits
        .iter()
        .filter_map(|&s| straight_high_from_mask(suit_masks[s]))
        .max();
    if let Some(high) = best_straight_flush {
        if high == 14 {
            return HandStrength::new(HandRank::RoyalFlush, vec![14]);
        }
        return HandStrength::new(HandRank::StraightFlush, vec![high]);
    }

    // distinct ranks, high -> low
    let distinct: Vec<u8> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .collect();
    let kickers = |exclude: &[u8], n: usize| -> Vec<u8> {
        distinct
            .iter()
            .copied()
            .filter(|r| !exclude.contains(r))
            .take(n)
            .collect()
    };

    if let Some(quad) = highest_with_count(&rank_counts, |c| c >= 4) {
        let mut tb = vec![quad];
        tb.extend(kickers(&[quad], 1));
        return HandStrength::new(HandRank::FourOfAKind, tb);
    }

    if let Some((trips, pair)) = detect_full_house(&rank_counts) {
        return HandStrength::new(HandRank::FullHouse, vec![trips, pair]);
    }

    if let Some(&s) = flush_suits.first() {
        let top: Vec<u8> = (2..=14u8)
            .rev()
            .filter(|&r| suit_masks[s] & (1u16 << r) != 0)
            .take(5)
            .collect();
        return HandStrength::new(HandRank::Flush, top);
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return HandStrength::new(HandRank::Straight, vec![high]);
    }

    if let Some(trips) = highest_with_count(&rank_counts, |c| c == 3) {
        let mut tb = vec![trips];
        tb.extend(kickers(&[trips], 2));
        return HandStrength::new(HandRank::ThreeOfAKind, tb);
    }

    let pairs: Vec<u8> = distinct
        .iter()
        .copied()
        .filter(|&r| rank_counts[r as usize] >= 2)
        .take(2)
        .collect();
    if pairs.len() == 2 {
        let mut tb = pairs.clone();
        tb.extend(kickers(&pairs, 1));
        return HandStrength::new(HandRank::TwoPair, tb);
    }
    if let Some(&pair) = pairs.first() {
        let mut tb = vec![pair];
        tb.extend(kickers(&[pair], 3));
        return HandStrength::new(HandRank::OnePair, tb);
    }

    HandStrength::new(HandRank::HighCard, kickers(&[], 5))
}

/// `Greater` when `a` wins, `Less` when `b` wins, `Equal` for a split.
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

fn highest_with_count(rank_counts: &[u8; 15], pred: impl Fn(u8) -> bool) -> Option<u8> {
    (2..=14u8).rev().find(|&r| pred(rank_counts[r as usize]))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    // (count, rank) for every rank seen at least twice, strongest first
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] >= 2)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let &(count, trips) = groups.first()?;
    if count < 3 {
        return None;
    }
    let pair = groups.iter().skip(1).map(|&(_, r)| r).find(|&r| r != trips)?;
    Some((trips, pair))
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low for the wheel
    if (m & (1u16 << 14)) != 0 {
        m |= 1u16 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    (5..=14u8).rev().find(|&high| {
        let window = 0b11111u16 << (high - 4);
        (m & window) == window
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_mask_detects_wheel_and_broadway() {
        let wheel = (1 << 14) | (1 << 2) | (1 << 3) | (1 << 4) | (1 << 5);
        assert_eq!(straight_high_from_mask(wheel), Some(5));
        let broadway = 0b11111u16 << 10;
        assert_eq!(straight_high_from_mask(broadway), Some(14));
        assert_eq!(straight_high_from_mask(0b1101111u16 << 2), None);
    }

    #[test]
    fn two_trips_make_a_full_house() {
        let mut counts = [0u8; 15];
        counts[9] = 3;
        counts[4] = 3;
        counts[13] = 1;
        assert_eq!(detect_full_house(&counts), Some((9, 4)));
    }
}
