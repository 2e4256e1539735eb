use serde::{Deserialize, Serialize};

use crate::player::Chips;

/// One pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible_seats: Vec<usize>,
}

/// What a seat put into the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: Chips,
    pub folded: bool,
}

/// Splits the hand's contributions into a main pot and side pots.
///
/// Each distinct contribution level (ascending) forms a pot holding what
/// every contributor put in between the previous level and this one;
/// only non-folded seats that reached the level may win it. A level with
/// nobody eligible is merged into its neighbour so no chips are lost.
/// Without all-ins this is a single pot.
pub fn build_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .map(|c| c.amount)
        .filter(|&a| a > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut carry: Chips = 0;
    let mut prev = 0;
    for level in levels {
        let amount: Chips = contributions
            .iter()
            .map(|c| c.amount.min(level).saturating_sub(prev))
            .sum();
        let mut eligible_seats: Vec<usize> = contributions
            .iter()
            .filter(|c| !c.folded && c.amount >= level)
            .map(|c| c.seat)
            .collect();
        eligible_seats.sort_unstable();
        prev = level;

        if eligible_seats.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += amount,
                None => carry += amount,
            }
            continue;
        }
        match pots.last_mut() {
            // same contenders as the level below: still one pot
            Some(last) if last.eligible_seats == eligible_seats => last.amount += amount,
            _ => pots.push(Pot {
                amount: amount + carry,
                eligible_seats,
            }),
        }
        carry = 0;
    }
    pots
}

/// Splits `amount` equally between `winners` (already in payout order).
/// The odd minor units go one each to the first winners.
pub fn split_evenly(amount: Chips, winners: &[usize]) -> Vec<(usize, Chips)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as Chips;
    let share = amount / n;
    let remainder = (amount % n) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, share + Chips::from(i < remainder)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(seat: usize, amount: Chips, folded: bool) -> Contribution {
        Contribution {
            seat,
            amount,
            folded,
        }
    }

    #[test]
    fn equal_contributions_make_one_pot() {
        let pots = build_pots(&[c(0, 100, false), c(1, 100, false), c(2, 40, true)]);
        assert_eq!(
            pots,
            vec![Pot {
                amount: 240,
                eligible_seats: vec![0, 1]
            }]
        );
    }

    #[test]
    fn short_all_in_creates_side_pot() {
        let pots = build_pots(&[c(0, 50, false), c(1, 200, false), c(2, 200, false)]);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible_seats, vec![0, 1, 2]);
        assert_eq!(pots[1].amount, 300);
        assert_eq!(pots[1].eligible_seats, vec![1, 2]);
    }

    #[test]
    fn uncalled_excess_returns_to_its_owner() {
        let pots = build_pots(&[c(0, 100, false), c(1, 300, false)]);
        assert_eq!(pots[1].amount, 200);
        assert_eq!(pots[1].eligible_seats, vec![1]);
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn folded_top_level_is_merged_down() {
        let pots = build_pots(&[c(0, 60, false), c(1, 50, false), c(2, 100, true)]);
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 210);
        assert!(pots.iter().all(|p| !p.eligible_seats.is_empty()));
    }

    #[test]
    fn remainder_goes_to_first_winners() {
        assert_eq!(split_evenly(101, &[3, 1]), vec![(3, 51), (1, 50)]);
        assert_eq!(split_evenly(100, &[0, 1, 2]), vec![(0, 34), (1, 33), (2, 33)]);
        assert!(split_evenly(10, &[]).is_empty());
    }
}
