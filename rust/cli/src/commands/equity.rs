//! Monte-Carlo equity estimate for two or more hole-card hands.
//!
//! Each iteration draws the missing board cards from a deck that excludes
//! every known card, evaluates all hands and credits the winner. Split pots
//! count as a tie for each player involved and add a fractional share to
//! their equity.

use crate::commands::eval::ensure_distinct;
use crate::error::CliError;
use crate::formatters::format_board;
use holdem_engine::cards::{Card, parse_cards};
use holdem_engine::deck::Deck;
use holdem_engine::hand::{HandStrength, compare_hands, evaluate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cmp::Ordering;
use std::io::Write;

/// Win and tie counters for one hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EquityLine {
    pub wins: u32,
    pub ties: u32,
    /// Sum of pot shares, so a three-way split adds 1/3
    pub share: f64,
}

pub(crate) fn estimate(
    hands: &[Vec<Card>],
    board: &[Card],
    iterations: u32,
    seed: u64,
) -> Result<Vec<EquityLine>, CliError> {
    let known: Vec<Card> = hands.iter().flatten().chain(board).copied().collect();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut lines = vec![EquityLine::default(); hands.len()];
    let mut full_board = Vec::with_capacity(5);

    for _ in 0..iterations {
        let mut deck = Deck::without(&known, rng.random());
        full_board.clear();
        full_board.extend_from_slice(board);
        while full_board.len() < 5 {
            full_board.push(deck.draw()?);
        }

        let strengths: Vec<HandStrength> =
            hands.iter().map(|h| evaluate(h, &full_board)).collect();
        let mut best: Vec<usize> = vec![0];
        for i in 1..strengths.len() {
            match compare_hands(&strengths[i], &strengths[best[0]]) {
                Ordering::Greater => best = vec![i],
                Ordering::Equal => best.push(i),
                Ordering::Less => {}
            }
        }

        if let [winner] = best[..] {
            lines[winner].wins += 1;
            lines[winner].share += 1.0;
        } else {
            let share = 1.0 / best.len() as f64;
            for &i in &best {
                lines[i].ties += 1;
                lines[i].share += share;
            }
        }
    }
    Ok(lines)
}

/// Handle the equity command.
///
/// # Errors
///
/// `CliError::InvalidInput` for fewer than two hands, hands without exactly
/// two cards, boards over five cards, repeated cards or zero iterations.
pub fn handle_equity_command(
    hands: &[String],
    board: &str,
    iterations: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if iterations == 0 {
        return Err(CliError::InvalidInput("iterations must be >= 1".into()));
    }
    if hands.len() < 2 {
        return Err(CliError::InvalidInput(
            "equity needs at least 2 hands".into(),
        ));
    }
    let parsed: Vec<Vec<Card>> = hands
        .iter()
        .map(|h| parse_cards(h))
        .collect::<Result<_, _>>()?;
    if let Some(bad) = parsed.iter().find(|h| h.len() != 2) {
        return Err(CliError::InvalidInput(format!(
            "each hand needs 2 cards, got {}",
            bad.len()
        )));
    }
    let board = parse_cards(board)?;
    if board.len() > 5 {
        return Err(CliError::InvalidInput(format!(
            "board holds at most 5 cards, got {}",
            board.len()
        )));
    }
    ensure_distinct(parsed.iter().flatten().chain(board.iter()))?;

    let seed = seed.unwrap_or_else(rand::random);
    let lines = estimate(&parsed, &board, iterations, seed)?;

    writeln!(out, "Board: {}", format_board(&board))?;
    let n = f64::from(iterations);
    for (hand, line) in parsed.iter().zip(&lines) {
        writeln!(
            out,
            "{}: win {:.2}% tie {:.2}% equity {:.2}%",
            format_board(hand),
            100.0 * f64::from(line.wins) / n,
            100.0 * f64::from(line.ties) / n,
            100.0 * line.share / n
        )?;
    }
    writeln!(out, "Iterations: {}", iterations)?;
    Ok(())
}
