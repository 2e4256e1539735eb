//! Hand evaluation command.

use crate::error::CliError;
use crate::formatters::format_board;
use holdem_engine::cards::{Card, parse_cards};
use holdem_engine::hand::evaluate;
use std::collections::HashSet;
use std::io::Write;

/// Parses and validates a hole/board pair: exactly two hole cards, at most
/// five board cards, no card repeated.
pub(crate) fn parse_hole_and_board(
    hole: &str,
    board: &str,
) -> Result<(Vec<Card>, Vec<Card>), CliError> {
    let hole = parse_cards(hole)?;
    let board = parse_cards(board)?;
    if hole.len() != 2 {
        return Err(CliError::InvalidInput(format!(
            "expected 2 hole cards, got {}",
            hole.len()
        )));
    }
    if board.len() > 5 {
        return Err(CliError::InvalidInput(format!(
            "board holds at most 5 cards, got {}",
            board.len()
        )));
    }
    ensure_distinct(hole.iter().chain(board.iter()))?;
    Ok((hole, board))
}

pub(crate) fn ensure_distinct<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Result<(), CliError> {
    let mut seen = HashSet::new();
    for c in cards {
        if !seen.insert(*c) {
            return Err(CliError::InvalidInput(format!("duplicate card {}", c)));
        }
    }
    Ok(())
}

/// Handle the eval command: print the best hand made from `hole` + `board`.
pub fn handle_eval_command(hole: &str, board: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let (hole, board) = parse_hole_and_board(hole, board)?;
    let strength = evaluate(&hole, &board);
    writeln!(out, "Cards: {} {}", format_board(&hole), format_board(&board))?;
    writeln!(out, "Hand: {}", strength)?;
    writeln!(
        out,
        "Value: {} {:?}",
        strength.rank.value(),
        strength.tiebreak
    )?;
    Ok(())
}
