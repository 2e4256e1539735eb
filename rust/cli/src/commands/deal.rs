//! Deal command handler.
//!
//! Seats `players` bots at a fresh table, deals one hand and checks it down
//! to showdown, printing the hole cards, the final board and the payouts.
//! The same seed always produces the same output.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_card};
use holdem_engine::history::HandResult;
use holdem_engine::player::{PlayerAction, PlayerId, format_chips};
use holdem_engine::table::Table;
use std::io::Write;

/// Handle the deal command.
///
/// # Errors
///
/// Returns `CliError::Config` on invalid configuration, `CliError::Engine`
/// if the table rejects a step and `CliError::Io` on write failures.
pub fn handle_deal_command(
    players: u8,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut table = Table::new(1, cfg.table_config(Some(base_seed)));
    for n in 1..=players {
        table.seat_player(PlayerId::from(n), format!("P{}", n), cfg.starting_stack_units())?;
    }

    let started = table.start_hand()?;
    writeln!(out, "{}", started)?;
    for p in table.players() {
        let cards: Vec<String> = p.hole_cards().iter().map(format_card).collect();
        writeln!(out, "Hole {}: {}", p.name(), cards.join(" "))?;
    }

    let result = check_down(&mut table)?;
    let (board, actions) = table
        .last_hand()
        .map(|h| (h.board.clone(), h.actions.clone()))
        .unwrap_or_default();
    let played: Vec<String> = actions
        .iter()
        .map(|a| {
            let name = table.player(a.player_id).map_or("?", |p| p.name());
            format!("{} {}", name, format_action(&a.action))
        })
        .collect();
    writeln!(out, "Actions: {}", played.join(", "))?;
    writeln!(out, "Board: {}", format_board(&board))?;
    write_payouts(&table, &result, out)?;
    Ok(())
}

/// Plays the open hand with every seat checking or calling.
fn check_down(table: &mut Table) -> Result<HandResult, CliError> {
    while let Some(p) = table.current_player() {
        let id = p.id();
        let owed = table.current_bet().saturating_sub(p.current_bet());
        let action = if owed == 0 {
            PlayerAction::Check
        } else if p.chips() > owed {
            PlayerAction::Call
        } else {
            PlayerAction::AllIn
        };
        if let Some(result) = table.make_action(id, action)?.hand_result {
            return Ok(result);
        }
    }
    table
        .last_result()
        .cloned()
        .ok_or_else(|| CliError::Engine("hand ended without a result".into()))
}

fn write_payouts(table: &Table, result: &HandResult, out: &mut dyn Write) -> Result<(), CliError> {
    for payout in &result.payouts {
        let name = table
            .player(payout.player_id)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| payout.player_id.to_string());
        match &payout.hand {
            Some(hand) => writeln!(
                out,
                "Winner {}: +{} with {}",
                name,
                format_chips(payout.amount),
                hand
            )?,
            None => writeln!(out, "Winner {}: +{}", name, format_chips(payout.amount))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(players: u8, seed: u64) -> String {
        let mut out = Vec::new();
        handle_deal_command(players, Some(seed), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn same_seed_same_deal() {
        assert_eq!(deal(4, 12345), deal(4, 12345));
    }

    #[test]
    fn prints_one_hole_line_per_seat_and_a_full_board() {
        let output = deal(6, 999);
        let holes = output.lines().filter(|l| l.starts_with("Hole P")).count();
        assert_eq!(holes, 6);

        let board = output
            .lines()
            .find(|l| l.starts_with("Board:"))
            .expect("board line");
        assert_eq!(board.split_whitespace().count(), 6, "{}", board);
        assert!(output.lines().any(|l| l.starts_with("Winner ")));
        assert!(output.contains("Actions: "));
        assert!(!output.contains("fold"), "{}", output);
    }

    #[test]
    fn first_line_announces_the_hand() {
        let output = deal(2, 7);
        assert!(output.lines().next().unwrap().starts_with("Hand #1 started"));
    }
}
