//! Self-play simulation command.
//!
//! Seats `players` random bots at one table and plays up to `hands` hands,
//! stopping early once fewer than two players have chips. After every hand
//! the total of all stacks is compared with the buy-in total; any drift is
//! reported as an engine error. With `--output`, each finished hand record
//! is appended to a JSONL file.
//!
//! # Examples
//!
//! ```no_run
//! use holdem_cli::run;
//! use std::io;
//!
//! let args = ["holdem", "sim", "--hands", "500", "--players", "6", "--seed", "42"];
//! run(args, &mut io::stdout(), &mut io::stderr());
//! ```

use crate::config;
use crate::error::CliError;
use crate::io_utils::JsonlWriter;
use crate::ui;
use holdem_engine::errors::GameError;
use holdem_engine::player::{Chips, PlayerAction, PlayerId, format_chips};
use holdem_engine::table::Table;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use std::path::PathBuf;

/// Random betting policy. Folds rarely, mostly checks or calls, and raises
/// by about one big blind or the current bet.
pub(crate) struct Bot {
    rng: ChaCha20Rng,
}

impl Bot {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Picks an action the acting player is allowed to take.
    pub(crate) fn choose(&mut self, table: &Table) -> Option<(PlayerId, PlayerAction)> {
        let p = table.current_player()?;
        let bet = table.current_bet();
        let owed = bet.saturating_sub(p.current_bet());
        let raise_to = bet + table.limit().big_blind.max(bet);
        let can_raise = raise_to - p.current_bet() < p.chips();
        let roll: u32 = self.rng.random_range(0..100);

        let action = match (owed, roll) {
            (_, 0..2) => PlayerAction::AllIn,
            (0, 2..25) if can_raise => PlayerAction::Raise(raise_to),
            (0, _) => PlayerAction::Check,
            (_, 2..17) => PlayerAction::Fold,
            (_, 17..30) if can_raise => PlayerAction::Raise(raise_to),
            _ if p.chips() > owed => PlayerAction::Call,
            _ => PlayerAction::AllIn,
        };
        Some((p.id(), action))
    }
}

/// Totals reported at the end of a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SimSummary {
    pub hands: u64,
    pub showdowns: u64,
    pub actions: u64,
}

pub(crate) fn simulate(
    table: &mut Table,
    bot: &mut Bot,
    hands: u64,
    mut writer: Option<&mut JsonlWriter>,
    err: &mut dyn Write,
) -> Result<SimSummary, CliError> {
    let expected: Chips = total_chips(table);
    let mut summary = SimSummary::default();

    for _ in 0..hands {
        match table.start_hand() {
            Ok(_) => {}
            Err(GameError::NotEnoughPlayers) => {
                ui::display_warning(
                    err,
                    &format!(
                        "stopping after {} hands: fewer than 2 players have chips",
                        summary.hands
                    ),
                )?;
                break;
            }
            Err(e) => return Err(e.into()),
        }

        while let Some((id, action)) = bot.choose(table) {
            summary.actions += 1;
            if let Some(result) = table.make_action(id, action)?.hand_result {
                if result.showdown {
                    summary.showdowns += 1;
                }
                break;
            }
        }
        summary.hands += 1;

        let actual = total_chips(table);
        if actual != expected {
            return Err(CliError::Engine(format!(
                "chip conservation violated after hand {}: {} != {}",
                table.hands_started(),
                format_chips(actual),
                format_chips(expected)
            )));
        }
        if let (Some(w), Some(record)) = (writer.as_deref_mut(), table.last_hand()) {
            w.write(record)?;
        }
    }
    Ok(summary)
}

fn total_chips(table: &Table) -> Chips {
    table.players().iter().map(|p| p.chips()).sum::<Chips>() + table.pot()
}

/// Handle the sim command.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` when `hands` is zero, `CliError::Config`
/// on invalid configuration, `CliError::Engine` when the table rejects a bot
/// action or chips are not conserved, and `CliError::Io` on output failures.
pub fn handle_sim_command(
    hands: u64,
    players: u8,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut table = Table::new(1, cfg.table_config(Some(base_seed)));
    for n in 1..=players {
        table.seat_player(PlayerId::from(n), format!("P{}", n), cfg.starting_stack_units())?;
    }
    let mut bot = Bot::new(base_seed.wrapping_add(1));

    let mut writer = match output.as_deref().map(PathBuf::from) {
        Some(path) => match JsonlWriter::create(&path) {
            Ok(w) => Some(w),
            Err(e) => {
                ui::write_error(err, &format!("Failed to open {}: {}", path.display(), e))?;
                return Err(CliError::Io(e));
            }
        },
        None => None,
    };

    let summary = simulate(&mut table, &mut bot, hands, writer.as_mut(), err)?;
    if let Some(w) = writer {
        w.finish()?;
    }
    tracing::info!(
        hands = summary.hands,
        showdowns = summary.showdowns,
        actions = summary.actions,
        "simulation finished"
    );

    writeln!(
        out,
        "Simulated {} hands ({} showdowns, {} actions), seed {}",
        summary.hands, summary.showdowns, summary.actions, base_seed
    )?;
    for p in table.players() {
        let stats = p.stats();
        writeln!(
            out,
            "{}: chips {} played {} won {} ({:.1}%) biggest win {}",
            p.name(),
            format_chips(p.chips()),
            stats.hands_played,
            stats.hands_won,
            p.win_rate(),
            format_chips(stats.biggest_win)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::table::TableConfig;

    fn table(players: u8, stack: Chips, seed: u64) -> Table {
        let mut t = Table::new(
            1,
            TableConfig {
                limit: 100,
                seed: Some(seed),
                ..TableConfig::default()
            },
        );
        for n in 1..=players {
            t.seat_player(PlayerId::from(n), format!("P{}", n), stack)
                .unwrap();
        }
        t
    }

    #[test]
    fn conserves_chips_across_many_hands() {
        let mut t = table(6, 2_000, 11);
        let mut bot = Bot::new(12);
        let mut err = Vec::new();
        let summary = simulate(&mut t, &mut bot, 200, None, &mut err).unwrap();
        assert!(summary.hands > 0);
        let total: Chips = t.players().iter().map(|p| p.chips()).sum();
        assert_eq!(total, 12_000);
    }

    #[test]
    fn stops_with_warning_when_one_player_is_left() {
        let mut t = table(2, 100, 3);
        let mut bot = Bot::new(4);
        let mut err = Vec::new();
        let summary = simulate(&mut t, &mut bot, 100_000, None, &mut err).unwrap();
        assert!(summary.hands < 100_000);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.starts_with("WARNING:"), "{}", stderr);
        assert_eq!(t.players().iter().filter(|p| p.chips() > 0).count(), 1);
    }

    #[test]
    fn bot_only_picks_legal_actions() {
        let mut t = table(3, 500, 8);
        let mut bot = Bot::new(8);
        t.start_hand().unwrap();
        while let Some((id, action)) = bot.choose(&t) {
            if t.make_action(id, action).unwrap().hand_result.is_some() {
                break;
            }
        }
        assert!(t.last_result().is_some());
    }

    #[test]
    fn zero_hands_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_sim_command(0, 3, Some(1), None, &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }
}
