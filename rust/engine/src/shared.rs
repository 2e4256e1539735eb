use std::sync::{Arc, Mutex, MutexGuard};

use tracing::error;

use crate::errors::GameError;
use crate::player::{Chips, Player, PlayerAction, PlayerId};
use crate::snapshot::TableSnapshot;
use crate::table::{ActionOutcome, Table};

/// Cloneable handle to one table. Every call holds the lock for its whole
/// duration, so actions against the same table never interleave.
#[derive(Debug, Clone)]
pub struct SharedTable {
    inner: Arc<Mutex<Table>>,
}

impl SharedTable {
    pub fn new(table: Table) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, GameError> {
        self.inner.lock().map_err(|_| {
            error!("table lock poisoned");
            GameError::TableUnavailable
        })
    }

    /// Runs `f` with exclusive access to the table.
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut Table) -> Result<R, GameError>,
    ) -> Result<R, GameError> {
        let mut table = self.lock()?;
        f(&mut table)
    }

    pub fn seat_player(
        &self,
        id: PlayerId,
        name: impl Into<String>,
        chips: Chips,
    ) -> Result<usize, GameError> {
        self.lock()?.seat_player(id, name, chips)
    }

    pub fn unseat_player(&self, id: PlayerId) -> Result<Player, GameError> {
        self.lock()?.unseat_player(id)
    }

    pub fn start_hand(&self) -> Result<String, GameError> {
        self.lock()?.start_hand()
    }

    pub fn make_action(
        &self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<ActionOutcome, GameError> {
        self.lock()?.make_action(player_id, action)
    }

    pub fn check_timeouts(&self) -> Result<Option<ActionOutcome>, GameError> {
        self.lock()?.check_timeouts()
    }

    pub fn force_fold(&self, player_id: PlayerId) -> Result<ActionOutcome, GameError> {
        self.lock()?.force_fold(player_id)
    }

    pub fn snapshot(&self) -> Result<TableSnapshot, GameError> {
        Ok(self.lock()?.snapshot())
    }

    pub fn snapshot_for(&self, viewer: PlayerId) -> Result<TableSnapshot, GameError> {
        Ok(self.lock()?.snapshot_for(viewer))
    }
}
