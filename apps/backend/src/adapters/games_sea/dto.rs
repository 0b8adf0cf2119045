//! DTOs for the games_sea adapter.

use crate::domain::GameSettings;
use crate::entities::games::GameStatus;

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub title: String,
    pub owner_id: i64,
    pub settings: GameSettings,
}

impl GameCreate {
    pub fn new(title: impl Into<String>, owner_id: i64, settings: GameSettings) -> Self {
        Self {
            title: title.into(),
            owner_id,
            settings,
        }
    }
}

/// DTO for a status-guarded transition.
///
/// The update is filtered on the expected current status, so a transition
/// attempted from a stale status affects zero rows instead of overwriting.
#[derive(Debug, Clone, Copy)]
pub struct StatusTransition {
    pub id: i64,
    pub expected: GameStatus,
    pub next: GameStatus,
}

impl StatusTransition {
    pub fn new(id: i64, expected: GameStatus, next: GameStatus) -> Self {
        Self { id, expected, next }
    }
}
