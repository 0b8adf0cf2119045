//! Game repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::adapters::games_sea::{GameCreate, StatusTransition};
use crate::domain::{turn, GameSettings};
use crate::entities::games;
use crate::entities::games::GameStatus;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::memberships::{self, Participant};
use crate::repos::stories::{self, Segment};

/// Fully hydrated game: settings plus the ordered participant list and
/// segment sequence it owns. The turn engine only ever reads from this.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub owner_id: i64,
    pub status: GameStatus,
    pub settings: GameSettings,
    pub created_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    /// Ordered by join position.
    pub participants: Vec<Participant>,
    /// Ordered by sequence index.
    pub segments: Vec<Segment>,
}

impl Game {
    pub fn participant(&self, user_id: i64) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    pub fn is_participant(&self, user_id: i64) -> bool {
        self.participant(user_id).is_some()
    }

    /// The participant who holds the current turn.
    ///
    /// With an empty story this is the owner: the owner joins at position
    /// 0 during creation, and `turn::next_writer_pos` maps an empty
    /// sequence to position 0.
    pub fn next_writer(&self) -> Result<&Participant, DomainError> {
        self.writer_at(self.segments.len())
    }

    /// The participant whose turn it is for segment index `seq_no`.
    pub fn writer_at(&self, seq_no: usize) -> Result<&Participant, DomainError> {
        let pos = turn::next_writer_pos(self.participants.len(), seq_no)?;
        // Positions form a contiguous 0..n-1 range in join order, so the
        // modulo result indexes directly.
        Ok(&self.participants[pos])
    }

    /// Whether a story of `count` segments completes the game.
    pub fn finished_after(&self, count: usize) -> bool {
        turn::is_finished(self.participants.len(), count, self.settings.rounds_per_user)
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, DomainError> {
    Ok(games_adapter::find_by_id(conn, game_id).await?)
}

/// Load the fully hydrated game or fail with `NotFound`.
pub async fn load_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let model = games_adapter::find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
        })?;
    hydrate(conn, model).await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, DomainError> {
    Ok(games_adapter::create_game(conn, dto).await?)
}

/// Status-guarded transition; false means the expected status was stale.
pub async fn transition_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StatusTransition,
) -> Result<bool, DomainError> {
    Ok(games_adapter::transition_status(conn, dto).await?)
}

/// Owner-only delete; false means no row matched (absent or not owner).
pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    owner_id: i64,
) -> Result<bool, DomainError> {
    Ok(games_adapter::delete_game_owned(conn, game_id, owner_id).await?)
}

/// All games the user participates in with one of the given statuses,
/// hydrated. An empty result is not an error.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    statuses: &[GameStatus],
) -> Result<Vec<Game>, DomainError> {
    let models = games_adapter::list_for_user(conn, user_id, statuses).await?;
    let mut out = Vec::with_capacity(models.len());
    for model in models {
        out.push(hydrate(conn, model).await?);
    }
    Ok(out)
}

async fn hydrate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    model: games::Model,
) -> Result<Game, DomainError> {
    let participants = memberships::find_all_by_game(conn, model.id).await?;
    let segments = stories::list_by_game(conn, model.id).await?;
    Ok(Game {
        id: model.id,
        title: model.title,
        owner_id: model.owner_id,
        status: model.status,
        settings: GameSettings {
            locale: model.locale,
            privacy: model.privacy,
            min_words: model.min_words as u32,
            max_words: model.max_words as u32,
            rounds_per_user: model.rounds_per_user as u32,
            words_visible: model.words_visible as u32,
            max_participants: model.max_participants as u32,
        },
        created_at: model.created_at,
        started_at: model.started_at,
        ended_at: model.ended_at,
        participants,
        segments,
    })
}
