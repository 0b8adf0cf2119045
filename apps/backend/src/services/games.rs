//! Game lifecycle: create, join, start, delete, read.
//!
//! Every mutation is written to run inside a caller-provided transaction;
//! functions take a `ConnectionTrait` and never open their own. Events are
//! returned to the caller for post-commit dispatch, built from the
//! already-updated in-memory game.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea::{GameCreate, StatusTransition};
use crate::domain::SettingsDraft;
use crate::entities::games::{GamePrivacy, GameStatus};
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind,
};
use crate::notifications::{GameEvent, GameRef, UserRef};
use crate::repos::games::{self, Game};
use crate::repos::memberships::{self, Participant};
use crate::repos::users::User;

/// Listing scope for a user's games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameScope {
    /// Created or started, in rotation or waiting for players.
    Ongoing,
    Finished,
}

impl GameScope {
    fn statuses(self) -> &'static [GameStatus] {
        match self {
            GameScope::Ongoing => &[GameStatus::Created, GameStatus::Started],
            GameScope::Finished => &[GameStatus::Finished],
        }
    }
}

fn game_ref(game: &Game) -> GameRef {
    GameRef {
        id: game.id,
        title: game.title.clone(),
    }
}

fn user_ref(p: &Participant) -> UserRef {
    UserRef {
        id: p.user_id,
        username: p.username.clone(),
        push_token: p.push_token.clone(),
    }
}

fn owner_ref(game: &Game) -> Result<UserRef, DomainError> {
    game.participant(game.owner_id).map(user_ref).ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("game {} owner is not a participant", game.id),
        )
    })
}

/// Create a game with validated settings and join the owner at position 0.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: &User,
    title: &str,
    draft: &SettingsDraft,
) -> Result<Game, DomainError> {
    let settings = draft
        .validate(title)
        .map_err(DomainError::settings_rejected)?;

    let model = games::create_game(conn, GameCreate::new(title, owner.id, settings)).await?;
    memberships::add_participant(conn, model.id, owner.id, 0).await?;
    games::load_game(conn, model.id).await
}

/// Join an open game at the next free position.
pub async fn join_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user: &User,
) -> Result<(Game, GameEvent), DomainError> {
    let game = games::load_game(conn, game_id).await?;

    if game.is_participant(user.id) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyJoined,
            format!("User {} already joined game {game_id}", user.id),
        ));
    }
    if game.status != GameStatus::Created {
        return Err(DomainError::forbidden(
            ForbiddenKind::AlreadyStarted,
            format!("Game {game_id} is no longer open for joining"),
        ));
    }
    let max = game.settings.max_participants as usize;
    if max != 0 && game.participants.len() >= max {
        return Err(DomainError::forbidden(
            ForbiddenKind::GameFull,
            format!("Game {game_id} already has {max} participants"),
        ));
    }

    // The position is recomputed here inside the transaction; a concurrent
    // join that computed the same one loses on the unique constraint.
    let position = game.participants.len() as u32;
    let joined = memberships::add_participant(conn, game_id, user.id, position).await?;

    let mut game = game;
    game.participants.push(joined.clone());

    let event = GameEvent::UserJoined {
        game: game_ref(&game),
        owner: owner_ref(&game)?,
        joined: user_ref(&joined),
        participant_count: game.participants.len(),
    };
    Ok((game, event))
}

/// Owner-only transition from `Created` to `Started`.
pub async fn start_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    caller_id: i64,
) -> Result<(Game, GameEvent), DomainError> {
    let game = games::load_game(conn, game_id).await?;

    if game.owner_id != caller_id {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotOwner,
            format!("Only the owner can start game {game_id}"),
        ));
    }
    if game.status != GameStatus::Created {
        return Err(DomainError::forbidden(
            ForbiddenKind::AlreadyStarted,
            format!("Game {game_id} was already started"),
        ));
    }
    if game.participants.len() < 2 {
        return Err(DomainError::forbidden(
            ForbiddenKind::TooFewParticipants,
            format!("Game {game_id} needs at least 2 participants to start"),
        ));
    }

    let moved = games::transition_status(
        conn,
        StatusTransition::new(game_id, GameStatus::Created, GameStatus::Started),
    )
    .await?;
    if !moved {
        return Err(DomainError::conflict(
            ConflictKind::StaleStatus,
            format!("Game {game_id} changed status concurrently"),
        ));
    }

    let mut game = game;
    game.status = GameStatus::Started;
    game.started_at = Some(OffsetDateTime::now_utc());

    // The story is empty at this instant, so the next writer is the owner.
    let event = GameEvent::StoryStarted {
        game: game_ref(&game),
        next_writer: owner_ref(&game)?,
        participants: game.participants.iter().map(user_ref).collect(),
    };
    Ok((game, event))
}

/// Owner-only delete. The row-level `owner_id` filter makes the check and
/// the delete one statement; a zero-row result is disambiguated afterwards.
pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    caller_id: i64,
) -> Result<(), DomainError> {
    if games::delete_game(conn, game_id, caller_id).await? {
        return Ok(());
    }
    match games::find_by_id(conn, game_id).await? {
        Some(_) => Err(DomainError::forbidden(
            ForbiddenKind::NotOwner,
            format!("Only the owner can delete game {game_id}"),
        )),
        None => Err(DomainError::not_found(
            NotFoundKind::Game,
            format!("Game {game_id} not found"),
        )),
    }
}

/// Hydrated game for a caller: participants always, otherwise only when
/// the game is publicly readable.
pub async fn get_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    caller_id: i64,
) -> Result<Game, DomainError> {
    let game = games::load_game(conn, game_id).await?;
    if !game.is_participant(caller_id) && game.settings.privacy == GamePrivacy::Private {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotParticipant,
            format!("User {caller_id} is not a participant of game {game_id}"),
        ));
    }
    Ok(game)
}

/// The caller's games within a scope, hydrated, in creation order.
pub async fn list_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller_id: i64,
    scope: GameScope,
) -> Result<Vec<Game>, DomainError> {
    games::list_for_user(conn, caller_id, scope.statuses()).await
}
