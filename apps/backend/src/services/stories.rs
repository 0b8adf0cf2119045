//! Story contributions: submission, the turn-gated preview, full history.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea::StatusTransition;
use crate::domain::turn;
use crate::entities::games::GameStatus;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};
use crate::notifications::{GameEvent, GameRef, UserRef};
use crate::repos::games::{self, Game};
use crate::repos::memberships::Participant;
use crate::repos::stories::{self, Segment};

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

/// Append a segment for the caller.
///
/// Checks run in a fixed order so clients always see the same code for the
/// same input: empty, too short, too long, game not started, not the
/// caller's turn. Text rules are judged before game state on purpose.
pub async fn submit_segment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    caller_id: i64,
    text: &str,
) -> Result<(Game, Segment, GameEvent), DomainError> {
    let game = games::load_game(conn, game_id).await?;

    // Only the empty string counts as empty; whitespace-only text falls
    // through to the word-count rules like any other text.
    if text.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyText,
            "Submitted text is empty",
        ));
    }
    let words = turn::word_count(text);
    if words < game.settings.min_words as usize {
        return Err(DomainError::validation(
            ValidationKind::TooShortText,
            format!(
                "Submitted text has {words} words, minimum is {}",
                game.settings.min_words
            ),
        ));
    }
    if words > game.settings.max_words as usize {
        return Err(DomainError::validation(
            ValidationKind::TooLongText,
            format!(
                "Submitted text has {words} words, maximum is {}",
                game.settings.max_words
            ),
        ));
    }
    if game.status != GameStatus::Started {
        return Err(DomainError::forbidden(
            ForbiddenKind::GameNotStarted,
            format!("Game {game_id} is not accepting contributions"),
        ));
    }
    // A non-participant is never the next writer, so one check covers both.
    if game.next_writer()?.user_id != caller_id {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotNextWriter,
            format!("It is not user {caller_id}'s turn in game {game_id}"),
        ));
    }

    // The index is recomputed inside the transaction; the unique
    // (game_id, seq_no) constraint settles a concurrent double-submit.
    let seq_no = game.segments.len() as u32;
    let segment = stories::append_segment(conn, game_id, seq_no, caller_id, text.to_string()).await?;

    let mut game = game;
    game.segments.push(segment.clone());
    let count = game.segments.len();

    let event = if game.finished_after(count) {
        let moved = games::transition_status(
            conn,
            StatusTransition::new(game_id, GameStatus::Started, GameStatus::Finished),
        )
        .await?;
        if !moved {
            return Err(DomainError::conflict(
                ConflictKind::StaleStatus,
                format!("Game {game_id} changed status concurrently"),
            ));
        }
        game.status = GameStatus::Finished;
        GameEvent::StoryFinished {
            game: game_ref(&game),
            last_turn_holder: user_ref(game.writer_at(count)?),
        }
    } else {
        GameEvent::NextWriter {
            game: game_ref(&game),
            next_writer: user_ref(game.writer_at(count)?),
        }
    };

    Ok((game, segment, event))
}

/// The story preview the caller may see before writing.
///
/// An empty story reads as empty text for any participant; once segments
/// exist the preview belongs to the next writer alone.
pub async fn visible_text<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    caller_id: i64,
) -> Result<String, DomainError> {
    let game = games::load_game(conn, game_id).await?;
    if !game.is_participant(caller_id) {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotParticipant,
            format!("User {caller_id} is not a participant of game {game_id}"),
        ));
    }
    if game.segments.is_empty() {
        return Ok(String::new());
    }
    if game.next_writer()?.user_id != caller_id {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotNextWriter,
            format!("It is not user {caller_id}'s turn in game {game_id}"),
        ));
    }

    let bodies: Vec<String> = game.segments.iter().map(|s| s.body.clone()).collect();
    Ok(turn::visible_text(&bodies, game.settings.words_visible))
}

/// Full segment history, participants only.
pub async fn list_segments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    caller_id: i64,
) -> Result<Vec<Segment>, DomainError> {
    let game = games::load_game(conn, game_id).await?;
    if !game.is_participant(caller_id) {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotParticipant,
            format!("User {caller_id} is not a participant of game {game_id}"),
        ));
    }
    Ok(game.segments)
}
