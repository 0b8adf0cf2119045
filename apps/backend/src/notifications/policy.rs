//! Pure recipient/payload computation for game events.

use serde_json::json;

/// The game facts an event needs; threaded explicitly from the service
/// that performed the mutation, never re-read from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRef {
    pub id: i64,
    pub title: String,
}

/// A potential notification recipient or subject.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    /// Notification address; users without one are silently skipped.
    pub push_token: Option<String>,
}

/// Events emitted by the game and story services.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A user joined; the owner hears about it.
    UserJoined {
        game: GameRef,
        owner: UserRef,
        joined: UserRef,
        participant_count: usize,
    },
    /// The owner started the game; everyone else gets ready. The next
    /// writer at this instant is always the owner (the story is empty).
    StoryStarted {
        game: GameRef,
        next_writer: UserRef,
        participants: Vec<UserRef>,
    },
    /// A segment landed and the turn moved on.
    NextWriter { game: GameRef, next_writer: UserRef },
    /// The final segment landed. Informational; named after the writer
    /// who would have been next.
    StoryFinished {
        game: GameRef,
        last_turn_holder: UserRef,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

fn to_recipient(user: &UserRef) -> Option<String> {
    user.push_token.clone()
}

/// Decide who receives which message for an event.
pub fn plan(event: &GameEvent) -> Vec<(String, PushMessage)> {
    match event {
        GameEvent::UserJoined {
            game,
            owner,
            joined,
            participant_count,
        } => {
            let message = PushMessage {
                title: game.title.clone(),
                body: format!("{} joined", joined.username),
                data: json!({
                    "type": "USER_JOINED",
                    "gameId": game.id.to_string(),
                    "participants": participant_count.to_string(),
                }),
            };
            to_recipient(owner)
                .map(|address| (address, message))
                .into_iter()
                .collect()
        }
        GameEvent::StoryStarted {
            game,
            next_writer,
            participants,
        } => {
            let message = PushMessage {
                title: game.title.clone(),
                body: "Story started, get ready!".to_string(),
                data: json!({
                    "type": "STORY_STARTED",
                    "gameId": game.id.to_string(),
                    "nextWriter": next_writer.username,
                }),
            };
            participants
                .iter()
                .filter(|p| p.id != next_writer.id)
                .filter_map(to_recipient)
                .map(|address| (address, message.clone()))
                .collect()
        }
        GameEvent::NextWriter { game, next_writer } => {
            let message = PushMessage {
                title: game.title.clone(),
                body: "It's your turn to write".to_string(),
                data: json!({
                    "type": "NEXT_WRITER",
                    "gameId": game.id.to_string(),
                }),
            };
            to_recipient(next_writer)
                .map(|address| (address, message))
                .into_iter()
                .collect()
        }
        GameEvent::StoryFinished {
            game,
            last_turn_holder,
        } => {
            let message = PushMessage {
                title: game.title.clone(),
                body: "Story finished!".to_string(),
                data: json!({
                    "type": "STORY_FINISHED",
                    "gameId": game.id.to_string(),
                }),
            };
            to_recipient(last_turn_holder)
                .map(|address| (address, message))
                .into_iter()
                .collect()
        }
    }
}
