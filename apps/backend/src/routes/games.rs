//! Game lifecycle HTTP routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::SettingsDraft;
use crate::entities::games::{GamePrivacy, GameStatus};
use crate::error::AppError;
use crate::extractors::{CurrentUser, GameId};
use crate::repos::games::Game;
use crate::repos::memberships::Participant;
use crate::services::games::{self, GameScope};
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub title: String,
    #[serde(flatten)]
    pub settings: SettingsDraft,
}

#[derive(Debug, Deserialize)]
pub struct ListGamesQuery {
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub user_id: i64,
    pub username: String,
    pub position: u32,
}

impl From<&Participant> for ParticipantResponse {
    fn from(p: &Participant) -> Self {
        Self {
            user_id: p.user_id,
            username: p.username.clone(),
            position: p.position,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: i64,
    pub title: String,
    pub owner_id: i64,
    pub status: GameStatus,
    pub privacy: GamePrivacy,
    pub locale: String,
    pub min_words: u32,
    pub max_words: u32,
    pub rounds_per_user: u32,
    pub words_visible: u32,
    pub max_participants: u32,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    pub participants: Vec<ParticipantResponse>,
    pub segment_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_writer: Option<ParticipantResponse>,
}

fn fmt_time(t: OffsetDateTime) -> String {
    t.format(&Rfc3339).unwrap_or_else(|_| "unknown".to_string())
}

impl GameResponse {
    fn from_game(game: &Game) -> Self {
        // Computed for created games too, so clients can show who opens
        // the story before it starts.
        let next_writer = game.next_writer().ok().map(ParticipantResponse::from);
        Self {
            id: game.id,
            title: game.title.clone(),
            owner_id: game.owner_id,
            status: game.status,
            privacy: game.settings.privacy,
            locale: game.settings.locale.clone(),
            min_words: game.settings.min_words,
            max_words: game.settings.max_words,
            rounds_per_user: game.settings.rounds_per_user,
            words_visible: game.settings.words_visible,
            max_participants: game.settings.max_participants,
            created_at: fmt_time(game.created_at),
            started_at: game.started_at.map(fmt_time),
            ended_at: game.ended_at.map(fmt_time),
            participants: game.participants.iter().map(ParticipantResponse::from).collect(),
            segment_count: game.segments.len(),
            next_writer,
        }
    }
}

/// POST /api/games
async fn create_game(
    current_user: CurrentUser,
    body: web::Json<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let user_id = current_user.id;

    let game = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let user = users::fetch_current(txn, user_id).await?;
            Ok(games::create_game(txn, &user, &body.title, &body.settings).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameResponse::from_game(&game)))
}

/// GET /api/games?scope=ongoing|finished
async fn list_games(
    current_user: CurrentUser,
    query: web::Query<ListGamesQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let scope = match query.scope.as_deref() {
        None | Some("ongoing") => GameScope::Ongoing,
        Some("finished") => GameScope::Finished,
        Some(other) => {
            return Err(AppError::invalid(
                "INVALID_SCOPE",
                format!("Unknown scope '{other}', expected 'ongoing' or 'finished'"),
            ))
        }
    };
    let user_id = current_user.id;

    let list = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(games::list_games(txn, user_id, scope).await?) })
    })
    .await?;

    let response: Vec<GameResponse> = list.iter().map(GameResponse::from_game).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/games/{game_id}
async fn get_game(
    current_user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = game_id.0;

    let game = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(games::get_game(txn, id, user_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from_game(&game)))
}

/// DELETE /api/games/{game_id}
async fn delete_game(
    current_user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = game_id.0;

    with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(games::delete_game(txn, id, user_id).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/games/{game_id}/join
async fn join_game(
    current_user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = game_id.0;

    let (game, event) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let user = users::fetch_current(txn, user_id).await?;
            Ok(games::join_game(txn, id, &user).await?)
        })
    })
    .await?;

    // Dispatch strictly after the commit above.
    app_state.notifier.notify(event);
    Ok(HttpResponse::Ok().json(GameResponse::from_game(&game)))
}

/// POST /api/games/{game_id}/start
async fn start_game(
    current_user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = game_id.0;

    let (game, event) = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(games::start_game(txn, id, user_id).await?) })
    })
    .await?;

    app_state.notifier.notify(event);
    Ok(HttpResponse::Ok().json(GameResponse::from_game(&game)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_game))
            .route(web::get().to(list_games)),
    );
    cfg.service(
        web::resource("/{game_id}")
            .route(web::get().to(get_game))
            .route(web::delete().to(delete_game)),
    );
    cfg.service(web::resource("/{game_id}/join").route(web::post().to(join_game)));
    cfg.service(web::resource("/{game_id}/start").route(web::post().to(start_game)));
}
