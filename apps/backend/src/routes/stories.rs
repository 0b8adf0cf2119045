//! Story contribution HTTP routes, nested under /api/games/{game_id}.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, GameId};
use crate::repos::stories::Segment;
use crate::services::stories;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitSegmentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResponse {
    pub id: i64,
    pub seq_no: u32,
    pub author_id: i64,
    pub body: String,
    pub created_at: String,
}

impl From<&Segment> for SegmentResponse {
    fn from(s: &Segment) -> Self {
        Self {
            id: s.id,
            seq_no: s.seq_no,
            author_id: s.author_id,
            body: s.body.clone(),
            created_at: s
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSegmentResponse {
    pub segment: SegmentResponse,
    pub game_status: crate::entities::games::GameStatus,
}

#[derive(Debug, Serialize)]
pub struct VisibleTextResponse {
    pub text: String,
}

/// POST /api/games/{game_id}/stories
async fn submit_segment(
    current_user: CurrentUser,
    game_id: GameId,
    body: web::Json<SubmitSegmentRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = game_id.0;
    let text = body.into_inner().text;

    let (game, segment, event) = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(stories::submit_segment(txn, id, user_id, &text).await?) })
    })
    .await?;

    // Dispatch strictly after the commit above.
    app_state.notifier.notify(event);
    Ok(HttpResponse::Created().json(SubmitSegmentResponse {
        segment: SegmentResponse::from(&segment),
        game_status: game.status,
    }))
}

/// GET /api/games/{game_id}/stories
async fn list_segments(
    current_user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = game_id.0;

    let segments = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(stories::list_segments(txn, id, user_id).await?) })
    })
    .await?;

    let response: Vec<SegmentResponse> = segments.iter().map(SegmentResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/games/{game_id}/stories/visible
async fn visible_text(
    current_user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = game_id.0;

    let text = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(stories::visible_text(txn, id, user_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(VisibleTextResponse { text }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{game_id}/stories")
            .route(web::post().to(submit_segment))
            .route(web::get().to(list_segments)),
    );
    cfg.service(web::resource("/{game_id}/stories/visible").route(web::get().to(visible_text)));
}
