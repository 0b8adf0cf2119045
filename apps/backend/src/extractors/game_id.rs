use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;

/// Game id from the `{game_id}` path parameter.
///
/// Only syntactic validation happens here; existence is checked by the
/// service inside the request transaction.
#[derive(Debug, Clone, Copy)]
pub struct GameId(pub i64);

impl FromRequest for GameId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = (|| {
            let raw = req
                .match_info()
                .get("game_id")
                .ok_or_else(|| AppError::invalid("INVALID_GAME_ID", "Missing game_id parameter".to_string()))?;
            let game_id: i64 = raw.parse().map_err(|_| {
                AppError::invalid("INVALID_GAME_ID", format!("Invalid game id: {raw}"))
            })?;
            if game_id <= 0 {
                return Err(AppError::invalid(
                    "INVALID_GAME_ID",
                    format!("Game id must be positive, got: {game_id}"),
                ));
            }
            Ok(GameId(game_id))
        })();
        std::future::ready(result)
    }
}
