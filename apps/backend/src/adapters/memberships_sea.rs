//! SeaORM adapter for game memberships - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{game_players, users};

/// Insert a membership at the given turn order.
///
/// The unique (game_id, turn_order) index resolves races between
/// concurrent joins; the loser surfaces a unique violation.
pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
    turn_order: i32,
) -> Result<game_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let membership = game_players::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        user_id: Set(user_id),
        turn_order: Set(turn_order),
        created_at: Set(now),
    };
    membership.insert(conn).await
}

/// Memberships with their user records, ordered by join position.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<(game_players::Model, Option<users::Model>)>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .order_by_asc(game_players::Column::TurnOrder)
        .find_also_related(users::Entity)
        .all(conn)
        .await
}
