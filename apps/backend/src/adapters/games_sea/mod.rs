//! SeaORM adapter for the games table - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, NotSet, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::games::GameStatus;
use crate::entities::{game_players, games};

pub mod dto;

pub use dto::{GameCreate, StatusTransition};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .one(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        owner_id: Set(dto.owner_id),
        status: Set(GameStatus::Created),
        privacy: Set(dto.settings.privacy),
        locale: Set(dto.settings.locale),
        min_words: Set(dto.settings.min_words as i32),
        max_words: Set(dto.settings.max_words as i32),
        rounds_per_user: Set(dto.settings.rounds_per_user as i32),
        words_visible: Set(dto.settings.words_visible as i32),
        max_participants: Set(dto.settings.max_participants as i32),
        created_at: Set(now),
        updated_at: Set(now),
        started_at: NotSet,
        ended_at: NotSet,
    };

    game_active.insert(conn).await
}

/// Apply a status transition guarded by the expected current status.
///
/// Returns false when zero rows matched, i.e. the game is absent or its
/// status moved on since the caller loaded it.
pub async fn transition_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StatusTransition,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let mut update = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::val(dto.next).into())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into());

    match dto.next {
        GameStatus::Started => {
            update = update.col_expr(games::Column::StartedAt, Expr::val(Some(now)).into());
        }
        GameStatus::Finished => {
            update = update.col_expr(games::Column::EndedAt, Expr::val(Some(now)).into());
        }
        GameStatus::Created => {}
    }

    let result = update
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::Status.eq(dto.expected))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Delete a game if and only if `owner_id` owns it.
///
/// Participants and segments cascade via foreign keys. Returns false when
/// zero rows matched (absent game or wrong owner).
pub async fn delete_game_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    owner_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = games::Entity::delete_many()
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::OwnerId.eq(owner_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

/// All games the user participates in whose status is in `statuses`.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    statuses: &[GameStatus],
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .join(JoinType::InnerJoin, games::Relation::GamePlayers.def())
        .filter(game_players::Column::UserId.eq(user_id))
        .filter(games::Column::Status.is_in(statuses.iter().copied()))
        .order_by_asc(games::Column::CreatedAt)
        .all(conn)
        .await
}
