//! SeaORM adapter for story segments - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::stories;

/// Append a segment at the given sequence index.
///
/// The unique (game_id, seq_no) index settles concurrent submissions for
/// the same index; exactly one insert can win.
pub async fn create_segment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seq_no: i32,
    author_id: i64,
    body: String,
) -> Result<stories::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let segment = stories::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        seq_no: Set(seq_no),
        author_id: Set(author_id),
        body: Set(body),
        created_at: Set(now),
    };
    segment.insert(conn).await
}

/// The full segment sequence of a game in index order.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<stories::Model>, sea_orm::DbErr> {
    stories::Entity::find()
        .filter(stories::Column::GameId.eq(game_id))
        .order_by_asc(stories::Column::SeqNo)
        .all(conn)
        .await
}
