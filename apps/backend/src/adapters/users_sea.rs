//! SeaORM adapter for the users table - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::users;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Id.eq(user_id))
        .one(conn)
        .await
}

/// DTO for creating a user record.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub sub: String,
    pub username: String,
    pub locale: String,
    pub push_token: Option<String>,
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        id: NotSet,
        sub: Set(dto.sub),
        username: Set(dto.username),
        locale: Set(dto.locale),
        push_token: Set(dto.push_token),
        created_at: Set(now),
        updated_at: Set(now),
    };
    user.insert(conn).await
}
