//! User lookup for the HTTP layer.

use sea_orm::ConnectionTrait;

use crate::errors::domain::DomainError;
use crate::repos::users::{self, User};

/// Load the authenticated user's record or fail with `NotFound`.
pub async fn fetch_current<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    users::require_user(conn, user_id).await
}
