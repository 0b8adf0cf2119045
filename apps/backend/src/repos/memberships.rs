//! Membership repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::{memberships_sea as memberships_adapter, users_sea as users_adapter};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// A user bound to a game with a fixed join-order position.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: i64,
    pub game_id: i64,
    pub user_id: i64,
    /// Zero-based join position; defines turn order and is never reused.
    pub position: u32,
    pub username: String,
    pub locale: String,
    pub push_token: Option<String>,
}

/// Append a participant at the given position.
///
/// Position uniqueness is enforced by the schema; a concurrent join that
/// computed the same position loses with a `Conflict`.
pub async fn add_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_id: i64,
    position: u32,
) -> Result<Participant, DomainError> {
    let membership =
        memberships_adapter::create_membership(conn, game_id, user_id, position as i32).await?;
    let user = users_adapter::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("membership {} references missing user {user_id}", membership.id),
            )
        })?;

    Ok(Participant {
        id: membership.id,
        game_id: membership.game_id,
        user_id: membership.user_id,
        position: membership.turn_order as u32,
        username: user.username,
        locale: user.locale,
        push_token: user.push_token,
    })
}

/// Participants of a game ordered by position.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Participant>, DomainError> {
    let rows = memberships_adapter::find_all_by_game(conn, game_id).await?;
    rows.into_iter()
        .map(|(membership, user)| {
            let user = user.ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!(
                        "membership {} references missing user {}",
                        membership.id, membership.user_id
                    ),
                )
            })?;
            Ok(Participant {
                id: membership.id,
                game_id: membership.game_id,
                user_id: membership.user_id,
                position: membership.turn_order as u32,
                username: user.username,
                locale: user.locale,
                push_token: user.push_token,
            })
        })
        .collect()
}
