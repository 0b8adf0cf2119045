//! Story segment repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::stories_sea as stories_adapter;
use crate::errors::domain::DomainError;

/// One player's text addition to the shared story, at a fixed sequence index.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: i64,
    pub game_id: i64,
    /// Zero-based index, strictly increasing in creation order.
    pub seq_no: u32,
    pub author_id: i64,
    pub body: String,
    pub created_at: OffsetDateTime,
}

pub async fn append_segment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seq_no: u32,
    author_id: i64,
    body: String,
) -> Result<Segment, DomainError> {
    let segment =
        stories_adapter::create_segment(conn, game_id, seq_no as i32, author_id, body).await?;
    Ok(Segment::from(segment))
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Segment>, DomainError> {
    let segments = stories_adapter::find_all_by_game(conn, game_id).await?;
    Ok(segments.into_iter().map(Segment::from).collect())
}

impl From<crate::entities::stories::Model> for Segment {
    fn from(model: crate::entities::stories::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            seq_no: model.seq_no as u32,
            author_id: model.author_id,
            body: model.body,
            created_at: model.created_at,
        }
    }
}
