//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the repos layer converts into
//! `crate::errors::domain::DomainError` here, and higher layers map
//! `DomainError` to `AppError` via `From`.

use tracing::error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        return rest.split('\n').next().map(str::trim);
    }
    None
}

/// Map a SQLite table.column list to a domain-specific conflict.
fn map_sqlite_table_column_to_conflict(
    table_column: &str,
) -> Option<(ConflictKind, &'static str)> {
    if table_column.starts_with("game_players.") {
        if table_column.contains("user_id") {
            return Some((ConflictKind::AlreadyJoined, "User already joined this game"));
        }
        if table_column.contains("turn_order") {
            return Some((
                ConflictKind::TurnOrderTaken,
                "Join position already assigned",
            ));
        }
    }
    if table_column.starts_with("stories.") {
        return Some((
            ConflictKind::SequenceTaken,
            "Segment index already written",
        ));
    }
    None
}

/// Map PostgreSQL constraint names to domain-specific conflicts.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("uq_game_players_game_user") {
        return Some((ConflictKind::AlreadyJoined, "User already joined this game"));
    }
    if error_msg.contains("uq_game_players_game_turn") {
        return Some((
            ConflictKind::TurnOrderTaken,
            "Join position already assigned",
        ));
    }
    if error_msg.contains("uq_stories_game_seq") {
        return Some((
            ConflictKind::SequenceTaken,
            "Segment index already written",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if let sea_orm::DbErr::RecordNotFound(_) = &e {
        return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
    }

    // Unique violations carry the invariant the schema protects: duplicate
    // membership, duplicate join position, duplicate segment index.
    if error_msg.contains("UNIQUE constraint failed")
        || error_msg.contains("duplicate key value violates unique constraint")
    {
        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }
        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(ConflictKind::Other("Unique".into()), "Duplicate record");
    }

    if error_msg.contains("timed out") || error_msg.contains("timeout") {
        error!(%trace_id, "db timeout: {error_msg}");
        return DomainError::infra(InfraErrorKind::Timeout, "Database operation timed out");
    }

    error!(%trace_id, "db error: {error_msg}");
    DomainError::infra(InfraErrorKind::Other("Db".into()), "Database operation failed")
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
