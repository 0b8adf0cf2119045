//! SeaORM query adapters, one module per aggregate.
//!
//! Adapter functions return `DbErr`; the repos layer maps to `DomainError`
//! via `From<DbErr>`.

pub mod games_sea;
pub mod memberships_sea;
pub mod stories_sea;
pub mod users_sea;
