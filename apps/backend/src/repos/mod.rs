//! Repository functions for the domain layer.
//!
//! Each module exposes a domain model plus persistence functions generic
//! over `ConnectionTrait`. Database errors surface as `DomainError`.

pub mod games;
pub mod memberships;
pub mod stories;
pub mod users;
