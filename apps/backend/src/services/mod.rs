//! Service layer: orchestration over repos and domain rules.
//!
//! Services are free functions generic over `ConnectionTrait`; handlers
//! run them inside `with_txn` and dispatch any returned event after the
//! commit.

pub mod games;
pub mod stories;
pub mod users;
