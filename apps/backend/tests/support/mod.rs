#![allow(dead_code)] // not every suite uses every fixture

//! Shared fixtures for the integration suites.
//!
//! Every test gets its own in-memory SQLite database brought up through
//! the real migrations, so the unique constraints and cascades behave as
//! they do in production.

use backend::domain::SettingsDraft;
use backend::infra::db::connect_db;
use backend::repos::users::{self, User, UserCreate};
use backend::state::app_state::AppState;
use backend_test_support::unique_helpers::unique_str;
use migration::{Migrator, MigratorTrait};

#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}

pub async fn build_test_state() -> AppState {
    let db = connect_db("sqlite::memory:")
        .await
        .expect("sqlite connect failed");
    Migrator::up(&db, None).await.expect("migrations failed");
    AppState::for_tests(db)
}

pub async fn create_user(state: &AppState, name: &str) -> User {
    users::create_user(
        &state.db,
        UserCreate {
            sub: unique_str(name),
            username: name.to_string(),
            locale: "en".to_string(),
            push_token: None,
        },
    )
    .await
    .expect("user creation failed")
}

/// A draft that passes validation: 1..100 words, one round each, full
/// history visible, unlimited participants.
pub fn default_draft() -> SettingsDraft {
    SettingsDraft {
        locale: Some("en".to_string()),
        privacy: None,
        min_words: Some(1),
        max_words: Some(100),
        rounds_per_user: Some(1),
        words_visible: Some(0),
        max_participants: Some(0),
    }
}
