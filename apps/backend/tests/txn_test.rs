mod support;

use backend::db::txn::with_txn;
use backend::error::AppError;
use backend::repos::users::{self, UserCreate};
use backend_test_support::unique_helpers::unique_str;

use support::build_test_state;

fn user_create(name: &str) -> UserCreate {
    UserCreate {
        sub: unique_str(name),
        username: name.to_string(),
        locale: "en".to_string(),
        push_token: None,
    }
}

#[tokio::test]
async fn commits_on_ok_and_the_write_is_visible_afterwards() {
    let state = build_test_state().await;

    let id = with_txn(&state, |txn| {
        Box::pin(async move {
            let user = users::create_user(txn, user_create("alice")).await?;
            Ok(user.id)
        })
    })
    .await
    .unwrap();

    let found = users::find_by_id(&state.db, id).await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn rolls_back_on_err_and_the_write_disappears() {
    let state = build_test_state().await;
    let sub = unique_str("bob");

    let inner_sub = sub.clone();
    let result: Result<(), AppError> = with_txn(&state, |txn| {
        Box::pin(async move {
            users::create_user(
                txn,
                UserCreate {
                    sub: inner_sub,
                    username: "bob".to_string(),
                    locale: "en".to_string(),
                    push_token: None,
                },
            )
            .await?;
            Err(AppError::internal("abort after write".to_string()))
        })
    })
    .await;
    assert!(result.is_err());

    // The same sub inserts cleanly, so the rolled-back row is gone; a
    // committed first insert would trip the unique constraint here.
    users::create_user(
        &state.db,
        UserCreate {
            sub,
            username: "bob".to_string(),
            locale: "en".to_string(),
            push_token: None,
        },
    )
    .await
    .unwrap();
}
