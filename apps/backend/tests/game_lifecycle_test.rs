mod support;

use backend::domain::settings;
use backend::domain::SettingsDraft;
use backend::entities::games::GameStatus;
use backend::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};
use backend::notifications::GameEvent;
use backend::repos::memberships;
use backend::services::games::{self, GameScope};

use support::{build_test_state, create_user, default_draft};

#[tokio::test]
async fn create_joins_the_owner_at_position_zero() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();

    assert_eq!(game.status, GameStatus::Created);
    assert_eq!(game.owner_id, owner.id);
    assert_eq!(game.participants.len(), 1);
    assert_eq!(game.participants[0].user_id, owner.id);
    assert_eq!(game.participants[0].position, 0);
}

#[tokio::test]
async fn create_reports_every_violated_settings_rule() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;

    let draft = SettingsDraft {
        min_words: Some(10),
        max_words: Some(5),
        locale: None,
        ..default_draft()
    };
    let err = games::create_game(&state.db, &owner, "", &draft)
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(ValidationKind::Settings(codes), _) => {
            assert!(codes.contains(&settings::MAX_WORDS_SMALLER_THAN_MIN_WORDS));
            assert!(codes.contains(&settings::LANGUAGE_MUST_BE_SELECTED));
            assert!(codes.contains(&settings::TITLE_MUST_BE_SET));
        }
        other => panic!("expected settings violations, got {other:?}"),
    }
}

#[tokio::test]
async fn join_assigns_the_next_position_and_notifies_the_owner() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();
    let (game, event) = games::join_game(&state.db, game.id, &joiner).await.unwrap();

    assert_eq!(game.participants.len(), 2);
    assert_eq!(game.participants[1].user_id, joiner.id);
    assert_eq!(game.participants[1].position, 1);
    match event {
        GameEvent::UserJoined {
            owner: o,
            joined,
            participant_count,
            ..
        } => {
            assert_eq!(o.id, owner.id);
            assert_eq!(joined.id, joiner.id);
            assert_eq!(participant_count, 2);
        }
        other => panic!("expected UserJoined, got {other:?}"),
    }
}

#[tokio::test]
async fn joining_twice_is_a_conflict() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();
    games::join_game(&state.db, game.id, &joiner).await.unwrap();

    let err = games::join_game(&state.db, game.id, &joiner)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyJoined, _)
    ));
}

#[tokio::test]
async fn the_owner_rejoining_is_a_conflict_too() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();
    let err = games::join_game(&state.db, game.id, &owner)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyJoined, _)
    ));
}

#[tokio::test]
async fn concurrent_joins_are_settled_by_the_schema() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let second = create_user(&state, "bob").await;
    let third = create_user(&state, "carol").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();

    // Two joins that both computed position 1; the second loses on the
    // (game_id, turn_order) unique index.
    memberships::add_participant(&state.db, game.id, second.id, 1)
        .await
        .unwrap();
    let err = memberships::add_participant(&state.db, game.id, third.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::TurnOrderTaken, _)
    ));

    // The same user again, at a fresh position, loses on the
    // (game_id, user_id) unique index.
    let err = memberships::add_participant(&state.db, game.id, second.id, 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyJoined, _)
    ));
}

#[tokio::test]
async fn a_full_game_rejects_joins() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let second = create_user(&state, "bob").await;
    let third = create_user(&state, "carol").await;

    let draft = SettingsDraft {
        max_participants: Some(2),
        ..default_draft()
    };
    let game = games::create_game(&state.db, &owner, "Campfire", &draft)
        .await
        .unwrap();
    games::join_game(&state.db, game.id, &second).await.unwrap();

    let err = games::join_game(&state.db, game.id, &third)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::GameFull, _)
    ));
}

#[tokio::test]
async fn start_requires_the_owner_and_two_participants() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();

    // Alone, even the owner cannot start.
    let err = games::start_game(&state.db, game.id, owner.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::TooFewParticipants, _)
    ));

    games::join_game(&state.db, game.id, &joiner).await.unwrap();

    let err = games::start_game(&state.db, game.id, joiner.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::NotOwner, _)
    ));

    let (game, event) = games::start_game(&state.db, game.id, owner.id)
        .await
        .unwrap();
    assert_eq!(game.status, GameStatus::Started);
    assert!(game.started_at.is_some());
    match event {
        GameEvent::StoryStarted {
            next_writer,
            participants,
            ..
        } => {
            assert_eq!(next_writer.id, owner.id);
            assert_eq!(participants.len(), 2);
        }
        other => panic!("expected StoryStarted, got {other:?}"),
    }
}

#[tokio::test]
async fn starting_twice_is_forbidden() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();
    games::join_game(&state.db, game.id, &joiner).await.unwrap();
    games::start_game(&state.db, game.id, owner.id).await.unwrap();

    let err = games::start_game(&state.db, game.id, owner.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::AlreadyStarted, _)
    ));
}

#[tokio::test]
async fn joining_a_started_game_is_forbidden() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;
    let latecomer = create_user(&state, "carol").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();
    games::join_game(&state.db, game.id, &joiner).await.unwrap();
    games::start_game(&state.db, game.id, owner.id).await.unwrap();

    let err = games::join_game(&state.db, game.id, &latecomer)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::AlreadyStarted, _)
    ));
}

#[tokio::test]
async fn only_the_owner_can_delete() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;

    let game = games::create_game(&state.db, &owner, "Campfire", &default_draft())
        .await
        .unwrap();
    games::join_game(&state.db, game.id, &joiner).await.unwrap();

    let err = games::delete_game(&state.db, game.id, joiner.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::NotOwner, _)
    ));

    games::delete_game(&state.db, game.id, owner.id).await.unwrap();

    let err = games::get_game(&state.db, game.id, owner.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_, _)));
}

#[tokio::test]
async fn listing_separates_ongoing_from_finished() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let other = create_user(&state, "bob").await;

    let first = games::create_game(&state.db, &owner, "First", &default_draft())
        .await
        .unwrap();
    games::create_game(&state.db, &other, "Not mine", &default_draft())
        .await
        .unwrap();

    let ongoing = games::list_games(&state.db, owner.id, GameScope::Ongoing)
        .await
        .unwrap();
    assert_eq!(ongoing.len(), 1);
    assert_eq!(ongoing[0].id, first.id);

    let finished = games::list_games(&state.db, owner.id, GameScope::Finished)
        .await
        .unwrap();
    assert!(finished.is_empty());
}
