mod support;

use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use backend::auth::jwt::mint_access_token;
use backend::middleware::request_trace::RequestTrace;
use backend::repos::users::User;
use backend::routes;
use backend::state::app_state::AppState;

use support::{build_test_state, create_user};

fn bearer(state: &AppState, user: &User) -> (&'static str, String) {
    let token = mint_access_token(user.id, SystemTime::now(), &state.security).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

fn create_body(title: &str) -> Value {
    json!({
        "title": title,
        "locale": "en",
        "minWords": 1,
        "maxWords": 100,
        "roundsPerUser": 1,
        "wordsVisible": 0,
        "maxParticipants": 0,
    })
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

#[tokio::test]
async fn health_reports_ok_with_a_live_database() {
    let state = build_test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
}

#[tokio::test]
async fn games_require_a_bearer_token() {
    let state = build_test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/games").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn creating_a_game_returns_the_hydrated_view() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(bearer(&state, &owner))
        .set_json(create_body("Campfire"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "Campfire");
    assert_eq!(body["status"], "CREATED");
    assert_eq!(body["participants"][0]["position"], 0);
    assert_eq!(body["participants"][0]["userId"], owner.id);
    // The opening writer is known before the game starts.
    assert_eq!(body["nextWriter"]["userId"], owner.id);
}

#[tokio::test]
async fn invalid_settings_produce_a_problem_document_with_violations() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(bearer(&state, &owner))
        .set_json(json!({ "title": "", "minWords": 10, "maxWords": 5 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let violations = body["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v == "title_must_be_set"));
    assert!(violations
        .iter()
        .any(|v| v == "max_words_smaller_than_min_words"));
}

#[tokio::test]
async fn joining_twice_over_http_is_a_409_with_a_stable_code() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(bearer(&state, &owner))
        .set_json(create_body("Campfire"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let game_id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/join"))
        .insert_header(bearer(&state, &joiner))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/join"))
        .insert_header(bearer(&state, &joiner))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "ALREADY_JOINED");
}

#[tokio::test]
async fn a_finished_story_reads_back_in_sequence_order() {
    let state = build_test_state().await;
    let owner = create_user(&state, "alice").await;
    let joiner = create_user(&state, "bob").await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(bearer(&state, &owner))
        .set_json(create_body("Campfire"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let game_id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/join"))
        .insert_header(bearer(&state, &joiner))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/start"))
        .insert_header(bearer(&state, &owner))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    for (user, text) in [(&owner, "once upon a time"), (&joiner, "the end")] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/stories"))
            .insert_header(bearer(&state, user))
            .set_json(json!({ "text": text }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/stories"))
        .insert_header(bearer(&state, &owner))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let segments = body.as_array().unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["body"], "once upon a time");
    assert_eq!(segments[1]["body"], "the end");

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}"))
        .insert_header(bearer(&state, &owner))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["status"], "FINISHED");
}
