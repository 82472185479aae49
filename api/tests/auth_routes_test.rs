//! HTTP tests for registration and login

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use tally_api::create_app;
use tally_core::services::LockState;

use common::app_state;

#[actix_web::test]
async fn test_register_success() {
    let (state, _) = app_state(Some(3600));
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "alice", "password": "pw1", "role": "client"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User registered");
}

#[actix_web::test]
async fn test_register_duplicate_and_invalid_role() {
    let (state, _) = app_state(Some(3600));
    state
        .auth_service
        .register("alice", "pw1", "client")
        .await
        .unwrap();
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "alice", "password": "x", "role": "client"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "duplicate_username");

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "dave", "password": "pw", "role": "superuser"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_role");
}

#[actix_web::test]
async fn test_register_malformed_body() {
    let (state, _) = app_state(Some(3600));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
}

#[actix_web::test]
async fn test_login_returns_bearer_token() {
    let (state, _) = app_state(Some(3600));
    state
        .auth_service
        .register("olga", "pw", "operator")
        .await
        .unwrap();
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "olga", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["role"], "operator");

    let token = body["token"].as_str().unwrap();
    let identity = state.auth_service.authorize(token).unwrap();
    assert_eq!(identity.username, "olga");
}

#[actix_web::test]
async fn test_login_unknown_user_is_not_found() {
    let (state, _) = app_state(Some(3600));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "ghost", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_lockout_statuses() {
    let (state, _) = app_state(Some(3600));
    state
        .auth_service
        .register("alice", "pw1", "client")
        .await
        .unwrap();
    let app = test::init_service(create_app(state.clone())).await;

    let attempts = [
        ("bad", StatusCode::BAD_REQUEST, "invalid_credentials"),
        ("bad", StatusCode::BAD_REQUEST, "invalid_credentials"),
        ("bad", StatusCode::FORBIDDEN, "account_locked_now"),
        ("pw1", StatusCode::FORBIDDEN, "account_locked"),
    ];

    for (password, status, code) in attempts {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"username": "alice", "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], code);
    }

    assert_eq!(
        state.auth_service.lock_state("alice").await.unwrap(),
        LockState::Locked
    );
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let (state, _) = app_state(Some(3600));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
