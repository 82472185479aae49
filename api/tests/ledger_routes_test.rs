//! HTTP tests for balance and deposit

mod common;

use actix_web::{http::header, http::StatusCode, test};
use serde_json::{json, Value};

use tally_api::create_app;

use common::app_state;

#[actix_web::test]
async fn test_balance_and_deposits() {
    let (state, _) = app_state(Some(3600));
    state.auth_service.register("bob", "pw", "client").await.unwrap();
    let token = state.auth_service.login("bob", "pw").await.unwrap().token;
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/balance")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["balance"].as_f64(), Some(0.0));

    for (value, expected) in [(json!(100.5), 100.5), (json!(25), 125.5)] {
        let req = test::TestRequest::post()
            .uri("/deposit")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(json!({ "value": value }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["new_balance"].as_f64(), Some(expected));
    }

    let req = test::TestRequest::get()
        .uri("/balance")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["balance"].as_f64(), Some(125.5));
}

#[actix_web::test]
async fn test_negative_deposit_rejected() {
    let (state, _) = app_state(Some(3600));
    state.auth_service.register("bob", "pw", "client").await.unwrap();
    let token = state.auth_service.login("bob", "pw").await.unwrap().token;
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/deposit")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(json!({"value": -5}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_amount");
}

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let (state, _) = app_state(Some(3600));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/balance").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");

    let req = test::TestRequest::post()
        .uri("/deposit")
        .set_json(json!({"value": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_tampered_token_is_forbidden() {
    let (state, _) = app_state(Some(3600));
    state.auth_service.register("bob", "pw", "client").await.unwrap();
    let token = state.auth_service.login("bob", "pw").await.unwrap().token;
    let app = test::init_service(create_app(state)).await;

    // Swap the first character of the signature.
    let dot = token.rfind('.').unwrap();
    let first = &token[dot + 1..dot + 2];
    let replacement = if first == "A" { "B" } else { "A" };
    let tampered = format!("{}{}{}", &token[..=dot], replacement, &token[dot + 2..]);

    let req = test::TestRequest::get()
        .uri("/balance")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tampered)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_token");
}

#[actix_web::test]
async fn test_expired_token_is_unauthorized() {
    let (state, clock) = app_state(Some(60));
    state.auth_service.register("bob", "pw", "client").await.unwrap();
    let token = state.auth_service.login("bob", "pw").await.unwrap().token;
    let app = test::init_service(create_app(state)).await;

    clock.advance(120);

    let req = test::TestRequest::post()
        .uri("/deposit")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(json!({"value": 10}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "token_expired");
}

#[actix_web::test]
async fn test_lowercase_bearer_scheme_accepted() {
    let (state, _) = app_state(Some(3600));
    state.auth_service.register("bob", "pw", "client").await.unwrap();
    let token = state.auth_service.login("bob", "pw").await.unwrap().token;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/balance")
        .insert_header((header::AUTHORIZATION, format!("bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
