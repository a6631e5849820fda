//! End-to-end tests for the authentication flow over HTTP

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::TestContext;

#[actix_web::test]
async fn test_register_returns_201_with_code_expiry() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "alice@x.com", "username": "alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "alice@x.com");
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"]["user_id"].is_string());
    assert!(body["data"]["code_expires_at"].is_string());

    // a code was dispatched
    assert_eq!(ctx.mailer.get_message_count(), 1);
}

#[actix_web::test]
async fn test_register_rejects_bad_payload() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "not-an-email", "username": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"].get("email").is_some());
    assert!(body["details"].get("username").is_some());

    // nothing was dispatched
    assert_eq!(ctx.mailer.get_message_count(), 0);
}

#[actix_web::test]
async fn test_register_conflict_on_verified_email() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();
    ctx.auth_service
        .verify_code("alice@x.com", &ctx.last_code_for("alice@x.com"))
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "alice@x.com", "username": "someone_else"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "EMAIL_EXISTS");
}

#[actix_web::test]
async fn test_full_flow_register_verify_me() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    // register
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "alice@x.com", "username": "alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // verify with the emailed code
    let code = ctx.last_code_for("alice@x.com");
    let req = test::TestRequest::post()
        .uri("/api/auth/verify")
        .set_json(json!({"email": "alice@x.com", "code": code}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["verified"], true);

    // the token opens the protected profile route
    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@x.com");
}

#[actix_web::test]
async fn test_verify_wrong_code_is_401() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();
    let correct = ctx.last_code_for("alice@x.com");
    let wrong = if correct == "999999" { "999998" } else { "999999" };

    let req = test::TestRequest::post()
        .uri("/api/auth/verify")
        .set_json(json!({"email": "alice@x.com", "code": wrong}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_CODE");
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_resend_unknown_user_is_404() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-code")
        .set_json(json!({"email": "nobody@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[actix_web::test]
async fn test_resend_inside_cooldown_is_429() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-code")
        .set_json(json!({"email": "alice@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "RATE_LIMIT_EXCEEDED");
}

#[actix_web::test]
async fn test_resend_outside_cooldown_succeeds() {
    let ctx = TestContext::without_cooldown();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-code")
        .set_json(json!({"email": "alice@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "alice@x.com");
    assert_eq!(ctx.mailer.get_message_count(), 2);
}

#[actix_web::test]
async fn test_login_unverified_user_is_400() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "alice@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "EMAIL_NOT_VERIFIED");
}

#[actix_web::test]
async fn test_login_then_verify_opens_session() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();
    ctx.auth_service
        .verify_code("alice@x.com", &ctx.last_code_for("alice@x.com"))
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "alice@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let code = ctx.last_code_for("alice@x.com");
    let req = test::TestRequest::post()
        .uri("/api/auth/verify")
        .set_json(json!({"email": "alice@x.com", "code": code}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["token"].is_string());
}

#[actix_web::test]
async fn test_refresh_without_header_is_401() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    let req = test::TestRequest::post().uri("/api/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MISSING_TOKEN");
}

#[actix_web::test]
async fn test_refresh_with_garbage_token_is_401() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[actix_web::test]
async fn test_refresh_returns_fresh_token() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();
    let session = ctx
        .auth_service
        .verify_code("alice@x.com", &ctx.last_code_for("alice@x.com"))
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("Authorization", format!("Bearer {}", session.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["expires_at"].is_string());
}

#[actix_web::test]
async fn test_refresh_for_deleted_user_is_401() {
    let ctx = TestContext::new();
    let app = test_app!(&ctx);

    ctx.auth_service.register("alice@x.com", "alice").await.unwrap();
    let session = ctx
        .auth_service
        .verify_code("alice@x.com", &ctx.last_code_for("alice@x.com"))
        .await
        .unwrap();

    use c2e_core::repositories::UserRepository;
    ctx.users.delete(session.user.id).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/refresh")
        .insert_header(("Authorization", format!("Bearer {}", session.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "USER_NOT_FOUND");
}
