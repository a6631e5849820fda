//! Authentication flow behavior tests

use crate::domain::entities::verification_code::CodePurpose;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::UserRepository;
use crate::services::token::TokenServiceConfig;
use crate::services::verification::VerificationServiceConfig;

use super::mocks::Harness;

#[tokio::test]
async fn test_register_creates_unverified_user() {
    let h = Harness::new();

    let outcome = h.auth.register("alice@x.com", "alice").await.unwrap();
    assert_eq!(outcome.email, "alice@x.com");
    assert_eq!(outcome.username, "alice");

    let user = h.users.find_by_id(outcome.user_id).await.unwrap().unwrap();
    assert!(!user.verified);
    assert!(user.referral_code.starts_with("CHESS-"));

    let message = h.mailer.last_message().unwrap();
    assert_eq!(message.email, "alice@x.com");
    assert_eq!(message.purpose, CodePurpose::Registration);
    assert_eq!(message.display_name.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_register_verified_email_is_rejected() {
    let h = Harness::new();

    let outcome = h.auth.register("alice@x.com", "alice").await.unwrap();
    h.auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    let result = h.auth.register("alice@x.com", "alice2").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailExists))
    ));

    // the original user is untouched
    let user = h.users.find_by_id(outcome.user_id).await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn test_register_unverified_email_reuses_user() {
    let h = Harness::new();

    let first = h.auth.register("alice@x.com", "alice").await.unwrap();
    let second = h.auth.register("alice@x.com", "alice_new").await.unwrap();

    assert_eq!(first.user_id, second.user_id);
    assert_eq!(second.username, "alice_new");

    let user = h.users.find_by_id(first.user_id).await.unwrap().unwrap();
    assert_eq!(user.username, "alice_new");
}

#[tokio::test]
async fn test_register_taken_username_is_rejected() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    h.auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    let result = h.auth.register("bob@x.com", "alice").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UsernameTaken))
    ));
}

#[tokio::test]
async fn test_register_email_precedence_over_username() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    h.auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    // Both the email and the username are taken by a verified user; the
    // email error wins.
    let result = h.auth.register("alice@x.com", "alice").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailExists))
    ));
}

#[tokio::test]
async fn test_register_delivery_failure_propagates() {
    let h = Harness::new();
    h.mailer.set_failing(true);

    let result = h.auth.register("alice@x.com", "alice").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailDeliveryFailure))
    ));
}

#[tokio::test]
async fn test_verify_marks_verified_and_issues_token() {
    let h = Harness::new();

    let outcome = h.auth.register("alice@x.com", "alice").await.unwrap();
    let session = h
        .auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    assert!(session.user.verified);
    assert_eq!(session.user.id, outcome.user_id);

    let user = h.users.find_by_id(outcome.user_id).await.unwrap().unwrap();
    assert!(user.verified);
    assert!(user.last_login_at.is_some());

    // the issued token passes the session gate
    let authenticated = h.auth.authenticate(&session.token).await.unwrap();
    assert_eq!(authenticated.id, outcome.user_id);
}

#[tokio::test]
async fn test_verify_wrong_code_is_rejected() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    let correct = h.last_code();
    let wrong = if correct == "999999" { "999998" } else { "999999" };

    let result = h.auth.verify_code("alice@x.com", wrong).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCode))
    ));

    // a later attempt with the correct code still succeeds
    h.auth.verify_code("alice@x.com", &correct).await.unwrap();
}

#[tokio::test]
async fn test_verify_locks_after_three_failures() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    let correct = h.last_code();
    let wrong = if correct == "999999" { "999998" } else { "999999" };

    for _ in 0..3 {
        let result = h.auth.verify_code("alice@x.com", wrong).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCode))
        ));
    }

    let result = h.auth.verify_code("alice@x.com", &correct).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::TooManyAttempts))
    ));
}

#[tokio::test]
async fn test_verify_consumed_code_cannot_be_reused() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    let code = h.last_code();
    h.auth.verify_code("alice@x.com", &code).await.unwrap();

    let result = h.auth.verify_code("alice@x.com", &code).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCode))
    ));
}

#[tokio::test]
async fn test_verify_expired_code() {
    let h = Harness::with_configs(
        VerificationServiceConfig {
            code_expiration_minutes: 0,
            ..Default::default()
        },
        TokenServiceConfig::default(),
    );

    h.auth.register("alice@x.com", "alice").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let result = h.auth.verify_code("alice@x.com", &h.last_code()).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeExpired))
    ));
}

#[tokio::test]
async fn test_resend_requires_existing_user() {
    let h = Harness::new();

    let result = h.auth.resend_code("nobody@x.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_resend_within_cooldown_is_rejected() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();

    // registration just issued a code, so an immediate resend is inside the
    // 2-minute window
    let result = h.auth.resend_code("alice@x.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::RateLimitExceeded { .. }))
    ));
}

#[tokio::test]
async fn test_resend_outside_cooldown_issues_new_code() {
    let h = Harness::without_cooldown();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    let first_code = h.last_code();

    let dispatch = h.auth.resend_code("alice@x.com").await.unwrap();
    assert_eq!(dispatch.email, "alice@x.com");
    assert_eq!(h.mailer.sent_count(), 2);

    // the resent code supersedes the first one
    let second_code = h.last_code();
    if first_code != second_code {
        let result = h.auth.verify_code("alice@x.com", &first_code).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCode))
        ));
    }
    h.auth.verify_code("alice@x.com", &second_code).await.unwrap();
}

#[tokio::test]
async fn test_login_requires_existing_user() {
    let h = Harness::new();

    let result = h.auth.login("nobody@x.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_login_requires_verified_email() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();

    let result = h.auth.login("alice@x.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailNotVerified))
    ));
}

#[tokio::test]
async fn test_login_issues_login_code_and_invalidates_leftovers() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    h.auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    // login has no cooldown check even right after verification
    let dispatch = h.auth.login("alice@x.com").await.unwrap();
    assert_eq!(dispatch.email, "alice@x.com");

    let message = h.mailer.last_message().unwrap();
    assert_eq!(message.purpose, CodePurpose::Login);

    // only the login code is usable now
    assert_eq!(h.codes.count_for_email("alice@x.com").await, 1);
    let session = h
        .auth
        .verify_code("alice@x.com", &message.code)
        .await
        .unwrap();
    assert!(session.user.verified);
}

#[tokio::test]
async fn test_refresh_rejects_garbage_token() {
    let h = Harness::new();

    let result = h.auth.refresh_token("garbage.token.here").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[tokio::test]
async fn test_refresh_rejects_deleted_user() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    let session = h
        .auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    h.users.delete(session.user.id).await.unwrap();

    let result = h.auth.refresh_token(&session.token).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_refresh_accepts_expired_token() {
    let h = Harness::with_configs(
        VerificationServiceConfig::default(),
        TokenServiceConfig {
            token_expiry_days: -1,
            ..Default::default()
        },
    );

    h.auth.register("alice@x.com", "alice").await.unwrap();
    let session = h
        .auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    // the session token is already expired, but refresh still honors it
    assert!(matches!(
        h.auth.authenticate(&session.token).await,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));

    let refreshed = h.auth.refresh_token(&session.token).await.unwrap();
    assert!(!refreshed.token.is_empty());
}

#[tokio::test]
async fn test_authenticate_requires_verified_user() {
    let h = Harness::new();

    let outcome = h.auth.register("alice@x.com", "alice").await.unwrap();

    // forge a valid token for the still-unverified user
    let (token, _) = h.tokens.issue_token(outcome.user_id).unwrap();

    let result = h.auth.authenticate(&token).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailNotVerified))
    ));
}

#[tokio::test]
async fn test_authenticate_rejects_deleted_user() {
    let h = Harness::new();

    h.auth.register("alice@x.com", "alice").await.unwrap();
    let session = h
        .auth
        .verify_code("alice@x.com", &h.last_code())
        .await
        .unwrap();

    h.users.delete(session.user.id).await.unwrap();

    let result = h.auth.authenticate(&session.token).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
