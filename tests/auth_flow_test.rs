//! Login, forgot-password and reset-password flows against in-memory stores.

mod common;

use std::sync::Arc;

use common::{config, InMemoryStore, RecordingNotifier, FRONTEND_URL};
use edl_backend::config::{FORGOT_PASSWORD_MESSAGE, RESET_PASSWORD_MESSAGE};
use edl_backend::errors::AppError;
use edl_backend::infra::NotifierResult;
use edl_backend::services::{AuthService, Authenticator};

const NEW_PASSWORD: &str = "NewSecure#2024";

struct Harness {
    store: InMemoryStore,
    notifier: Arc<RecordingNotifier>,
    auth: Authenticator<InMemoryStore>,
}

fn harness(environment: &str, delivery: NotifierResult) -> Harness {
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::new(delivery);
    let auth = Authenticator::new(
        Arc::new(store.clone()),
        &config(environment),
        notifier.clone(),
    );
    Harness {
        store,
        notifier,
        auth,
    }
}

fn production() -> Harness {
    harness("production", NotifierResult::Sent)
}

/// Request a reset for `username` and return the emailed token.
async fn issue_token(h: &Harness, username: &str) -> String {
    h.auth.forgot_password(username.into()).await.unwrap();
    h.notifier.last_token()
}

#[tokio::test]
async fn test_legacy_login_migrates_to_hash() {
    let h = production();
    h.store.add_user("admin", "admin123", None);

    let response = h.auth.login("admin".into(), "admin123".into()).await.unwrap();
    assert_eq!(response.user.username, "admin");
    assert!(!response.token.is_empty());

    let stored = h.store.stored_password("admin");
    assert_ne!(stored, "admin123");
    assert!(stored.starts_with("$argon2"));

    // Second login goes through the hashed path
    let outcome = h.auth.authenticate("admin", "admin123").await.unwrap();
    assert!(!outcome.migrated);
    assert_eq!(h.store.stored_password("admin"), stored);
}

#[tokio::test]
async fn test_check_login_reports_migration_once() {
    let h = production();
    h.store.add_user("operator", "Legacy#Pass1", None);

    assert!(h.auth.authenticate("operator", "Legacy#Pass1").await.unwrap().migrated);
    assert!(!h.auth.authenticate("operator", "Legacy#Pass1").await.unwrap().migrated);
}

#[tokio::test]
async fn test_wrong_password_leaves_legacy_credential() {
    let h = production();
    h.store.add_user("admin", "admin123", None);

    let result = h.auth.login("admin".into(), "wrong".into()).await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
    assert_eq!(h.store.stored_password("admin"), "admin123");
}

#[tokio::test]
async fn test_unknown_user_matches_wrong_password_error() {
    let h = production();
    h.store.add_user("admin", "admin123", None);

    let unknown = h.auth.login("ghost".into(), "admin123".into()).await.unwrap_err();
    let wrong = h.auth.login("admin".into(), "nope".into()).await.unwrap_err();

    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(unknown.status(), wrong.status());
}

#[tokio::test]
async fn test_empty_stored_password_is_configuration_error() {
    let h = production();
    h.store.add_user("broken", "", None);

    let result = h.auth.login("broken".into(), "anything".into()).await;
    assert!(matches!(result, Err(AppError::Configuration(_))));
}

#[tokio::test]
async fn test_missing_login_fields_rejected() {
    let h = production();

    let result = h.auth.login("".into(), "x".into()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_session_token_carries_user() {
    let h = production();
    let id = h.store.add_user("agomez", "Secure#2024", None);

    let response = h.auth.login("agomez".into(), "Secure#2024".into()).await.unwrap();
    let claims = h.auth.verify_token(&response.token).unwrap();

    assert_eq!(claims.id, id);
    assert_eq!(claims.username, "agomez");
    assert_eq!(response.user.display_name, "agomez Full Name");
}

#[tokio::test]
async fn test_forgot_password_same_reply_for_unknown_and_known() {
    let h = production();
    h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let known = h.auth.forgot_password("admin".into()).await.unwrap();
    let unknown = h.auth.forgot_password("ghost".into()).await.unwrap();

    assert_eq!(known.message, FORGOT_PASSWORD_MESSAGE);
    assert_eq!(unknown.message, known.message);
    assert!(known.reset_link.is_none());
    assert!(unknown.reset_link.is_none());
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_reset_email_contents() {
    let h = production();
    let id = h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let token = issue_token(&h, "admin").await;
    let sent = h.notifier.sent();

    assert_eq!(sent[0].to, "admin@example.com");
    assert_eq!(sent[0].display_name, "admin Full Name");
    assert_eq!(
        sent[0].reset_link,
        format!("{}/forgot-password?token={}", FRONTEND_URL, token)
    );
    assert_eq!(token.len(), 64);

    // Only the digest is stored
    let stored = h.store.tokens_for(id);
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0].token_digest, token);
    assert_eq!(stored[0].expires_at - stored[0].created_at, chrono::Duration::minutes(15));
}

#[tokio::test]
async fn test_development_echoes_link_when_not_sent() {
    let h = harness("development", NotifierResult::NotConfigured);
    h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let response = h.auth.forgot_password("admin".into()).await.unwrap();
    let link = response.reset_link.expect("link echoed in development");
    assert!(link.starts_with(&format!("{}/forgot-password?token=", FRONTEND_URL)));

    let unknown = h.auth.forgot_password("ghost".into()).await.unwrap();
    assert!(unknown.reset_link.is_none());
}

#[tokio::test]
async fn test_development_echoes_link_after_failed_delivery() {
    let h = harness("development", NotifierResult::Failed("relay refused".into()));
    h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let response = h.auth.forgot_password("admin".into()).await.unwrap();
    assert!(response.reset_link.is_some());
}

#[tokio::test]
async fn test_production_never_echoes_link() {
    let h = harness("production", NotifierResult::Failed("relay refused".into()));
    h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let response = h.auth.forgot_password("admin".into()).await.unwrap();
    assert_eq!(response.message, FORGOT_PASSWORD_MESSAGE);
    assert!(response.reset_link.is_none());
}

#[tokio::test]
async fn test_user_without_email_skips_notifier() {
    let h = harness("development", NotifierResult::Sent);
    h.store.add_user("admin", "admin123", None);

    let response = h.auth.forgot_password("admin".into()).await.unwrap();
    assert!(h.notifier.sent().is_empty());
    assert!(response.reset_link.is_some());
}

#[tokio::test]
async fn test_reset_password_full_flow() {
    let h = production();
    h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let token = issue_token(&h, "admin").await;
    let response = h
        .auth
        .reset_password(token.clone(), NEW_PASSWORD.into())
        .await
        .unwrap();
    assert_eq!(response.message, RESET_PASSWORD_MESSAGE);

    assert!(h.auth.login("admin".into(), NEW_PASSWORD.into()).await.is_ok());
    assert!(matches!(
        h.auth.login("admin".into(), "admin123".into()).await,
        Err(AppError::InvalidCredentials)
    ));

    // A consumed token never consumes again
    let again = h.auth.reset_password(token, "Another#Pass9".into()).await;
    assert!(matches!(again, Err(AppError::InvalidResetToken)));
    assert!(h.auth.login("admin".into(), NEW_PASSWORD.into()).await.is_ok());
}

#[tokio::test]
async fn test_expired_token_rejected_with_valid_password() {
    let h = production();
    let id = h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let token = issue_token(&h, "admin").await;
    h.store.expire_tokens(id);

    let result = h.auth.reset_password(token, NEW_PASSWORD.into()).await;
    assert!(matches!(result, Err(AppError::InvalidResetToken)));
    assert_eq!(h.store.stored_password("admin"), "admin123");
}

#[tokio::test]
async fn test_second_token_invalidates_first() {
    let h = production();
    let id = h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let first = issue_token(&h, "admin").await;
    let second = issue_token(&h, "admin").await;
    assert_ne!(first, second);
    assert_eq!(h.store.tokens_for(id).len(), 1);

    let result = h.auth.reset_password(first, NEW_PASSWORD.into()).await;
    assert!(matches!(result, Err(AppError::InvalidResetToken)));

    assert!(h.auth.reset_password(second, NEW_PASSWORD.into()).await.is_ok());
}

#[tokio::test]
async fn test_unknown_token_rejected() {
    let h = production();

    let result = h.auth.reset_password("deadbeef".into(), NEW_PASSWORD.into()).await;
    assert!(matches!(result, Err(AppError::InvalidResetToken)));
}

#[tokio::test]
async fn test_policy_checked_before_token() {
    let h = production();

    match h.auth.reset_password("deadbeef".into(), "short".into()).await {
        Err(AppError::PasswordPolicy(complexity)) => {
            assert!(!complexity.valid);
            assert!(!complexity.requirements.length);
            assert!(!complexity.requirements.uppercase);
            assert!(complexity.requirements.lowercase);
            assert!(!complexity.requirements.number);
            assert!(!complexity.requirements.special);
        }
        other => panic!("expected policy error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reuse_rejected_for_legacy_credential() {
    let h = production();
    h.store.add_user("legacy", "Legacy#Pass1", Some("l@example.com"));

    let token = issue_token(&h, "legacy").await;
    let result = h.auth.reset_password(token.clone(), "Legacy#Pass1".into()).await;
    assert!(matches!(result, Err(AppError::PasswordReuse)));

    // The token survives a rejected attempt
    assert!(h.auth.reset_password(token, NEW_PASSWORD.into()).await.is_ok());
}

#[tokio::test]
async fn test_reuse_rejected_for_hashed_credential() {
    let h = production();
    h.store.add_user("admin", "admin123", Some("admin@example.com"));

    let token = issue_token(&h, "admin").await;
    h.auth.reset_password(token, NEW_PASSWORD.into()).await.unwrap();

    let token = issue_token(&h, "admin").await;
    let result = h.auth.reset_password(token, NEW_PASSWORD.into()).await;
    assert!(matches!(result, Err(AppError::PasswordReuse)));
}

#[tokio::test]
async fn test_concurrent_redemption_single_winner() {
    let h = production();
    h.store.add_user("admin", "admin123", Some("admin@example.com"));
    let token = issue_token(&h, "admin").await;

    let (a, b) = tokio::join!(
        h.auth.reset_password(token.clone(), "First#Pass11".into()),
        h.auth.reset_password(token.clone(), "Second#Pass22".into()),
    );

    let winners = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(winners, 1);
}
