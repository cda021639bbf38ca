//! End-to-end tests for transparent session renewal in the client.
//!
//! These run against a real server on an ephemeral port, with a counter on
//! `/api/auth/refresh` to observe how many renewal requests the client
//! actually makes.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::sync::Barrier;

use taskhub_client::{ApiClient, ClientError, SessionTokens};

use crate::helpers::{self, expired_access_token, spawn_server};

#[tokio::test]
async fn test_expired_token_is_renewed_transparently() {
    let (base_url, refresh_calls) = spawn_server().await;
    let client = ApiClient::new(&base_url);

    let user = client
        .login(helpers::USER_EMAIL, helpers::PASSWORD)
        .await
        .expect("login failed");

    // Simulate the access token aging out between requests.
    client
        .token_store()
        .set_access_token(expired_access_token(user.id, &user.email, "user"));

    let me = client.me().await.expect("renewal should be transparent");
    assert_eq!(me.email, helpers::USER_EMAIL);
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);

    // The renewed token is now stored; the next call needs no refresh.
    client.me().await.expect("fresh token should be accepted");
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_renewal() {
    let (base_url, refresh_calls) = spawn_server().await;
    let client = ApiClient::new(&base_url);

    let user = client
        .login(helpers::USER_EMAIL, helpers::PASSWORD)
        .await
        .expect("login failed");
    client
        .token_store()
        .set_access_token(expired_access_token(user.id, &user.email, "user"));

    let barrier = Arc::new(Barrier::new(5));
    let mut handles = Vec::new();
    for _ in 0..5 {
        let client = client.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            client.me().await
        }));
    }

    for handle in handles {
        let me = handle.await.unwrap().expect("every call should succeed");
        assert_eq!(me.email, helpers::USER_EMAIL);
    }

    // Five expired calls, one refresh request on the wire.
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_renewal_rejects_all_waiters_and_logs_out() {
    let (base_url, refresh_calls) = spawn_server().await;
    let client = ApiClient::new(&base_url);

    let user = client
        .login(helpers::USER_EMAIL, helpers::PASSWORD)
        .await
        .expect("login failed");

    // Expired access token and a refresh token the server never issued.
    client.token_store().set(SessionTokens {
        access_token: expired_access_token(user.id, &user.email, "user"),
        refresh_token: "revoked-or-forged".to_string(),
    });

    let barrier = Arc::new(Barrier::new(4));
    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = client.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            client.me().await
        }));
    }

    for handle in handles {
        assert!(matches!(
            handle.await.unwrap(),
            Err(ClientError::SessionExpired)
        ));
    }

    // One renewal attempt; the session is gone afterwards.
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    assert!(!client.token_store().is_authenticated());
}

#[tokio::test]
async fn test_malformed_token_is_not_renewed() {
    let (base_url, refresh_calls) = spawn_server().await;
    let client = ApiClient::new(&base_url);

    client
        .login(helpers::USER_EMAIL, helpers::PASSWORD)
        .await
        .expect("login failed");
    client.token_store().set_access_token("garbage".to_string());

    // INVALID_TOKEN is terminal: no refresh attempt is made.
    assert!(matches!(
        client.me().await,
        Err(ClientError::SessionExpired)
    ));
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 0);
    assert!(!client.token_store().is_authenticated());
}

#[tokio::test]
async fn test_renewal_after_logout_fails_cleanly() {
    let (base_url, refresh_calls) = spawn_server().await;
    let client = ApiClient::new(&base_url);

    let user = client
        .login(helpers::USER_EMAIL, helpers::PASSWORD)
        .await
        .expect("login failed");
    let refresh_token = client.token_store().refresh_token().unwrap();

    client.logout().await.expect("logout failed");
    assert!(!client.token_store().is_authenticated());

    // A stale copy of the pair (another tab, a persisted file) can no
    // longer be renewed: the registry entry is gone.
    client.token_store().set(SessionTokens {
        access_token: expired_access_token(user.id, &user.email, "user"),
        refresh_token,
    });
    assert!(matches!(
        client.me().await,
        Err(ClientError::SessionExpired)
    ));
    assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    assert!(!client.token_store().is_authenticated());
}
