//! Integration tests for the authentication flow.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": helpers::USER_EMAIL,
                "password": helpers::PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["accessToken"].is_string());
    assert!(response.body["refreshToken"].is_string());
    assert_eq!(response.body["expiresIn"], 900);
    assert_eq!(response.body["user"]["email"], helpers::USER_EMAIL);
    assert!(response.body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_missing_credentials() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": helpers::USER_EMAIL })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "MISSING_CREDENTIALS");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": helpers::USER_EMAIL,
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_email_same_error_as_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "nobody@cnss.bj",
                "password": helpers::PASSWORD,
            })),
            None,
        )
        .await;

    // Unknown account and wrong password are indistinguishable.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new();
    let (access, _) = app.login(helpers::USER_EMAIL, helpers::PASSWORD).await;

    let response = app
        .request("GET", "/api/auth/me", None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], helpers::USER_EMAIL);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "NO_TOKEN");
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/auth/me", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let app = TestApp::new();
    // Account ID 2 is the seeded regular user.
    let stale = helpers::expired_access_token(2, helpers::USER_EMAIL, "user");

    let response = app.request("GET", "/api/auth/me", None, Some(&stale)).await;

    // Expiry is distinguishable from malformedness: it drives renewal.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new();
    let (_, refresh) = app.login(helpers::USER_EMAIL, helpers::PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": refresh })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_access = response.body["accessToken"].as_str().unwrap();
    assert_eq!(response.body["expiresIn"], 900);

    // The refresh token is not rotated: a second exchange still works.
    let again = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": refresh })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);

    // And the renewed access token is accepted by the gateway.
    let me = app
        .request("GET", "/api/auth/me", None, Some(new_access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_token() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth/refresh", Some(json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "NO_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_refresh_rejects_unregistered_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": "never-issued" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    let (access, _) = app.login(helpers::USER_EMAIL, helpers::PASSWORD).await;

    // An access token was never registered as a refresh token.
    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": access })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = TestApp::new();
    let (_, refresh) = app.login(helpers::USER_EMAIL, helpers::PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(json!({ "refreshToken": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": refresh })),
            None,
        )
        .await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
    assert_eq!(after.error_code(), "INVALID_REFRESH_TOKEN");
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new();
    let (_, refresh) = app.login(helpers::USER_EMAIL, helpers::PASSWORD).await;

    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                "/api/auth/logout",
                Some(json!({ "refreshToken": refresh })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    // Logout with no body at all is also fine.
    let response = app
        .request("POST", "/api/auth/logout", Some(json!({})), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_auth_state() {
    let app = TestApp::new();

    let anonymous = app.request("GET", "/api/health", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body["authenticated"], false);

    let (access, _) = app.login(helpers::USER_EMAIL, helpers::PASSWORD).await;
    let authed = app.request("GET", "/api/health", None, Some(&access)).await;
    assert_eq!(authed.status, StatusCode::OK);
    assert_eq!(authed.body["authenticated"], true);
}
