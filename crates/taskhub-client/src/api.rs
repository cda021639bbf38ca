//! The API client and its renewal-aware request pipeline.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use taskhub_core::account::PublicAccount;
use taskhub_core::error::ErrorCode;

use crate::error::ClientError;
use crate::renewal::RenewalCoordinator;
use crate::tokens::{SessionTokens, TokenStore};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    user: PublicAccount,
    access_token: String,
    refresh_token: String,
    #[allow(dead_code)]
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: ErrorCode,
}

/// HTTP client for the Taskhub API.
///
/// Attaches the stored access token to every protected call and runs the
/// session-renewal protocol on `TOKEN_EXPIRED` responses: concurrent
/// callers collapse into a single refresh request, and each original call
/// is retried at most once with the renewed token. `NO_TOKEN` and
/// `INVALID_TOKEN` responses clear the session immediately — renewal
/// cannot fix a malformed credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    renewal: Arc<RenewalCoordinator>,
}

impl ApiClient {
    /// Creates a client for the API at `base_url` (without the `/api`
    /// prefix, e.g. `http://127.0.0.1:3001`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens: Arc::new(TokenStore::new()),
            renewal: Arc::new(RenewalCoordinator::new()),
        }
    }

    /// The client's token store (exposed for persistence and tests).
    pub fn token_store(&self) -> Arc<TokenStore> {
        Arc::clone(&self.tokens)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Logs in and stores the returned token pair.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PublicAccount, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: LoginBody = response.json().await?;
        self.tokens.set(SessionTokens {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
        });

        Ok(body.user)
    }

    /// Logs out: best-effort server-side revocation, then local clear.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let refresh_token = self.tokens.refresh_token();

        let result = self
            .http
            .post(self.url("/auth/logout"))
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await;
        if let Err(e) = result {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }

        self.tokens.clear();
        Ok(())
    }

    /// Fetches the caller's profile.
    pub async fn me(&self) -> Result<PublicAccount, ClientError> {
        self.get("/auth/me").await
    }

    /// GET a protected endpoint.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.execute(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    /// POST a protected endpoint.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, ClientError> {
        let response = self.execute(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// PUT a protected endpoint.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, ClientError> {
        let response = self.execute(Method::PUT, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// PATCH a protected endpoint.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, ClientError> {
        let response = self.execute(Method::PATCH, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    /// DELETE a protected endpoint (no response body expected).
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Sends one protected request, running the renewal protocol on
    /// `TOKEN_EXPIRED` and retrying the call at most once.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ClientError> {
        let mut retried = false;

        loop {
            let mut request = self.http.request(method.clone(), self.url(path));
            if let Some(token) = self.tokens.access_token() {
                request = request.bearer_auth(token);
            }
            if let Some(body) = &body {
                request = request.json(body);
            }

            let response = request.send().await?;
            if response.status().is_success() {
                return Ok(response);
            }

            let error = api_error(response).await;
            match &error {
                ClientError::Api {
                    code: ErrorCode::TokenExpired,
                    ..
                } if !retried => {
                    debug!(path, "Access token expired, renewing");
                    retried = true;
                    self.renew_access_token().await?;
                }
                ClientError::Api {
                    code: ErrorCode::NoToken | ErrorCode::InvalidToken,
                    ..
                } => {
                    // A malformed credential cannot be renewed.
                    self.tokens.clear();
                    return Err(ClientError::SessionExpired);
                }
                _ => return Err(error),
            }
        }
    }

    /// Obtains a fresh access token through the single-flight coordinator.
    async fn renew_access_token(&self) -> Result<String, ClientError> {
        self.renewal.renew_or_wait(|| self.perform_refresh()).await
    }

    /// The leader path: one `/auth/refresh` call. Success stores the new
    /// access token; any failure clears the session (hard logout).
    async fn perform_refresh(&self) -> Result<String, ClientError> {
        let outcome = async {
            let refresh_token = self
                .tokens
                .refresh_token()
                .ok_or(ClientError::SessionExpired)?;

            let response = self
                .http
                .post(self.url("/auth/refresh"))
                .json(&json!({ "refreshToken": refresh_token }))
                .send()
                .await
                .map_err(|e| {
                    warn!(error = %e, "Refresh request failed");
                    ClientError::SessionExpired
                })?;

            if !response.status().is_success() {
                warn!(status = %response.status(), "Refresh rejected");
                return Err(ClientError::SessionExpired);
            }

            let body: RefreshBody = response
                .json()
                .await
                .map_err(|_| ClientError::SessionExpired)?;
            Ok(body.access_token)
        }
        .await;

        match &outcome {
            Ok(access_token) => self.tokens.set_access_token(access_token.clone()),
            Err(_) => {
                self.tokens.clear();
            }
        }

        outcome
    }
}

/// Reads the `{error, code}` body of a failed response.
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Api {
            code: body.code,
            message: body.error,
        },
        Err(_) => ClientError::Transport(format!("HTTP {status} with unreadable error body")),
    }
}
