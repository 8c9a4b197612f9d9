//! REST client for the site management API.

use std::future::Future;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use site_core::types::DbId;

use crate::error::ClientError;
use crate::models::{
    DataEnvelope, EmergencyAlert, ErrorBody, GateResolution, LoginResponse, ParkingSpot, Profile,
};

/// Anything that can produce a fresh parking spot list.
pub trait SpotSource {
    fn fetch_spots(&self) -> impl Future<Output = Result<Vec<ParkingSpot>, ClientError>> + Send;
}

/// Claims and releases made on behalf of the signed-in resident. Either
/// call returns the spot as stored after the change.
pub trait SpotControl {
    fn claim(&self, id: DbId) -> impl Future<Output = Result<ParkingSpot, ClientError>> + Send;
    fn release(&self, id: DbId) -> impl Future<Output = Result<ParkingSpot, ClientError>> + Send;
}

/// HTTP client bound to one API base URL and, after login, one session.
pub struct ApiClient {
    client: reqwest::Client,
    api_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// `api_url` includes the `/api/v1` prefix.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            access_token: None,
        }
    }

    /// Client for an already issued access token.
    pub fn with_token(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::new(api_url)
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Log in and keep the access token for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Profile, ClientError> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.api_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let login: LoginResponse = Self::parse(response).await?;

        tracing::info!(user_id = login.user.id, role = %login.user.role.as_str(), "Logged in");
        self.access_token = Some(login.access_token);
        Ok(login.user)
    }

    pub async fn list_spots(&self) -> Result<Vec<ParkingSpot>, ClientError> {
        self.call(Method::GET, "/parking-spots", None::<&()>).await
    }

    pub async fn claim_spot(&self, id: DbId) -> Result<ParkingSpot, ClientError> {
        self.call(Method::POST, &format!("/parking-spots/{id}/claim"), None::<&()>)
            .await
    }

    pub async fn release_spot(&self, id: DbId) -> Result<ParkingSpot, ClientError> {
        self.call(Method::POST, &format!("/parking-spots/{id}/release"), None::<&()>)
            .await
    }

    /// Resolve a scanned or typed guest token at the gate.
    pub async fn resolve_token(&self, token: &str) -> Result<GateResolution, ClientError> {
        self.call(Method::POST, "/gate/resolve", Some(&json!({ "token": token })))
            .await
    }

    pub async fn active_alerts(&self) -> Result<Vec<EmergencyAlert>, ClientError> {
        self.call(Method::GET, "/emergency-alerts/active", None::<&()>)
            .await
    }

    // ---- private helpers ----

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let token = self.access_token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.api_url))
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let envelope: DataEnvelope<T> = Self::parse(request.send().await?).await?;
        Ok(envelope.data)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await.unwrap_or_default();
        Err(match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => ClientError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.error,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: "UNKNOWN".into(),
                message: text,
            },
        })
    }
}

impl SpotSource for ApiClient {
    async fn fetch_spots(&self) -> Result<Vec<ParkingSpot>, ClientError> {
        self.list_spots().await
    }
}

impl SpotControl for ApiClient {
    async fn claim(&self, id: DbId) -> Result<ParkingSpot, ClientError> {
        self.claim_spot(id).await
    }

    async fn release(&self, id: DbId) -> Result<ParkingSpot, ClientError> {
        self.release_spot(id).await
    }
}
