// Authenticated HTTP client for the SmartSwap backend
use crate::application::auth_service::Principal;
use crate::domain::battery::Battery;
use crate::domain::dashboard::ModelPerformance;
use crate::domain::fleet::{FleetSummary, HealthSummary};
use crate::domain::materials::MaterialRecord;
use crate::domain::requests::{LoginRequest, RouteRequest, TokenResponse};
use crate::domain::route::Route;
use crate::domain::station::Station;
use crate::domain::weather::Weather;
use crate::infrastructure::token_store::{TokenStore, TokenStoreError};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.tokens.load()?.is_some())
    }

    /// Exchange credentials for a bearer token and persist it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            });
        let token: TokenResponse = self.send(request).await?;
        self.tokens.save(&token.access_token)?;
        tracing::info!("Logged in as {} (token valid for {}s)", username, token.expires_in);
        Ok(())
    }

    /// Replace the stored token with a freshly issued one.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let token: TokenResponse = self.send(self.http.post(self.url("/api/auth/refresh"))).await?;
        self.tokens.save(&token.access_token)?;
        tracing::debug!("Token refreshed, valid for {}s", token.expires_in);
        Ok(())
    }

    pub async fn me(&self) -> Result<Principal, ApiError> {
        self.get("/api/auth/me").await
    }

    /// Revoke the token server-side when possible, then forget it locally.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.tokens.load()?.is_some() {
            let request = self.http.post(self.url("/api/auth/logout"));
            if let Err(e) = self.send::<serde_json::Value>(request).await {
                tracing::warn!("Server-side logout failed: {}", e);
            }
        }
        self.tokens.clear()?;
        Ok(())
    }

    pub async fn batteries(&self) -> Result<Vec<Battery>, ApiError> {
        self.get("/api/batteries").await
    }

    pub async fn battery(&self, id: &str) -> Result<Battery, ApiError> {
        let path = format!("/api/batteries/{}", urlencoding::encode(id));
        self.get(&path).await
    }

    pub async fn stations(&self) -> Result<Vec<Station>, ApiError> {
        self.get("/api/stations").await
    }

    pub async fn station(&self, id: &str) -> Result<Station, ApiError> {
        let path = format!("/api/stations/{}", urlencoding::encode(id));
        self.get(&path).await
    }

    pub async fn optimize_route(&self, origin: &str, destination: &str) -> Result<Route, ApiError> {
        let body = RouteRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
        };
        let request = self.http.post(self.url("/api/routes/optimize")).json(&body);
        self.send(request).await
    }

    pub async fn circular_economy(&self) -> Result<Vec<MaterialRecord>, ApiError> {
        self.get("/api/analytics/circular-economy").await
    }

    pub async fn ml_performance(&self) -> Result<ModelPerformance, ApiError> {
        self.get("/api/analytics/ml-performance").await
    }

    pub async fn fleet_summary(&self) -> Result<FleetSummary, ApiError> {
        self.get("/api/analytics/fleet-summary").await
    }

    pub async fn battery_health_summary(&self) -> Result<HealthSummary, ApiError> {
        self.get("/api/analytics/battery-health-summary").await
    }

    pub async fn weather(&self, location: &str) -> Result<Weather, ApiError> {
        let path = format!("/api/weather/{}", urlencoding::encode(location));
        self.get(&path).await
    }

    pub async fn dashboard(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/api/dashboard").await
    }

    pub async fn navigate(&self, section_id: &str) -> Result<serde_json::Value, ApiError> {
        let path = format!("/api/dashboard/navigate/{}", urlencoding::encode(section_id));
        self.send(self.http.post(self.url(&path))).await
    }

    pub async fn set_language(&self, code: &str) -> Result<serde_json::Value, ApiError> {
        let path = format!("/api/dashboard/language/{}", urlencoding::encode(code));
        self.send(self.http.post(self.url(&path))).await
    }

    pub async fn resize_dashboard(&self) -> Result<serde_json::Value, ApiError> {
        self.send(self.http.post(self.url("/api/dashboard/resize"))).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match self.tokens.load()? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to backend failed: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected credentials, clearing stored token");
            self.tokens.clear()?;
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Backend returned {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
