//! Client for the pharmacy service internal API.

use std::time::Duration;

use async_trait::async_trait;
use common::{AppError, AppResult, HttpClientConfig};
use domain::Role;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Pharmacy service operations used by the user service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PharmacyClient: Send + Sync {
    /// Ids of the pharmacies a user manages or works at.
    async fn get_pharmacies_by_user_and_role(&self, user_id: i32, role: Role) -> AppResult<Vec<i32>>;

    /// Attach a user to a pharmacy as employee or manager.
    async fn set_user_at_pharmacy(&self, user_id: i32, pharmacy_id: i32, role: Role) -> AppResult<()>;
}

#[derive(Debug, Serialize)]
struct SyncEmployeeBody {
    user_id: i32,
    pharmacy_id: i32,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct PharmacyIds {
    ids: Vec<i32>,
}

/// HTTP implementation of PharmacyClient.
#[derive(Clone)]
pub struct PharmacyApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PharmacyApiClient {
    pub fn new(config: &HttpClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = response.text().await.unwrap_or_default();
        tracing::warn!(%status, "Pharmacy service rejected the request: {}", reason);
        match status {
            StatusCode::NOT_FOUND => Err(AppError::NotFound),
            StatusCode::UNAUTHORIZED => Err(AppError::internal("Pharmacy service API key rejected")),
            _ if status.is_client_error() => Err(AppError::bad_request(reason)),
            _ => Err(AppError::service_unavailable("pharmacy-service")),
        }
    }
}

#[async_trait]
impl PharmacyClient for PharmacyApiClient {
    async fn get_pharmacies_by_user_and_role(&self, user_id: i32, role: Role) -> AppResult<Vec<i32>> {
        let response = self
            .client
            .get(self.url("/internal/"))
            .query(&[
                ("user_id", user_id.to_string()),
                ("role", role.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let ids: PharmacyIds = Self::check(response).await?.json().await?;
        Ok(ids.ids)
    }

    async fn set_user_at_pharmacy(&self, user_id: i32, pharmacy_id: i32, role: Role) -> AppResult<()> {
        let body = SyncEmployeeBody {
            user_id,
            pharmacy_id,
            role,
        };

        let response = self
            .client
            .put(self.url("/internal/employees/sync"))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

/// Stand-in used when the pharmacy service is not deployed.
#[derive(Debug, Clone, Default)]
pub struct StubPharmacyClient;

#[async_trait]
impl PharmacyClient for StubPharmacyClient {
    async fn get_pharmacies_by_user_and_role(&self, user_id: i32, role: Role) -> AppResult<Vec<i32>> {
        tracing::debug!(user_id, %role, "Stub pharmacy client: listing pharmacies");
        Ok(vec![1, 2, 3])
    }

    async fn set_user_at_pharmacy(&self, user_id: i32, pharmacy_id: i32, role: Role) -> AppResult<()> {
        tracing::debug!(user_id, pharmacy_id, %role, "Stub pharmacy client: sync skipped");
        Ok(())
    }
}
