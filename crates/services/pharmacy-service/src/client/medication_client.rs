//! Client for the medication service catalogue.

use std::time::Duration;

use async_trait::async_trait;
use common::{AppError, AppResult, HttpClientConfig};
use reqwest::{Client, Response, StatusCode};

use crate::models::{ManufacturerSummary, MedicationSummary};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Medication service operations used by the pharmacy service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MedicationClient: Send + Sync {
    /// Catalogue entries of `ids`; unknown ids are left out.
    async fn get_medications_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MedicationSummary>>;
}

/// HTTP implementation of MedicationClient.
#[derive(Clone)]
pub struct MedicationApiClient {
    client: Client,
    base_url: String,
}

impl MedicationApiClient {
    pub fn new(config: &HttpClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = response.text().await.unwrap_or_default();
        tracing::warn!(%status, "Medication service rejected the request: {}", reason);
        match status {
            StatusCode::NOT_FOUND => Err(AppError::NotFound),
            _ if status.is_client_error() => Err(AppError::bad_request(reason)),
            _ => Err(AppError::service_unavailable("medication-service")),
        }
    }
}

/// `1,2,3`
fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl MedicationClient for MedicationApiClient {
    async fn get_medications_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MedicationSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .get(format!("{}/medications", self.base_url))
            .query(&[("ids", join_ids(&ids))])
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}

/// Stand-in used when the medication service is not deployed.
#[derive(Debug, Clone, Default)]
pub struct StubMedicationClient;

#[async_trait]
impl MedicationClient for StubMedicationClient {
    async fn get_medications_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MedicationSummary>> {
        tracing::debug!(?ids, "Stub medication client: generating medications");
        Ok(ids
            .into_iter()
            .map(|id| MedicationSummary {
                id,
                name: format!("medication_{}", id),
                description: format!("description_{}", id),
                manufacturer: Some(ManufacturerSummary {
                    id,
                    name: format!("manufacturer_{}", id),
                }),
                images: Vec::new(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[1, 22, 3]), "1,22,3");
        assert_eq!(join_ids(&[]), "");
    }

    #[tokio::test]
    async fn test_stub_keeps_order() {
        let medications = StubMedicationClient
            .get_medications_by_ids(vec![4, 2])
            .await
            .unwrap();

        assert_eq!(medications.len(), 2);
        assert_eq!(medications[0].name, "medication_4");
        assert_eq!(medications[1].manufacturer.as_ref().unwrap().name, "manufacturer_2");
    }
}
