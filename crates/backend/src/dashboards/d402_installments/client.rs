use async_trait::async_trait;
use contracts::dashboards::d402_installments::InstallmentModel;
use std::time::Duration;
use thiserror::Error;

use crate::shared::config::InstallmentsConfig;

#[derive(Debug, Error)]
pub enum InstallmentFetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("installment API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("installment API returned invalid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Where installment aggregates come from
#[async_trait]
pub trait InstallmentSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<InstallmentModel>, InstallmentFetchError>;
}

/// Client for the external installment aggregate endpoint
pub struct HttpInstallmentSource {
    client: reqwest::Client,
    url: String,
}

impl HttpInstallmentSource {
    pub fn new(config: &InstallmentsConfig) -> Result<Self, InstallmentFetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(InstallmentFetchError::Client)?;
        Ok(Self {
            client,
            url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl InstallmentSource for HttpInstallmentSource {
    async fn fetch(&self) -> Result<Vec<InstallmentModel>, InstallmentFetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| InstallmentFetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InstallmentFetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<InstallmentModel>>()
            .await
            .map_err(InstallmentFetchError::Decode)
    }
}
