use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::error::ConvertError;
use crate::core::rates::{ExchangeRateProvider, ExchangeRateSnapshot};

/// Client for the exchangerate-api.com v6 `latest` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, key: &str, base: &str) -> String {
        format!("{}/v6/{}/latest/{}", self.base_url, key, base)
    }
}

/// The service reports failures as `{"result": "error", "error-type": "..."}`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

#[async_trait]
impl ExchangeRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn latest(&self, base: &str) -> Result<ExchangeRateSnapshot, ConvertError> {
        let base = base.trim().to_uppercase();
        debug!("Requesting rates from {}", self.endpoint("***", &base));

        let client = reqwest::Client::builder()
            .user_agent("kurs/0.1")
            .build()
            .map_err(ConvertError::Network)?;
        let response = client
            .get(self.endpoint(&self.api_key, &base))
            .send()
            .await
            .map_err(ConvertError::Network)?;

        let status = response.status();
        debug!(%status, "Received exchange rate response");

        let text = response.text().await.map_err(ConvertError::Read)?;

        if let Ok(envelope) = serde_json::from_str::<ApiEnvelope>(&text) {
            if envelope.result.as_deref() == Some("error") {
                return Err(ConvertError::Api(
                    envelope.error_type.unwrap_or_else(|| "unknown-error".to_string()),
                ));
            }
        }
        if !status.is_success() {
            return Err(ConvertError::Api(format!("HTTP {status}")));
        }

        let snapshot: ExchangeRateSnapshot = serde_json::from_str(&text)?;
        debug!(
            base_code = %snapshot.base_code,
            rates = snapshot.conversion_rates.len(),
            "Parsed exchange rates"
        );
        Ok(snapshot)
    }
}
