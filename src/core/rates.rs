//! Exchange rate snapshots and the provider abstraction

use crate::core::error::ConvertError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest rates for one base currency, as returned by the rate service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateSnapshot {
    pub base_code: String,
    #[serde(rename = "time_last_update_unix")]
    pub last_update_unix: i64,
    #[serde(rename = "time_last_update_utc", default)]
    pub last_update_utc: String,
    pub conversion_rates: HashMap<String, f64>,
}

impl ExchangeRateSnapshot {
    pub fn rate_for(&self, code: &str) -> Result<f64, ConvertError> {
        let code = code.trim().to_uppercase();
        self.conversion_rates
            .get(&code)
            .copied()
            .ok_or(ConvertError::RateNotFound(code))
    }
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fetches the latest rates with `base` as the reference currency.
    async fn latest(&self, base: &str) -> Result<ExchangeRateSnapshot, ConvertError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ExchangeRateSnapshot {
        ExchangeRateSnapshot {
            base_code: "USD".to_string(),
            last_update_unix: 0,
            last_update_utc: String::new(),
            conversion_rates: HashMap::from([("EUR".to_string(), 0.92)]),
        }
    }

    #[test]
    fn test_rate_lookup_is_case_insensitive() {
        let snapshot = snapshot();
        assert_eq!(snapshot.rate_for("EUR").unwrap(), 0.92);
        assert_eq!(snapshot.rate_for("eur").unwrap(), 0.92);
    }

    #[test]
    fn test_missing_rate() {
        let result = snapshot().rate_for("xyz");
        match result {
            Err(ConvertError::RateNotFound(code)) => assert_eq!(code, "XYZ"),
            other => panic!("Expected RateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_deserialization() {
        let json = r#"{
            "base_code": "USD",
            "time_last_update_unix": 1700000001,
            "time_last_update_utc": "Tue, 14 Nov 2023 22:13:21 +0000",
            "conversion_rates": {"USD": 1, "UZS": 12250.5}
        }"#;
        let snapshot: ExchangeRateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.base_code, "USD");
        assert_eq!(snapshot.last_update_unix, 1700000001);
        assert_eq!(snapshot.rate_for("UZS").unwrap(), 12250.5);
        assert_eq!(snapshot.rate_for("USD").unwrap(), 1.0);
    }
}
