//! Conversion requests and the conversion itself.

use crate::core::error::{ConvertError, InvalidInput};
use crate::core::i18n::Language;
use crate::core::rates::{ExchangeRateProvider, ExchangeRateSnapshot};
use tracing::{debug, instrument};

/// A validated request: both codes uppercased and non-empty, amount positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub language: Language,
}

impl ConversionRequest {
    pub fn new(
        from: &str,
        to: &str,
        amount: f64,
        language: Language,
    ) -> Result<Self, ConvertError> {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();
        if from.is_empty() || to.is_empty() {
            return Err(InvalidInput::MissingCurrencies.into());
        }
        if !is_currency_code(&from) || !is_currency_code(&to) {
            return Err(InvalidInput::InvalidCurrency.into());
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(InvalidInput::InvalidAmount.into());
        }
        Ok(ConversionRequest {
            from,
            to,
            amount,
            language,
        })
    }
}

/// Result of converting one request against one snapshot.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub amount: f64,
    pub rate: f64,
    pub snapshot: ExchangeRateSnapshot,
}

/// Codes end up in the request path, so only ASCII letters are allowed.
fn is_currency_code(code: &str) -> bool {
    code.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn convert(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Parses a user-typed amount. Only finite positive numbers are accepted.
pub fn parse_amount(input: &str) -> Result<f64, ConvertError> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(InvalidInput::InvalidAmount.into()),
    }
}

#[instrument(
    name = "Convert",
    skip(provider, request),
    fields(from = %request.from, to = %request.to)
)]
pub async fn convert_request(
    provider: &(dyn ExchangeRateProvider + Send + Sync),
    request: &ConversionRequest,
) -> Result<Conversion, ConvertError> {
    let snapshot = provider.latest(&request.from).await?;
    let rate = snapshot.rate_for(&request.to)?;
    let amount = convert(request.amount, rate);
    debug!(rate, amount, "Converted");
    Ok(Conversion {
        amount,
        rate,
        snapshot,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory provider that records which bases were requested.
    pub(crate) struct StaticProvider {
        pub rates: HashMap<String, f64>,
        pub calls: Mutex<Vec<String>>,
    }

    impl StaticProvider {
        pub(crate) fn new(rates: &[(&str, f64)]) -> Self {
            StaticProvider {
                rates: rates.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ExchangeRateProvider for StaticProvider {
        async fn latest(&self, base: &str) -> Result<ExchangeRateSnapshot, ConvertError> {
            self.calls.lock().unwrap().push(base.to_string());
            Ok(ExchangeRateSnapshot {
                base_code: base.to_string(),
                last_update_unix: 1_700_000_000,
                last_update_utc: String::new(),
                conversion_rates: self.rates.clone(),
            })
        }
    }

    #[test]
    fn test_convert_multiplies() {
        for (amount, rate) in [(1.0, 1.0), (100.0, 0.92), (2.5, 12250.5), (0.01, 3.0)] {
            assert_eq!(convert(amount, rate), amount * rate);
        }
    }

    #[test]
    fn test_request_uppercases_codes() {
        let request = ConversionRequest::new(" usd", "eur ", 10.0, Language::En).unwrap();
        assert_eq!(request.from, "USD");
        assert_eq!(request.to, "EUR");
    }

    #[test]
    fn test_request_rejects_bad_input() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = ConversionRequest::new("USD", "EUR", amount, Language::En);
            assert!(matches!(
                result,
                Err(ConvertError::InvalidInput(InvalidInput::InvalidAmount))
            ));
        }

        let result = ConversionRequest::new("USD", "  ", 10.0, Language::En);
        assert!(matches!(
            result,
            Err(ConvertError::InvalidInput(InvalidInput::MissingCurrencies))
        ));
    }

    #[test]
    fn test_request_rejects_non_alphabetic_codes() {
        let cases = [
            ("USD/../EUR", "EUR"),
            ("USD", "EU R"),
            ("US1", "EUR"),
            ("USD", "€"),
        ];
        for (from, to) in cases {
            let result = ConversionRequest::new(from, to, 10.0, Language::En);
            assert!(
                matches!(
                    result,
                    Err(ConvertError::InvalidInput(InvalidInput::InvalidCurrency))
                ),
                "{from} -> {to} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100").unwrap(), 100.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        for bad in ["", "abc", "-5", "0", "inf", "NaN"] {
            assert!(parse_amount(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_convert_request() {
        let provider = StaticProvider::new(&[("EUR", 0.92)]);
        let request = ConversionRequest::new("USD", "EUR", 100.0, Language::En).unwrap();

        let conversion = convert_request(&provider, &request).await.unwrap();
        assert_eq!(format!("{:.2}", conversion.amount), "92.00");
        assert_eq!(conversion.rate, 0.92);
        assert_eq!(*provider.calls.lock().unwrap(), vec!["USD".to_string()]);
    }

    #[tokio::test]
    async fn test_convert_request_is_case_insensitive() {
        let provider = StaticProvider::new(&[("EUR", 0.92)]);
        let lower = ConversionRequest::new("usd", "eur", 10.0, Language::En).unwrap();
        let upper = ConversionRequest::new("USD", "EUR", 10.0, Language::En).unwrap();

        let a = convert_request(&provider, &lower).await.unwrap();
        let b = convert_request(&provider, &upper).await.unwrap();
        assert_eq!(a.amount, b.amount);
        assert_eq!(*provider.calls.lock().unwrap(), vec!["USD", "USD"]);
    }

    #[tokio::test]
    async fn test_convert_request_missing_rate() {
        let provider = StaticProvider::new(&[("EUR", 0.92)]);
        let request = ConversionRequest::new("USD", "GBP", 10.0, Language::En).unwrap();

        let result = convert_request(&provider, &request).await;
        assert!(matches!(result, Err(ConvertError::RateNotFound(code)) if code == "GBP"));
    }
}
