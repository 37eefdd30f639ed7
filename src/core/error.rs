//! Error types for a single conversion.

use thiserror::Error;

/// User input that cannot become a conversion request.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("amount must be a positive number")]
    InvalidAmount,

    #[error("both 'from' and 'to' currencies must be specified")]
    MissingCurrencies,

    #[error("currency codes may only contain letters")]
    InvalidCurrency,
}

/// Everything that can go wrong while converting one amount.
///
/// None of these end a session: the caller prints them and moves on.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInput),

    #[error("could not fetch exchange rate: {0}")]
    Network(#[source] reqwest::Error),

    #[error("could not read response body: {0}")]
    Read(#[source] reqwest::Error),

    #[error("could not parse exchange rate response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("exchange rate service returned an error: {0}")]
    Api(String),

    #[error("rate not found for {0}")]
    RateNotFound(String),
}

impl From<InvalidInput> for ConvertError {
    fn from(kind: InvalidInput) -> Self {
        ConvertError::InvalidInput(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_messages() {
        let err = ConvertError::from(InvalidInput::InvalidAmount);
        assert_eq!(err.to_string(), "invalid input: amount must be a positive number");

        let err = ConvertError::from(InvalidInput::InvalidCurrency);
        assert_eq!(
            err.to_string(),
            "invalid input: currency codes may only contain letters"
        );
    }
}
