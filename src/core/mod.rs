//! Core types: requests, rates, languages, and configuration

pub mod config;
pub mod conversion;
pub mod error;
pub mod i18n;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, ConversionRequest};
pub use error::{ConvertError, InvalidInput};
pub use i18n::{Language, Messages};
pub use rates::{ExchangeRateProvider, ExchangeRateSnapshot};
