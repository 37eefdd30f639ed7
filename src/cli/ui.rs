use crate::core::{Conversion, ConversionRequest, ConvertError, InvalidInput, Language};
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SEPARATOR: &str = "---------------------------------------------------------";
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// Defines different styles for text elements.
pub enum StyleType {
    Number,
    Currency,
    Error,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Number => style(text).green(),
        StyleType::Currency => style(text).yellow(),
        StyleType::Error => style(text).red(),
    };
    styled.to_string()
}

/// Formats a unix timestamp in `tz`. Out-of-range values yield `None`.
pub fn format_timestamp(unix: i64, tz: Tz) -> Option<String> {
    Utc.timestamp_opt(unix, 0)
        .single()
        .map(|dt| dt.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string())
}

/// Renders the result block printed after a successful conversion.
pub fn render_conversion(conversion: &Conversion, request: &ConversionRequest, tz: Tz) -> String {
    let messages = request.language.messages();
    let snapshot = &conversion.snapshot;
    let last_update = format_timestamp(snapshot.last_update_unix, tz)
        .unwrap_or_else(|| snapshot.last_update_utc.clone());

    let mut out = String::new();
    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str(&format!(
        "{} {} -> {} {}\n",
        style_text(&format!("{:.2}", request.amount), StyleType::Number),
        style_text(&request.from, StyleType::Currency),
        style_text(&format!("{:.2}", conversion.amount), StyleType::Number),
        style_text(&request.to, StyleType::Currency),
    ));
    out.push_str(&format!(
        "{}{}\n",
        messages.base_currency,
        style_text(&snapshot.base_code, StyleType::Currency)
    ));
    out.push_str(&format!(
        "{}{}\n",
        messages.last_update_label(tz.name()),
        last_update
    ));
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

/// Renders a failed conversion. Input problems use the localized label only.
pub fn render_error(language: Language, err: &ConvertError) -> String {
    let messages = language.messages();
    match err {
        ConvertError::InvalidInput(InvalidInput::InvalidAmount) => {
            messages.invalid_amount.to_string()
        }
        ConvertError::InvalidInput(InvalidInput::MissingCurrencies) => {
            messages.missing_currencies.to_string()
        }
        ConvertError::InvalidInput(InvalidInput::InvalidCurrency) => {
            messages.invalid_currency.to_string()
        }
        other => format!(
            "{}{}",
            style_text(messages.error_prefix, StyleType::Error),
            other
        ),
    }
}

/// Creates a spinner shown on stderr while rates are fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
