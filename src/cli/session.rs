use super::input::{Input, RequestSource};
use super::ui;
use crate::core::ExchangeRateProvider;
use crate::core::conversion::convert_request;
use anyhow::Result;
use chrono_tz::Tz;
use std::io::Write;
use tracing::{debug, warn};

/// Counts of what happened during a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Converts every request `source` produces until it reports `Exit`.
///
/// A failed conversion is printed and the session continues; only I/O
/// failures on the source or `out` end it early.
pub async fn run_session<S, W>(
    source: &mut S,
    provider: &(dyn ExchangeRateProvider + Send + Sync),
    tz: Tz,
    out: &mut W,
) -> Result<SessionSummary>
where
    S: RequestSource + ?Sized,
    W: Write,
{
    let mut summary = SessionSummary::default();

    loop {
        let request = match source.next_input()? {
            Input::Exit => break,
            Input::Invalid(e) => {
                debug!(error = %e, "Rejected input");
                writeln!(out, "{}", ui::render_error(source.language(), &e))?;
                summary.failed += 1;
                continue;
            }
            Input::Request(request) => request,
        };

        let spinner = ui::new_spinner(&format!("{} -> {}", request.from, request.to));
        let result = convert_request(provider, &request).await;
        spinner.finish_and_clear();

        match result {
            Ok(conversion) => {
                write!(out, "{}", ui::render_conversion(&conversion, &request, tz))?;
                summary.converted += 1;
            }
            Err(e) => {
                warn!(error = %e, from = %request.from, to = %request.to, "Conversion failed");
                writeln!(out, "{}", ui::render_error(request.language, &e))?;
                summary.failed += 1;
            }
        }
        out.flush()?;
    }

    debug!(?summary, "Session finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::input::{FlagSource, PromptSource};
    use crate::core::Language;
    use crate::core::conversion::tests::StaticProvider;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_flag_session_converts() {
        let provider = StaticProvider::new(&[("EUR", 0.92)]);
        let mut source = FlagSource::new(
            Some("USD".into()),
            Some("EUR".into()),
            Some("100".into()),
            Language::En,
        );
        let mut out = Vec::<u8>::new();

        let summary = run_session(&mut source, &provider, Tz::UTC, &mut out)
            .await
            .unwrap();
        assert_eq!(summary, SessionSummary { converted: 1, failed: 0 });

        let text = String::from_utf8(out).unwrap();
        let plain = console::strip_ansi_codes(&text);
        assert!(plain.contains("100.00 USD -> 92.00 EUR"));
    }

    #[tokio::test]
    async fn test_negative_amount_never_fetches() {
        let provider = StaticProvider::new(&[("EUR", 0.92)]);
        let mut source = FlagSource::new(
            Some("USD".into()),
            Some("EUR".into()),
            Some("-5".into()),
            Language::En,
        );
        let mut out = Vec::<u8>::new();

        let summary = run_session(&mut source, &provider, Tz::UTC, &mut out)
            .await
            .unwrap();
        assert_eq!(summary, SessionSummary { converted: 0, failed: 1 });
        assert_eq!(provider.call_count(), 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Invalid amount. Please enter a positive number.\n"
        );
    }

    #[tokio::test]
    async fn test_interactive_session_survives_failures() {
        let provider = StaticProvider::new(&[("EUR", 0.92)]);
        let input = "10\nusd\ngbp\n10\nusd\n\n2\nusd\neur\nexit\n";
        let mut out = Vec::<u8>::new();
        let mut source =
            PromptSource::with_language(Cursor::new(input), Vec::<u8>::new(), Language::Uz);

        let summary = run_session(&mut source, &provider, Tz::UTC, &mut out)
            .await
            .unwrap();
        assert_eq!(summary, SessionSummary { converted: 1, failed: 2 });
        assert_eq!(provider.call_count(), 2);

        let text = String::from_utf8(out).unwrap();
        let plain = console::strip_ansi_codes(&text);
        assert!(plain.contains("Xato: rate not found for GBP"));
        assert!(plain.contains("'from' va 'to' valyutalari ko'rsatilishi kerak."));
        assert!(plain.contains("2.00 USD -> 1.84 EUR"));
    }
}
