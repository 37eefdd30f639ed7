pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::{FlagSource, PromptSource, SessionSummary};
use crate::core::Language;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Options gathered from the command line.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
    pub lang: Option<String>,
}

impl RunOptions {
    /// Any conversion flag selects flag mode; otherwise the session is interactive.
    pub fn is_flag_mode(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.amount.is_some()
    }
}

/// Runs against the process's stdin and stdout.
pub async fn run(options: RunOptions) -> Result<SessionSummary> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_with_io(options, stdin.lock(), std::io::stdout(), &mut stdout).await
}

/// Runs one session. Interactive prompts go to `prompts`, results to `out`.
pub async fn run_with_io<R, P, W>(
    options: RunOptions,
    reader: R,
    prompts: P,
    out: &mut W,
) -> Result<SessionSummary>
where
    R: BufRead,
    P: Write,
    W: Write,
{
    info!("kurs starting...");

    let config = match options.config_path.as_deref() {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(base_url = config.base_url(), timezone = %config.timezone, "Loaded config");

    let tz = config.timezone();

    let preset_language = options
        .lang
        .as_deref()
        .or(config.language.as_deref())
        .map(|code| Language::parse_or_default(code).0);

    if options.is_flag_mode() {
        let language = preset_language.unwrap_or_default();
        let mut source = FlagSource::new(options.from, options.to, options.amount, language);
        // Bad flags are reported before the key is needed.
        if let Err(e) = source.request() {
            debug!(error = %e, "Rejected flag input");
            writeln!(out, "{}", cli::ui::render_error(language, &e))?;
            return Ok(SessionSummary {
                converted: 0,
                failed: 1,
            });
        }
        let provider = build_provider(&config, options.api_key.as_deref())?;
        return cli::run_session(&mut source, &provider, tz, out).await;
    }

    let provider = build_provider(&config, options.api_key.as_deref())?;
    let mut source = match preset_language {
        Some(language) => PromptSource::with_language(reader, prompts, language),
        None => PromptSource::start(reader, prompts)?,
    };
    cli::run_session(&mut source, &provider, tz, out).await
}

fn build_provider(
    config: &AppConfig,
    api_key: Option<&str>,
) -> Result<providers::ExchangeRateApiProvider> {
    let api_key = config.resolve_api_key(api_key)?;
    Ok(providers::ExchangeRateApiProvider::new(
        config.base_url(),
        &api_key,
    ))
}
