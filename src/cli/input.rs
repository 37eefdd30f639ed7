//! Where conversion requests come from: command-line flags or interactive prompts.

use crate::core::conversion::parse_amount;
use crate::core::{ConversionRequest, ConvertError, InvalidInput, Language};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

/// Typing this at the amount prompt ends an interactive session.
pub const EXIT_SENTINEL: &str = "exit";

#[derive(Debug)]
pub enum Input {
    Request(ConversionRequest),
    Invalid(ConvertError),
    Exit,
}

pub trait RequestSource {
    /// Language for messages about this source's inputs.
    fn language(&self) -> Language;

    fn next_input(&mut self) -> Result<Input>;
}

/// A single request assembled from command-line flags.
pub struct FlagSource {
    from: Option<String>,
    to: Option<String>,
    amount: Option<String>,
    language: Language,
    consumed: bool,
}

impl FlagSource {
    pub fn new(
        from: Option<String>,
        to: Option<String>,
        amount: Option<String>,
        language: Language,
    ) -> Self {
        FlagSource {
            from,
            to,
            amount,
            language,
            consumed: false,
        }
    }

    /// The request these flags describe, or why they don't describe one.
    pub fn request(&self) -> Result<ConversionRequest, ConvertError> {
        let (Some(from), Some(to)) = (self.from.as_deref(), self.to.as_deref()) else {
            return Err(InvalidInput::MissingCurrencies.into());
        };
        let amount = parse_amount(self.amount.as_deref().unwrap_or_default())?;
        ConversionRequest::new(from, to, amount, self.language)
    }
}

impl RequestSource for FlagSource {
    fn language(&self) -> Language {
        self.language
    }

    fn next_input(&mut self) -> Result<Input> {
        if self.consumed {
            return Ok(Input::Exit);
        }
        self.consumed = true;
        Ok(match self.request() {
            Ok(request) => Input::Request(request),
            Err(e) => Input::Invalid(e),
        })
    }
}

/// Prompts for requests until the exit sentinel or end of input.
pub struct PromptSource<R, W> {
    reader: R,
    writer: W,
    language: Language,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    /// Asks for the display language, then returns a source ready to prompt.
    pub fn start(reader: R, writer: W) -> Result<Self> {
        let mut source = PromptSource {
            reader,
            writer,
            language: Language::En,
        };
        let english = Language::En.messages();
        writeln!(source.writer, "{}", english.choose_language)?;
        let answer = source.read_token()?.unwrap_or_default();
        let (language, fell_back) = Language::parse_or_default(&answer);
        if fell_back {
            writeln!(source.writer, "{}", english.unsupported_language)?;
        }
        source.language = language;
        debug!(%language, "Interactive session started");
        Ok(source)
    }

    /// Skips the language question.
    pub fn with_language(reader: R, writer: W, language: Language) -> Self {
        PromptSource {
            reader,
            writer,
            language,
        }
    }

    /// Reads the first whitespace-separated token of the next line; `None` at end of input.
    fn read_token(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(
            line.split_whitespace().next().unwrap_or_default().to_string(),
        ))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.writer, "{text}")?;
        self.writer.flush()?;
        self.read_token()
    }
}

impl<R: BufRead, W: Write> RequestSource for PromptSource<R, W> {
    fn language(&self) -> Language {
        self.language
    }

    fn next_input(&mut self) -> Result<Input> {
        let messages = self.language.messages();

        let amount = loop {
            let Some(answer) = self.prompt(messages.enter_amount)? else {
                return Ok(Input::Exit);
            };
            if answer.eq_ignore_ascii_case(EXIT_SENTINEL) {
                return Ok(Input::Exit);
            }
            match parse_amount(&answer) {
                Ok(amount) => break amount,
                Err(_) => writeln!(self.writer, "{}", messages.invalid_amount)?,
            }
        };

        let Some(from) = self.prompt(messages.enter_from)? else {
            return Ok(Input::Exit);
        };
        let Some(to) = self.prompt(messages.enter_to)? else {
            return Ok(Input::Exit);
        };

        Ok(match ConversionRequest::new(&from, &to, amount, self.language) {
            Ok(request) => Input::Request(request),
            Err(e) => Input::Invalid(e),
        })
    }
}
