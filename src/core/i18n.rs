//! Display languages and their label tables.

use anyhow::anyhow;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Ru,
    Uz,
}

/// Every user-facing label, in one language.
#[derive(Debug)]
pub struct Messages {
    pub choose_language: &'static str,
    pub unsupported_language: &'static str,
    pub enter_amount: &'static str,
    pub invalid_amount: &'static str,
    pub enter_from: &'static str,
    pub enter_to: &'static str,
    pub missing_currencies: &'static str,
    pub base_currency: &'static str,
    /// Contains a `{tz}` slot for the display timezone.
    pub last_update: &'static str,
    pub invalid_currency: &'static str,
    pub error_prefix: &'static str,
}

static EN: Messages = Messages {
    choose_language: "Choose language (en, ru, uz):",
    unsupported_language: "Unsupported language, defaulting to English (en).",
    enter_amount: "Enter amount (or 'exit' to quit): ",
    invalid_amount: "Invalid amount. Please enter a positive number.",
    enter_from: "Enter currency to convert from (e.g., USD): ",
    enter_to: "Enter currency to convert to (e.g., EUR): ",
    missing_currencies: "Both 'from' and 'to' currencies must be specified.",
    base_currency: "Base Currency: ",
    last_update: "Last Update ({tz} Time): ",
    invalid_currency: "Currency codes must contain only letters (e.g., USD).",
    error_prefix: "Error: ",
};

static RU: Messages = Messages {
    choose_language: "Выберите язык (en, ru, uz):",
    unsupported_language: "Язык не поддерживается, используется английский (en).",
    enter_amount: "Введите сумму (или 'exit' для выхода): ",
    invalid_amount: "Недопустимая сумма. Пожалуйста, введите положительное число.",
    enter_from: "Введите валюту для конвертации (например, USD): ",
    enter_to: "Введите валюту для конвертации в (например, EUR): ",
    missing_currencies: "Необходимо указать валюты 'from' и 'to'.",
    base_currency: "Базовая валюта: ",
    last_update: "Последнее обновление ({tz}): ",
    invalid_currency: "Код валюты должен содержать только буквы (например, USD).",
    error_prefix: "Ошибка: ",
};

static UZ: Messages = Messages {
    choose_language: "Tilni tanlang (en, ru, uz):",
    unsupported_language: "Til qo'llab-quvvatlanmaydi, ingliz tili (en) ishlatiladi.",
    enter_amount: "Summani kiriting (yoki chiqish uchun 'exit' kiriting): ",
    invalid_amount: "Noto'g'ri summa. Iltimos, musbat son kiriting.",
    enter_from: "O'zgarish uchun valyutani kiriting (masalan, USD): ",
    enter_to: "O'zgarish uchun valyutani kiriting (masalan, EUR): ",
    missing_currencies: "'from' va 'to' valyutalari ko'rsatilishi kerak.",
    base_currency: "Asosiy valyuta: ",
    last_update: "Oxirgi yangilanish ({tz} vaqti): ",
    invalid_currency: "Valyuta kodi faqat harflardan iborat bo'lishi kerak (masalan, USD).",
    error_prefix: "Xato: ",
};

impl Messages {
    /// The last-update label naming the timezone the time is shown in.
    pub fn last_update_label(&self, tz_name: &str) -> String {
        self.last_update.replace("{tz}", tz_name)
    }
}

impl Language {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Language::En => &EN,
            Language::Ru => &RU,
            Language::Uz => &UZ,
        }
    }

    /// Parses a language code, falling back to English for anything unknown.
    ///
    /// The flag is `true` when the fallback was taken.
    pub fn parse_or_default(code: &str) -> (Language, bool) {
        match code.parse() {
            Ok(lang) => (lang, false),
            Err(_) => {
                warn!(code, "Unsupported language, using English");
                (Language::En, true)
            }
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Language::En => "en",
                Language::Ru => "ru",
                Language::Uz => "uz",
            }
        )
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            "uz" => Ok(Language::Uz),
            _ => Err(anyhow!("Unsupported language: {}", s)),
        }
    }
}
