use lingua::Language;
use serde::{Deserialize, Serialize};

/// Language codes accepted by the synthesis engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "pl")]
    Polish,
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "nl")]
    Dutch,
    #[serde(rename = "cs")]
    Czech,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "zh-cn")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "hu")]
    Hungarian,
    #[serde(rename = "ko")]
    Korean,
}

/// Codes in the order the engine documents them
pub const SUPPORTED_CODES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "pl", "tr", "ru", "nl", "cs", "ar", "zh-cn", "ja", "hu",
    "ko",
];

impl LanguageCode {
    /// Get the engine wire code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Polish => "pl",
            LanguageCode::Turkish => "tr",
            LanguageCode::Russian => "ru",
            LanguageCode::Dutch => "nl",
            LanguageCode::Czech => "cs",
            LanguageCode::Arabic => "ar",
            LanguageCode::Chinese => "zh-cn",
            LanguageCode::Japanese => "ja",
            LanguageCode::Hungarian => "hu",
            LanguageCode::Korean => "ko",
        }
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::English => LanguageCode::English,
            Language::Spanish => LanguageCode::Spanish,
            Language::French => LanguageCode::French,
            Language::German => LanguageCode::German,
            Language::Italian => LanguageCode::Italian,
            Language::Portuguese => LanguageCode::Portuguese,
            Language::Polish => LanguageCode::Polish,
            Language::Turkish => LanguageCode::Turkish,
            Language::Russian => LanguageCode::Russian,
            Language::Dutch => LanguageCode::Dutch,
            Language::Czech => LanguageCode::Czech,
            Language::Arabic => LanguageCode::Arabic,
            Language::Chinese => LanguageCode::Chinese,
            Language::Japanese => LanguageCode::Japanese,
            Language::Hungarian => LanguageCode::Hungarian,
            Language::Korean => LanguageCode::Korean,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language code '{0}' (expected one of: {})", SUPPORTED_CODES.join(", "))]
pub struct UnsupportedLanguage(String);

impl std::str::FromStr for LanguageCode {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(LanguageCode::English),
            "es" => Ok(LanguageCode::Spanish),
            "fr" => Ok(LanguageCode::French),
            "de" => Ok(LanguageCode::German),
            "it" => Ok(LanguageCode::Italian),
            "pt" => Ok(LanguageCode::Portuguese),
            "pl" => Ok(LanguageCode::Polish),
            "tr" => Ok(LanguageCode::Turkish),
            "ru" => Ok(LanguageCode::Russian),
            "nl" => Ok(LanguageCode::Dutch),
            "cs" => Ok(LanguageCode::Czech),
            "ar" => Ok(LanguageCode::Arabic),
            "zh-cn" => Ok(LanguageCode::Chinese),
            "ja" => Ok(LanguageCode::Japanese),
            "hu" => Ok(LanguageCode::Hungarian),
            "ko" => Ok(LanguageCode::Korean),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}
