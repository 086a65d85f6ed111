use std::fmt;

use serde::{Deserialize, Serialize};

/// Display locale for narrative text and option labels.
///
/// Korean is the default, matching the game's primary audience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Korean.
    #[default]
    Ko,
    /// English.
    En,
    /// Chinese.
    Zh,
}

impl Locale {
    /// All supported locales.
    pub fn all() -> [Locale; 3] {
        [Locale::Ko, Locale::En, Locale::Zh]
    }

    /// Parse a locale code, case-insensitive. Unknown codes yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ko" => Some(Self::Ko),
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }

    /// The wire code for this locale.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
