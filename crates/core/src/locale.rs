//! Supported content locales.
//!
//! Locale codes are stored as lowercase text in every translation table and
//! guarded by a `CHECK (locale IN ('az', 'en', 'ru'))` constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Azerbaijani, the site's primary locale.
    #[default]
    Az,
    En,
    Ru,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Az, Locale::En, Locale::Ru];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Az => "az",
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "az" => Ok(Locale::Az),
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(CoreError::Validation(format!(
                "Unsupported locale '{other}'. Expected one of: az, en, ru"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_known_locales_case_insensitively() {
        assert_eq!("az".parse::<Locale>().unwrap(), Locale::Az);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" ru ".parse::<Locale>().unwrap(), Locale::Ru);
    }

    #[test]
    fn rejects_unknown_locale() {
        assert_matches!("de".parse::<Locale>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn display_matches_stored_code() {
        for locale in Locale::ALL {
            assert_eq!(locale.to_string(), locale.as_str());
        }
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Locale::Ru).unwrap(), "\"ru\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
