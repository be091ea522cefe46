use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Display languages the site is authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text keyed by language code. `tr` and `en` are always present; any other
/// language a user has added is kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub tr: String,
    #[serde(default)]
    pub en: String,
    #[serde(flatten)]
    pub other: BTreeMap<String, String>,
}

impl LocalizedText {
    pub fn new(tr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            tr: tr.into(),
            en: en.into(),
            other: BTreeMap::new(),
        }
    }

    /// The same string in every language. Used when upgrading fields that
    /// used to hold a single plain string.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text)
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Tr => &self.tr,
            Language::En => &self.en,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.tr.trim().is_empty() && self.en.trim().is_empty()
    }
}
