// Translation table: (language, key) -> display string
use anyhow::Context;
use std::collections::HashMap;

pub const FALLBACK_LANGUAGE: &str = "en";
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["en", "es", "fr", "de", "zh"];

const BUILTIN_TABLE: &str = include_str!("../../config/translations.toml");

#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    tables: HashMap<String, HashMap<String, String>>,
}

impl TranslationTable {
    /// Parse a TOML document with one table per language code.
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        let tables: HashMap<String, HashMap<String, String>> =
            toml::from_str(source).context("Failed to parse translation table")?;
        Ok(Self { tables })
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    pub fn is_supported(language: &str) -> bool {
        SUPPORTED_LANGUAGES.contains(&language)
    }

    /// Resolve `key` for `language`, falling back to English and then to the key itself.
    pub fn lookup<'a>(&'a self, language: &str, key: &'a str) -> &'a str {
        self.entry(language, key)
            .or_else(|| self.entry(FALLBACK_LANGUAGE, key))
            .unwrap_or(key)
    }

    fn entry(&self, language: &str, key: &str) -> Option<&str> {
        self.tables
            .get(language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Keys known to the English table, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .tables
            .get(FALLBACK_LANGUAGE)
            .map(|t| t.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}
