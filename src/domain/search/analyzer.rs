// src/domain/search/analyzer.rs
use super::stopwords;
use crate::domain::errors::DomainError;
use rust_stemmers::{Algorithm, Stemmer};
use std::{collections::HashSet, fmt, str::FromStr, sync::LazyLock};
use unicode_normalization::UnicodeNormalization;

static SPANISH_STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| stopwords::SPANISH.iter().copied().collect());
static ENGLISH_STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| stopwords::ENGLISH.iter().copied().collect());

/// Natural-language normalization profile. Names match PostgreSQL `regconfig`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextLanguage {
    #[default]
    Spanish,
    English,
    Simple,
}

impl TextLanguage {
    pub fn regconfig(self) -> &'static str {
        match self {
            TextLanguage::Spanish => "spanish",
            TextLanguage::English => "english",
            TextLanguage::Simple => "simple",
        }
    }
}

impl fmt::Display for TextLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regconfig())
    }
}

impl FromStr for TextLanguage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spanish" | "es" => Ok(TextLanguage::Spanish),
            "english" | "en" => Ok(TextLanguage::English),
            "simple" => Ok(TextLanguage::Simple),
            other => Err(DomainError::Validation(format!(
                "unsupported search language: {other}"
            ))),
        }
    }
}

/// A normalized word and its 1-based position in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub position: u32,
}

/// Splits text into words, lowercases them, drops stop words and stems the rest.
///
/// Stop words still consume a position, mirroring how `to_tsvector` numbers words.
pub struct Analyzer {
    language: TextLanguage,
    stemmer: Option<Stemmer>,
}

impl Analyzer {
    pub fn new(language: TextLanguage) -> Self {
        let stemmer = match language {
            TextLanguage::Spanish => Some(Stemmer::create(Algorithm::Spanish)),
            TextLanguage::English => Some(Stemmer::create(Algorithm::English)),
            TextLanguage::Simple => None,
        };
        Self { language, stemmer }
    }

    pub fn tokens(&self, text: &str) -> Vec<Token> {
        let normalized: String = text.nfc().collect();
        let mut tokens = Vec::new();
        let mut position = 0u32;

        for word in normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            position = position.saturating_add(1);
            let word = word.to_lowercase();
            if self.is_stop_word(&word) {
                continue;
            }
            tokens.push(Token {
                lexeme: self.stem(&word),
                position,
            });
        }

        tokens
    }

    /// Distinct lexemes of a query, in order of first appearance.
    pub fn query_lexemes(&self, query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokens(query)
            .into_iter()
            .map(|token| token.lexeme)
            .filter(|lexeme| seen.insert(lexeme.clone()))
            .collect()
    }

    fn is_stop_word(&self, word: &str) -> bool {
        match self.language {
            TextLanguage::Spanish => SPANISH_STOPWORDS.contains(word),
            TextLanguage::English => ENGLISH_STOPWORDS.contains(word),
            TextLanguage::Simple => false,
        }
    }

    fn stem(&self, word: &str) -> String {
        match &self.stemmer {
            Some(stemmer) if word.chars().any(char::is_alphabetic) => {
                stemmer.stem(word).into_owned()
            }
            _ => word.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_drops_stop_words_but_keeps_positions() {
        let analyzer = Analyzer::new(TextLanguage::Spanish);
        let tokens = analyzer.tokens("El desarrollo de aplicaciones");
        let positions: Vec<u32> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![2, 4]);
    }

    #[test]
    fn spanish_stems_inflected_forms_to_same_lexeme() {
        let analyzer = Analyzer::new(TextLanguage::Spanish);
        assert_eq!(
            analyzer.query_lexemes("aplicaciones"),
            analyzer.query_lexemes("aplicación")
        );
    }

    #[test]
    fn composed_and_decomposed_accents_match() {
        let analyzer = Analyzer::new(TextLanguage::Spanish);
        let composed = analyzer.query_lexemes("canci\u{f3}n");
        let decomposed = analyzer.query_lexemes("cancio\u{301}n");
        assert_eq!(composed, decomposed);
    }

    #[test]
    fn query_lexemes_are_unique() {
        let analyzer = Analyzer::new(TextLanguage::Simple);
        assert_eq!(
            analyzer.query_lexemes("Django django DJANGO web"),
            vec!["django".to_string(), "web".to_string()]
        );
    }

    #[test]
    fn only_stop_words_yields_nothing() {
        let analyzer = Analyzer::new(TextLanguage::Spanish);
        assert!(analyzer.query_lexemes("de la que el").is_empty());
    }

    #[test]
    fn language_parses_common_aliases() {
        assert_eq!("ES".parse::<TextLanguage>().unwrap(), TextLanguage::Spanish);
        assert_eq!(
            "english".parse::<TextLanguage>().unwrap(),
            TextLanguage::English
        );
        assert!("klingon".parse::<TextLanguage>().is_err());
    }
}
