use std::fs;
use std::path::Path;

use rand::Rng;
use thiserror::Error;

const WORDS_BUILTIN: &str = include_str!("../../assets/words.json");

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("word list is empty")]
    Empty,
    #[error("invalid word {0:?}: words must be non-empty ASCII letters and digits")]
    InvalidWord(String),
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse word list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Words are typed letter by letter, so only ASCII letters and digits are kept.
fn is_typeable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A validated, non-empty list of lowercase words.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// The built-in vocabulary embedded at compile time.
    pub fn builtin() -> Self {
        let words: Vec<String> = serde_json::from_str(WORDS_BUILTIN).unwrap_or_default();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| is_typeable(w))
            .collect();

        if words.is_empty() {
            // Only reachable if the embedded asset is broken.
            return Self {
                words: vec!["wordfall".to_string()],
            };
        }
        Self { words }
    }

    /// Builds a vocabulary from caller-supplied words. Words are trimmed and
    /// lowercased; an empty list or a word that is not plain ASCII letters and
    /// digits is rejected.
    pub fn from_words<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !is_typeable(&word) {
                return Err(VocabularyError::InvalidWord(word));
            }
            out.push(word);
        }
        if out.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self { words: out })
    }

    /// Loads a word list from disk. `.json` files must hold an array of
    /// strings; anything else is read as one word per line, skipping blank
    /// lines and `#` comments.
    pub fn load_file(path: &Path) -> Result<Self, VocabularyError> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            let words: Vec<String> = serde_json::from_str(&content)?;
            Self::from_words(words)
        } else {
            Self::from_words(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#')),
            )
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        let idx = rng.gen_range(0..self.words.len());
        &self.words[idx]
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::io::Write;

    #[test]
    fn test_builtin_is_large_and_clean() {
        let vocab = Vocabulary::builtin();
        assert!(vocab.len() > 100);
        assert!(
            vocab
                .words()
                .iter()
                .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphanumeric()))
        );
    }

    #[test]
    fn test_from_words_rejects_empty_list() {
        let err = Vocabulary::from_words(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, VocabularyError::Empty));
    }

    #[test]
    fn test_from_words_rejects_blank_and_spaced_words() {
        assert!(matches!(
            Vocabulary::from_words(["ok", "  "]),
            Err(VocabularyError::InvalidWord(_))
        ));
        assert!(matches!(
            Vocabulary::from_words(["two words"]),
            Err(VocabularyError::InvalidWord(_))
        ));
    }

    #[test]
    fn test_from_words_uses_builtin_rules() {
        for word in ["snake_case", "café", "dash-ed"] {
            assert!(
                matches!(
                    Vocabulary::from_words([word]),
                    Err(VocabularyError::InvalidWord(_))
                ),
                "{word} should be rejected"
            );
        }
        assert!(Vocabulary::from_words(["web3"]).is_ok());
    }

    #[test]
    fn test_from_words_normalizes_case() {
        let vocab = Vocabulary::from_words([" Rust ", "CRATE"]).unwrap();
        assert_eq!(vocab.words(), &["rust".to_string(), "crate".to_string()]);
    }

    #[test]
    fn test_choose_stays_in_list() {
        let vocab = Vocabulary::from_words(["alpha", "bravo", "charlie"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let w = vocab.choose(&mut rng);
            assert!(vocab.words().iter().any(|x| x == w));
        }
    }

    #[test]
    fn test_load_plain_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "# custom list\nalpha\n\nbravo").unwrap();
        let vocab = Vocabulary::load_file(file.path()).unwrap();
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"["delta", "echo"]"#).unwrap();
        let vocab = Vocabulary::load_file(file.path()).unwrap();
        assert_eq!(vocab.words()[1], "echo");
    }

    #[test]
    fn test_load_empty_json_file_is_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[]").unwrap();
        assert!(matches!(
            Vocabulary::load_file(file.path()),
            Err(VocabularyError::Empty)
        ));
    }
}
