//! Loading and normalizing word lists.
//!
//! Fingerprints only count the bytes `A` through `Z`, so word lists are usually uppercased (and
//! sometimes stripped of everything else) before they are grouped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: word list is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf, line: usize },
}

/// How each line of a word list is turned into a word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Normalization {
    /// Keep the line as is, apart from its line terminator.
    Raw,
    /// Trim surrounding whitespace and uppercase ASCII letters.
    #[default]
    Uppercase,
    /// Uppercase, then drop every character outside `A..=Z`.
    LettersOnly,
}

impl Normalization {
    /// Normalize one line, or `None` if nothing is left of it.
    pub fn apply(self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let word = match self {
            Self::Raw => line.to_string(),
            Self::Uppercase => line.trim().to_ascii_uppercase(),
            Self::LettersOnly => line
                .chars()
                .map(|c| c.to_ascii_uppercase())
                .filter(char::is_ascii_uppercase)
                .collect(),
        };
        (!word.is_empty()).then(|| word)
    }
}

/// Split `text` into one word per line, skipping lines that normalize to nothing.
pub fn parse_words(text: &str, normalization: Normalization) -> Vec<String> {
    text.lines()
        .filter_map(|line| normalization.apply(line))
        .collect()
}

/// Read a word list with one word per line.
pub fn load_words(
    path: impl AsRef<Path>,
    normalization: Normalization,
) -> Result<Vec<String>, WordListError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| WordListError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut words = Vec::new();
    for (i, line) in bytes.split(|&b| b == b'\n').enumerate() {
        let line = std::str::from_utf8(line).map_err(|_| WordListError::NotUtf8 {
            path: path.to_path_buf(),
            line: i + 1,
        })?;
        words.extend(normalization.apply(line));
    }
    debug!(path = %path.display(), words = words.len(), ?normalization, "loaded word list");
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn word_list(contents: &[u8]) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn normalizations() {
        assert_eq!(Normalization::Raw.apply(" Tea\r").as_deref(), Some(" Tea"));
        assert_eq!(Normalization::Uppercase.apply(" Tea\r").as_deref(), Some("TEA"));
        assert_eq!(
            Normalization::LettersOnly.apply("o'Clock-2").as_deref(),
            Some("OCLOCK")
        );
        assert_eq!(Normalization::LettersOnly.apply("café").as_deref(), Some("CAF"));
    }

    #[test]
    fn blank_lines_dropped() {
        assert_eq!(Normalization::Raw.apply(""), None);
        assert_eq!(Normalization::Uppercase.apply("   "), None);
        assert_eq!(Normalization::LettersOnly.apply("--"), None);
    }

    #[test]
    fn parse() {
        let text = "listen\r\nsilent\n\n  enlist \nbanana";
        assert_eq!(
            parse_words(text, Normalization::Uppercase),
            vec!["LISTEN", "SILENT", "ENLIST", "BANANA"]
        );
    }

    #[test]
    fn load() {
        let (_dir, path) = word_list(b"stop\npots\n\ntops\n");
        let words = load_words(&path, Normalization::default()).unwrap();
        assert_eq!(words, vec!["STOP", "POTS", "TOPS"]);
    }

    #[test]
    fn load_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_words(&path, Normalization::Raw).unwrap_err();
        assert!(matches!(err, WordListError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn load_not_utf8() {
        let (_dir, path) = word_list(b"fine\nalso fine\n\xff\xfe\n");
        let err = load_words(&path, Normalization::Uppercase).unwrap_err();
        match err {
            WordListError::NotUtf8 { line, .. } => assert_eq!(line, 3),
            err => panic!("unexpected error: {}", err),
        }
    }
}
