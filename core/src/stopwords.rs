use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const ENGLISH_LIST: &str = include_str!("../data/english_stopwords.txt");

lazy_static! {
    static ref BUILTIN: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","an","the","and","or","but","is","are","was","were",
            "in","on","at","to","for","with","by","about","like",
            "from","of","as","this","that","these","those","it","its",
            "be","been","being","have","has","had","do","does","did",
            "will","would","should","could","may","might","must","can",
        ];
        words.iter().copied().collect()
    };
}

/// Function words excluded from both indexing and queries.
///
/// Built once at startup and never mutated afterwards; the tokenizer only
/// ever asks whether a lowercased token is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The short built-in function-word list.
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN.iter().copied())
    }

    /// The bundled standard English list.
    pub fn english() -> Self {
        Self::from_lines(ENGLISH_LIST.lines())
    }

    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        Ok(Self::from_lines(lines.iter().map(String::as_str)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("opening stopword list {}", path.display()))?;
        let set = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(path = %path.display(), words = set.len(), "loaded stopword list");
        Ok(set)
    }

    fn from_lines<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Self {
        Self::from_words(
            lines
                .into_iter()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Where the stopword set comes from: `builtin`, `english`, or a path to a word list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StopwordSource {
    #[default]
    Builtin,
    English,
    File(PathBuf),
}

impl StopwordSource {
    pub fn load(&self) -> Result<StopwordSet> {
        match self {
            StopwordSource::Builtin => Ok(StopwordSet::builtin()),
            StopwordSource::English => Ok(StopwordSet::english()),
            StopwordSource::File(path) => StopwordSet::from_file(path),
        }
    }
}

impl FromStr for StopwordSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "builtin" | "default" => StopwordSource::Builtin,
            "english" => StopwordSource::English,
            other => StopwordSource::File(PathBuf::from(other)),
        })
    }
}

impl fmt::Display for StopwordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopwordSource::Builtin => f.write_str("builtin"),
            StopwordSource::English => f.write_str("english"),
            StopwordSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}
