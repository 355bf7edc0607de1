//! Line-oriented `key=value` parser.
//!
//! Each line of an env file is one of:
//! - blank (empty or whitespace only), skipped
//! - a comment (first non-whitespace character is `#`), skipped
//! - an assignment, split on the first `=`
//!
//! Anything else fails the whole parse with the 1-based line number.

use std::{
  fmt, io,
  path::{Path, PathBuf},
};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

const COMMENT_PREFIX: &str = "#";
const ASSIGNMENT_OPERATOR: char = '=';

/// One `name=value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
  pub name: String,
  pub value: String,
}

impl ConfigEntry {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }
}

impl fmt::Display for ConfigEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.name, ASSIGNMENT_OPERATOR, self.value)
  }
}

/// The assignments of one file, in file order.
///
/// Duplicate names are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedConfig {
  pub entries: Vec<ConfigEntry>,
}

impl ParsedConfig {
  /// Reads and parses the file at `path`.
  ///
  /// A missing file is reported as [`LoadError::NotFound`], separately from
  /// other read failures. Bytes that are not valid UTF-8 are replaced with
  /// U+FFFD rather than rejected.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
    let path = path.as_ref();

    #[cfg(feature = "tracing")]
    debug!(?path, "Reading config file");

    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
      io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
      _ => LoadError::Io {
        path: path.to_path_buf(),
        source,
      },
    })?;

    let content = String::from_utf8_lossy(&bytes);

    Self::try_from(content.as_ref()).map_err(|source| LoadError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// First entry with the given name.
  pub fn get(&self, name: &str) -> Option<&ConfigEntry> {
    self.entries.iter().find(|entry| entry.name == name)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl fmt::Display for ParsedConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for entry in &self.entries {
      writeln!(f, "{}", entry)?;
    }
    Ok(())
  }
}

impl TryFrom<&str> for ParsedConfig {
  type Error = ParseError;

  fn try_from(s: &str) -> Result<Self, Self::Error> {
    #[cfg(feature = "tracing")]
    debug!("Parsing config with {} lines", s.lines().count());

    let mut entries = Vec::new();

    for (index, raw) in s.lines().enumerate() {
      #[cfg(feature = "tracing")]
      trace!("Parsing line {}: {:?}", index + 1, raw);

      if let Line::Assignment(entry) = Line::parse(raw, index + 1)? {
        entries.push(entry);
      }
    }

    #[cfg(feature = "tracing")]
    debug!("Parsed {} entries", entries.len());

    Ok(Self { entries })
  }
}

/// Classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
  Blank,
  Comment,
  Assignment(ConfigEntry),
}

impl Line {
  /// Classifies `raw`, using `number` (1-based) for error reporting.
  pub fn parse(raw: &str, number: usize) -> Result<Self, ParseError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
      return Ok(Line::Blank);
    }
    if trimmed.starts_with(COMMENT_PREFIX) {
      return Ok(Line::Comment);
    }

    match trimmed.split_once(ASSIGNMENT_OPERATOR) {
      Some((name, value)) if !name.is_empty() => {
        Ok(Line::Assignment(ConfigEntry::new(name, value)))
      }
      _ => Err(ParseError::MalformedLine {
        line: number,
        content: raw.to_string(),
      }),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
  #[error("Unknown property on line {line}: {content:?}")]
  MalformedLine { line: usize, content: String },
}

impl ParseError {
  pub fn line(&self) -> usize {
    match self {
      ParseError::MalformedLine { line, .. } => *line,
    }
  }
}

/// Errors reading a config file from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("File not found: {}", .0.display())]
  NotFound(PathBuf),
  #[error("Failed to read {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },
  #[error("{}: {source}", path.display())]
  Parse { path: PathBuf, source: ParseError },
}
