//! Decision engine: compare a template env file with a destination and
//! decide whether to create, overwrite or leave the destination alone.
//!
//! # Decision Logic
//!
//! 1. The source must exist and parse, otherwise nothing else happens
//! 2. No destination: it is created from the source, whatever `overwrite` says
//! 3. Destination parses and matches the source key for key: nothing to do
//! 4. Destination diverges: every differing key is reported, then
//!    - with `overwrite`, the destination is replaced by the source
//!      (destination-only keys are lost)
//!    - without it, the destination is kept as is
//!
//!    and the configured delay is observed before returning.
//!
//! # Examples
//!
//! ```rust,no_run
//! use make_env_file::sync::{EnvSync, EnvSyncOptions};
//! use std::path::PathBuf;
//!
//! let options = EnvSyncOptions {
//!     source_file: PathBuf::from(".env.example"),
//!     dest_file: PathBuf::from(".env"),
//!     overwrite: false,
//!     sleep_seconds: 0,
//! };
//!
//! EnvSync::sync_with_options(&options).unwrap();
//! ```

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

#[cfg(feature = "tracing")]
use tracing::{debug, info, warn};

use crate::{
  copy::{CopyError, copy_file},
  diff::{DiffResult, diff},
  parse::{LoadError, ParseError, ParsedConfig},
};

const DEFAULT_SOURCE_FILENAME: &str = ".env.example";
const DEFAULT_DEST_FILENAME: &str = ".env";

/// Main service tying the parser, differ and copier together.
pub struct EnvSync;

impl EnvSync {
  /// Runs a full check-then-apply cycle.
  ///
  /// The delay is validated before any file is touched.
  pub fn sync_with_options(options: &EnvSyncOptions) -> Result<SyncAction, EnvSyncError> {
    options.sleep_duration()?;

    #[cfg(feature = "tracing")]
    info!(
      "create {} from {}",
      options.dest_file.display(),
      options.source_file.display()
    );

    let report = Self::check(&options.source_file, &options.dest_file)?;
    Self::apply(options, &report)
  }

  /// Parses both files and classifies the destination.
  ///
  /// Source errors are returned before the destination is looked at.
  pub fn check<S: AsRef<Path>, D: AsRef<Path>>(
    source_file: S,
    dest_file: D,
  ) -> Result<SyncReport, EnvSyncError> {
    let source_file = source_file.as_ref();
    let dest_file = dest_file.as_ref();

    if !source_file.is_file() {
      return Err(EnvSyncError::SourceNotFound(source_file.to_path_buf()));
    }

    let source = ParsedConfig::from_path(source_file).map_err(EnvSyncError::Source)?;

    if !dest_file.exists() {
      #[cfg(feature = "tracing")]
      debug!(?dest_file, "Destination does not exist");

      return Ok(SyncReport {
        decision: SyncDecision::Initialize,
        diff: DiffResult {
          source_only: source.entries,
          ..DiffResult::default()
        },
      });
    }

    let dest = ParsedConfig::from_path(dest_file).map_err(EnvSyncError::Destination)?;
    let diff = diff(&source, &dest);

    let decision = if diff.is_empty() {
      SyncDecision::NoChange
    } else {
      SyncDecision::Diverged
    };

    #[cfg(feature = "tracing")]
    debug!(?decision, "Destination checked");

    Ok(SyncReport { decision, diff })
  }

  /// Acts on a report produced by [`EnvSync::check`].
  pub fn apply(options: &EnvSyncOptions, report: &SyncReport) -> Result<SyncAction, EnvSyncError> {
    let delay = options.sleep_duration()?;
    let source_file = &options.source_file;
    let dest_file = &options.dest_file;

    match report.decision {
      SyncDecision::Initialize => {
        #[cfg(feature = "tracing")]
        {
          info!("dest file {} does not exist", dest_file.display());
          for line in report.warnings(source_file, dest_file) {
            info!("{}", line);
          }
        }

        copy_file(source_file, dest_file)?;
        Ok(SyncAction::Created)
      }
      SyncDecision::NoChange => {
        #[cfg(feature = "tracing")]
        info!("config files values are equal, do nothing");

        Ok(SyncAction::Unchanged)
      }
      SyncDecision::Diverged => {
        #[cfg(feature = "tracing")]
        {
          warn!(
            "warning, {} config values are not equal:",
            report.diff.difference_count()
          );
          for line in report.warnings(source_file, dest_file) {
            warn!("{}", line);
          }
        }

        let action = if options.overwrite {
          #[cfg(feature = "tracing")]
          info!("overwrite enabled");

          copy_file(source_file, dest_file)?;
          SyncAction::Overwritten
        } else {
          #[cfg(feature = "tracing")]
          info!("overwrite disabled, do nothing");

          SyncAction::Kept
        };

        Self::pause(delay);

        Ok(action)
      }
    }
  }

  fn pause(delay: Duration) {
    if delay.is_zero() {
      return;
    }

    #[cfg(feature = "tracing")]
    info!("sleep for {} seconds", delay.as_secs());

    std::thread::sleep(delay);
  }
}

/// Outcome of [`EnvSync::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
  /// The destination does not exist yet.
  Initialize,
  /// Every key matches.
  NoChange,
  /// At least one key differs or is missing on one side.
  Diverged,
}

/// What [`EnvSync::apply`] did to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
  Created,
  Overwritten,
  Kept,
  Unchanged,
}

/// Decision plus the diff it was based on.
///
/// For [`SyncDecision::Initialize`] every source entry is in `source_only`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
  pub decision: SyncDecision,
  pub diff: DiffResult,
}

impl SyncReport {
  /// One human-readable line per differing key: changed values first, then
  /// keys missing from the destination, then keys missing from the source.
  pub fn warnings(&self, source_file: &Path, dest_file: &Path) -> Vec<String> {
    let changed = self
      .diff
      .changed
      .iter()
      .map(|entry| format!("\t- {} is different", entry.name));
    let missing_in_dest = self.diff.source_only.iter().map(|entry| {
      format!(
        "\t- {} is not in dest config `{}`",
        entry.name,
        dest_file.display()
      )
    });
    let missing_in_source = self.diff.dest_only.iter().map(|entry| {
      format!(
        "\t- {} is not in source config `{}`",
        entry.name,
        source_file.display()
      )
    });

    changed.chain(missing_in_dest).chain(missing_in_source).collect()
  }
}

/// Configuration options for a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSyncOptions {
  /// Template file, `.env.example` by default.
  pub source_file: PathBuf,
  /// File to create or check, `.env` by default.
  pub dest_file: PathBuf,
  /// Replace a diverging destination with the source.
  pub overwrite: bool,
  /// Seconds to block after reporting a divergence. Must not be negative.
  pub sleep_seconds: i64,
}

impl EnvSyncOptions {
  pub fn sleep_duration(&self) -> Result<Duration, EnvSyncError> {
    u64::try_from(self.sleep_seconds)
      .map(Duration::from_secs)
      .map_err(|_| EnvSyncError::InvalidSleep(self.sleep_seconds))
  }
}

impl Default for EnvSyncOptions {
  fn default() -> Self {
    Self {
      source_file: PathBuf::from(DEFAULT_SOURCE_FILENAME),
      dest_file: PathBuf::from(DEFAULT_DEST_FILENAME),
      overwrite: false,
      sleep_seconds: 0,
    }
  }
}

/// Broad category of an [`EnvSyncError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  FileNotFound,
  MalformedLine,
  Io,
  InvalidConfig,
}

/// Errors that can occur during a sync run.
#[derive(Debug, thiserror::Error)]
pub enum EnvSyncError {
  /// Source file does not exist
  #[error("source file: {}, not found", .0.display())]
  SourceNotFound(PathBuf),
  /// Error reading or parsing the source file
  #[error("Source file error: {0}")]
  Source(LoadError),
  /// Error reading or parsing the destination file
  #[error("Destination file error: {0}")]
  Destination(LoadError),
  /// Error replacing the destination
  #[error(transparent)]
  Copy(#[from] CopyError),
  /// Negative delay
  #[error("sleep must be a positive value, got {0}")]
  InvalidSleep(i64),
}

impl EnvSyncError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      EnvSyncError::SourceNotFound(_) => ErrorKind::FileNotFound,
      EnvSyncError::Source(err) | EnvSyncError::Destination(err) => match err {
        LoadError::NotFound(_) => ErrorKind::FileNotFound,
        LoadError::Io { .. } => ErrorKind::Io,
        LoadError::Parse { .. } => ErrorKind::MalformedLine,
      },
      EnvSyncError::Copy(CopyError::Read(_, e)) if e.kind() == std::io::ErrorKind::NotFound => {
        ErrorKind::FileNotFound
      }
      EnvSyncError::Copy(_) => ErrorKind::Io,
      EnvSyncError::InvalidSleep(_) => ErrorKind::InvalidConfig,
    }
  }

  /// Parse error behind this error, if any.
  pub fn parse_error(&self) -> Option<&ParseError> {
    match self {
      EnvSyncError::Source(LoadError::Parse { source, .. })
      | EnvSyncError::Destination(LoadError::Parse { source, .. }) => Some(source),
      _ => None,
    }
  }
}
