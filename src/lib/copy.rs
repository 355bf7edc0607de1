//! Whole-file replacement of the destination by the source.

use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Replaces the contents of `dest` with the bytes of `source`.
///
/// The bytes are written to a temporary file next to `dest` which is then
/// renamed over it, so `dest` is either the old file or the new one. An
/// existing `dest` is resolved through symlinks first and keeps its
/// permissions; a new one is created with mode 0644 on unix.
pub fn copy_file<S: AsRef<Path>, D: AsRef<Path>>(source: S, dest: D) -> Result<(), CopyError> {
  let source = source.as_ref();
  let dest = dest.as_ref();

  #[cfg(feature = "tracing")]
  info!("copy {} to {}", source.display(), dest.display());

  let data = fs::read(source).map_err(|e| CopyError::Read(source.to_path_buf(), e))?;

  let write_err = |e: io::Error| CopyError::Write(dest.to_path_buf(), e);

  let (target, permissions) = match fs::metadata(dest) {
    Ok(metadata) => (
      fs::canonicalize(dest).map_err(write_err)?,
      Some(metadata.permissions()),
    ),
    Err(e) if e.kind() == io::ErrorKind::NotFound => (dest.to_path_buf(), None),
    Err(e) => return Err(write_err(e)),
  };

  let dir = match target.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  #[cfg(feature = "tracing")]
  debug!(
    "Writing {} bytes to {:?} through a temporary file in {:?}",
    data.len(),
    target,
    dir
  );

  let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
  tmp.write_all(&data).map_err(write_err)?;
  tmp.as_file().sync_all().map_err(write_err)?;

  match permissions {
    Some(permissions) => tmp.as_file().set_permissions(permissions).map_err(write_err)?,
    #[cfg(unix)]
    None => {
      use std::os::unix::fs::PermissionsExt;
      tmp
        .as_file()
        .set_permissions(fs::Permissions::from_mode(NEW_FILE_MODE))
        .map_err(write_err)?;
    }
    #[cfg(not(unix))]
    None => {}
  }

  tmp
    .persist(&target)
    .map_err(|e| CopyError::Persist(target.clone(), e.error))?;

  Ok(())
}

/// Errors that can occur while copying the source over the destination.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
  #[error("Failed to read {}: {}", .0.display(), .1)]
  Read(PathBuf, io::Error),
  #[error("Failed to write {}: {}", .0.display(), .1)]
  Write(PathBuf, io::Error),
  #[error("Failed to replace {}: {}", .0.display(), .1)]
  Persist(PathBuf, io::Error),
}
