//! Atomic, no-clobber file writes.
//!
//! Bytes go to a temp file in the destination directory, which is then linked into
//! place only if nothing exists there yet. Readers never observe a half-written file,
//! and an existing file is never replaced.

#[cfg(unix)]
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
#[cfg(unix)]
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSyncPolicy {
    SyncAll,
    SkipSync,
}

#[derive(Debug, Clone, Copy)]
pub struct AtomicWriteOptions {
    /// Flush the temp file to disk before the rename.
    pub file_sync: FileSyncPolicy,
    /// Restrict the file to its owner (0o600). Ignored off Unix.
    pub owner_only: bool,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self {
            file_sync: FileSyncPolicy::SyncAll,
            owner_only: true,
        }
    }
}

/// Write `bytes` to a new file at `path`.
///
/// Fails with [`io::ErrorKind::AlreadyExists`] and leaves the old file untouched
/// when `path` already exists.
pub fn atomic_write_new(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    #[cfg(unix)]
    if options.owner_only {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
    }

    tmp.write_all(bytes)?;
    if matches!(options.file_sync, FileSyncPolicy::SyncAll) {
        tmp.as_file().sync_all()?;
    }

    if let Err(err) = tmp.persist_noclobber(path) {
        return Err(err.error);
    }

    if matches!(options.file_sync, FileSyncPolicy::SyncAll) {
        sync_parent_dir(parent);
    }
    Ok(())
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) {
    if let Err(e) = File::open(parent).and_then(|dir| dir.sync_all()) {
        debug!(path = %parent.display(), "Parent directory sync_all failed (best-effort): {e}");
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_parent: &Path) {}
