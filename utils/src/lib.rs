//! Shared infrastructure utilities for Fairwalk.
//!
//! Filesystem concerns that don't belong in the IO-free `fairwalk-types` and
//! `fairwalk-core` crates:
//!
//! - **`atomic_write`**: Crash-safe, no-clobber file persistence (temp + link)
//! - **`export_file`**: Naming and writing per-participant export files

pub mod atomic_write;
pub mod export_file;

pub use atomic_write::{AtomicWriteOptions, FileSyncPolicy, atomic_write_new};
pub use export_file::{ExportWriteError, export_file_name, write_export};
