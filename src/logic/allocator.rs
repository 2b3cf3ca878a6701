//! File-backed sequential player code allocator.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mints unique, strictly increasing player codes from a single counter file
/// holding the last issued value as decimal text.
///
/// The read-modify-write cycle runs under one exclusive lock and the new
/// value is flushed to disk before the lock is released, so an abnormal exit
/// can lose at most one id but never hand the same id out twice.
pub struct IdAllocator {
    path: PathBuf,
    guard: Mutex<()>,
}

impl IdAllocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Allocate the next id. Blocks until the counter lock is available; a
    /// missing counter file means this is the first allocation and yields 1.
    pub fn next_id(&self) -> io::Result<u32> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| io::Error::other("id counter lock poisoned"))?;

        let current = match fs::read_to_string(&self.path) {
            // An unreadable value restarts the counter at zero, same as a
            // missing file.
            Ok(text) => text.trim().parse::<u32>().unwrap_or(0),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };
        let next = current + 1;

        let mut file = fs::File::create(&self.path)?;
        file.write_all(next.to_string().as_bytes())?;
        file.sync_all()?;
        Ok(next)
    }
}
