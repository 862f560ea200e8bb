//! Artifact persistence.
//!
//! Code artifacts are only rewritten when their bytes change, so build
//! systems watching the output directory do not rebuild after a no-op
//! generation. The check is an unsynchronized read-then-write; two runs
//! against the same directory at once are not supported.

use crate::error::{GenError, GenResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// What happened to an artifact on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Whether `path` already holds exactly `contents`.
///
/// Lengths are compared before contents are read.
pub fn is_unchanged(path: &Path, contents: &[u8]) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };

    if !metadata.is_file() || metadata.len() != contents.len() as u64 {
        return false;
    }

    fs::read(path).is_ok_and(|existing| existing == contents)
}

/// Write `contents` to `path` unless the file already matches.
pub fn write_if_changed(path: &Path, contents: &[u8]) -> GenResult<WriteOutcome> {
    if is_unchanged(path, contents) {
        info!(path = %path.display(), "artifact unchanged");
        return Ok(WriteOutcome::Unchanged);
    }

    write_always(path, contents)
}

/// Write `contents` to `path` unconditionally.
pub fn write_always(path: &Path, contents: &[u8]) -> GenResult<WriteOutcome> {
    fs::write(path, contents).map_err(|e| GenError::io(path, e))?;
    info!(path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_if_changed___missing_file___writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.h");

        let outcome = write_if_changed(&path, b"contents").unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read(&path).unwrap(), b"contents");
    }

    #[test]
    fn write_if_changed___identical_file___skips_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.h");
        fs::write(&path, b"contents").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let outcome = write_if_changed(&path, b"contents").unwrap();

        assert_eq!(outcome, WriteOutcome::Unchanged);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn write_if_changed___same_length_different_bytes___writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.h");
        fs::write(&path, b"aaaa").unwrap();

        let outcome = write_if_changed(&path, b"bbbb").unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(fs::read(&path).unwrap(), b"bbbb");
    }

    #[test]
    fn write_if_changed___different_length___writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.h");
        fs::write(&path, b"short").unwrap();

        let outcome = write_if_changed(&path, b"much longer").unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
    }

    #[test]
    fn write_always___identical_file___still_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Chunks.md");
        fs::write(&path, b"docs").unwrap();

        let outcome = write_always(&path, b"docs").unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
    }

    #[test]
    fn write_always___missing_directory___io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.h");

        let result = write_always(&path, b"x");

        assert!(matches!(result, Err(GenError::Io { .. })));
    }

    #[test]
    fn is_unchanged___directory___false() {
        let dir = TempDir::new().unwrap();

        assert!(!is_unchanged(dir.path(), b""));
    }
}
