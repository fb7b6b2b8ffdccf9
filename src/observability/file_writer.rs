//! Size-rotated, append-only line file.
//!
//! [`RotatingFile`] appends one line per write. Before a write, if the live
//! file has grown past the policy's byte limit, it is shifted into numbered
//! backups:
//!
//! ```text
//! todo-sync-otlp.json     → todo-sync-otlp.json.1
//! todo-sync-otlp.json.1   → todo-sync-otlp.json.2
//! todo-sync-otlp.json.2   → todo-sync-otlp.json.3
//! todo-sync-otlp.json.3   → removed
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// When to rotate and how many backups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MiB live file, three backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            backups: 3,
        }
    }
}

/// Line writer with size-based rotation.
///
/// The handle is opened lazily on the first write, so constructing one never
/// touches the filesystem.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotating, opening or writing fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);

        let full = fs::metadata(&self.path).is_ok_and(|m| m.len() > self.policy.max_bytes);
        if full {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.policy.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.policy.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_policy() -> RotationPolicy {
        RotationPolicy {
            max_bytes: 8,
            backups: 2,
        }
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingFile::new(dir.path().join("trace.json"), RotationPolicy::default());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        let text = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(text, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::new(path.clone(), small_policy());

        writer.write_line("first-line").unwrap();
        writer.write_line("second-line").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.1")).unwrap(), "first-line\n");
    }

    #[test]
    fn keeps_at_most_policy_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::new(path.clone(), small_policy());

        for line in ["one-0000", "two-0000", "three-00", "four-000"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "four-000\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.1")).unwrap(), "three-00\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.json.2")).unwrap(), "two-0000\n");
        assert!(!dir.path().join("trace.json.3").exists());
    }
}
