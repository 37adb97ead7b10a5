//! Append-only mail record of every rendered letter in a run.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::SantaError;

/// Width of the `*` line written after each letter.
pub const SEPARATOR_WIDTH: usize = 80;

/// Handle to the run's record file.
///
/// The file is truncated once by [`MailRecord::create`] and then only ever
/// appended to; it is never read back during a run.
#[derive(Debug, Clone)]
pub struct MailRecord {
    path: PathBuf,
}

impl MailRecord {
    /// Create or truncate the record file, creating parent directories.
    pub fn create(path: &Path) -> Result<Self, SantaError> {
        let record_err = |source| SantaError::Record {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(record_err)?;
        }
        File::create(path).map_err(record_err)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one block: `text` followed by the separator line.
    pub fn append(&self, text: &str) -> Result<(), SantaError> {
        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new().append(true).open(&self.path)?;
            file.write_all(text.as_bytes())?;
            if !text.is_empty() && !text.ends_with('\n') {
                file.write_all(b"\n")?;
            }
            writeln!(file, "{}", separator())
        };
        write().map_err(|source| SantaError::Record {
            path: self.path.clone(),
            source,
        })
    }
}

pub fn separator() -> String {
    "*".repeat(SEPARATOR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_truncates_existing_record() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("record.txt");
        fs::write(&path, "stale letters").expect("seed");

        let record = MailRecord::create(&path).expect("create");
        assert_eq!(fs::read_to_string(record.path()).expect("read"), "");
    }

    #[test]
    fn append_writes_text_then_separator() {
        let temp = tempfile::tempdir().expect("tempdir");
        let record = MailRecord::create(&temp.path().join("nested/record.txt")).expect("create");
        record.append("first\n").expect("append");
        record.append("second").expect("append");

        let contents = fs::read_to_string(record.path()).expect("read");
        let sep = separator();
        assert_eq!(contents, format!("first\n{sep}\nsecond\n{sep}\n"));
        assert_eq!(sep.len(), 80);
    }

    #[test]
    fn append_to_removed_record_is_a_record_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("record.txt");
        let record = MailRecord::create(&path).expect("create");
        drop(temp);

        let err = record.append("letter").expect_err("dir is gone");
        assert!(matches!(err, SantaError::Record { .. }));
    }
}
