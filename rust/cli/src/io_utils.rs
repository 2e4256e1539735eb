//! File helpers for commands that write output files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Creates the parent directory of `path` when it does not exist yet.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use holdem_cli::io_utils::ensure_parent_dir;
///
/// let path = Path::new("output/data/file.jsonl");
/// ensure_parent_dir(path).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Line-delimited JSON writer (one record per line, LF only).
pub struct JsonlWriter {
    inner: BufWriter<File>,
}

impl JsonlWriter {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        ensure_parent_dir(path).map_err(std::io::Error::other)?;
        Ok(Self {
            inner: BufWriter::new(File::create(path)?),
        })
    }

    pub fn write<T: Serialize>(&mut self, record: &T) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.inner, record).map_err(std::io::Error::other)?;
        self.inner.write_all(b"\n")
    }

    pub fn finish(mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
