//! Backing file shared by the extractor and the viewer.
//!
//! No locking: extracting into a file while a viewer reads it is not
//! supported. `replace` renames into place, so a viewer that starts mid-run
//! sees one complete snapshot or the other.

use crate::{FaqRecord, StoreError};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_STORE_FILE: &str = "faqs.jsonl";

/// Line-delimited JSON file of [`FaqRecord`]s, one object per line.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))
            }
            _ => Ok(()),
        }
    }

    /// Appends `records` in order, creating the file if absent.
    pub fn append(&self, records: &[FaqRecord]) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        write_records(file, records).map_err(|e| self.io_error(e))?;
        debug!("Appended {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Swaps the file for one holding exactly `records`.
    ///
    /// The new content goes to a sibling temp file that is renamed over the
    /// target, so readers see either the old set or the new one.
    pub fn replace(&self, records: &[FaqRecord]) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let tmp = self.tmp_path();
        let written = File::create(&tmp)
            .and_then(|file| write_records(file, records))
            .and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }
        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Reads every record, failing on the first line that is not a valid record.
    pub fn read_all(&self) -> Result<Vec<FaqRecord>, StoreError> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;

        let mut records = vec![];
        for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            let line = String::from_utf8(line).map_err(|e| self.corrupt(idx + 1, e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }

            let record: FaqRecord =
                serde_json::from_str(&line).map_err(|e| self.corrupt(idx + 1, e.to_string()))?;
            if !record.is_valid() {
                return Err(self.corrupt(idx + 1, "question is empty".to_string()));
            }
            records.push(record);
        }
        Ok(records)
    }

    fn corrupt(&self, line: usize, reason: String) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            line,
            reason,
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

fn write_records(file: File, records: &[FaqRecord]) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    writer.get_ref().sync_all()
}
