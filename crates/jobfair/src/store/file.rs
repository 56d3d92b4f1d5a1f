use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::{Collection, Record, StoreError};

/// Collection persisted as one CSV file with a header row.
///
/// Reads take no lock. Mutations hold a per-collection mutex for the whole
/// read-modify-rewrite cycle and replace the file through a sibling temp file.
pub struct CsvCollection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> CsvCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Uses the record's conventional file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(T::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable(format!("{} write lock poisoned", T::FILE_NAME)))
    }

    fn read_all(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        let mut row = csv::StringRecord::new();
        let mut records = Vec::new();
        while reader.read_record(&mut row)? {
            // Short rows are padded so missing columns read as empty strings.
            while row.len() < headers.len() {
                row.push_field("");
            }
            records.push(row.deserialize::<T>(Some(&headers))?);
        }

        debug!(file = T::FILE_NAME, rows = records.len(), "collection loaded");
        Ok(records)
    }

    fn write_all(&self, records: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let staging = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&staging)?;
            writer.write_record(T::HEADERS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        fs::rename(&staging, &self.path)?;

        debug!(file = T::FILE_NAME, rows = records.len(), "collection rewritten");
        Ok(())
    }
}

impl<T: Record> Collection<T> for CsvCollection<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        self.read_all()
    }

    fn append(&self, record: T) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut records = self.read_all()?;
        records.push(record);
        self.write_all(&records)
    }

    fn insert(&self, record: T) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut records = self.read_all()?;
        let key = record.key();
        if records.iter().any(|existing| existing.key() == key) {
            warn!(file = T::FILE_NAME, ?key, "insert rejected: key already present");
            return Err(StoreError::Conflict);
        }
        records.push(record);
        self.write_all(&records)
    }

    fn upsert(&self, record: T) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut records = self.read_all()?;
        let key = record.key();
        match records.iter_mut().find(|existing| existing.key() == key) {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        self.write_all(&records)
    }
}
