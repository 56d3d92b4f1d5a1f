use std::sync::{Arc, Mutex, MutexGuard};

use super::{Collection, Record, StoreError};

/// Collection held in process memory, used by tests and demos.
#[derive(Clone)]
pub struct MemoryCollection<T> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Record> MemoryCollection<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<T>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable(format!("{} mutex poisoned", T::FILE_NAME)))
    }
}

impl<T: Record> Collection<T> for MemoryCollection<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.guard()?.clone())
    }

    fn append(&self, record: T) -> Result<(), StoreError> {
        self.guard()?.push(record);
        Ok(())
    }

    fn insert(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.guard()?;
        let key = record.key();
        if records.iter().any(|existing| existing.key() == key) {
            return Err(StoreError::Conflict);
        }
        records.push(record);
        Ok(())
    }

    fn upsert(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.guard()?;
        let key = record.key();
        match records.iter_mut().find(|existing| existing.key() == key) {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        Ok(())
    }
}
