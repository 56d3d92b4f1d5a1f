//! Whole-snapshot persistence for the job fair collections.
//!
//! Every read loads the full collection and every mutation rewrites it. The
//! [`Collection`] trait is the seam the workflow layer depends on so tests can swap the
//! CSV files for [`MemoryCollection`].

mod file;
mod memory;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Application, Candidate, CandidateId, Company, Job, JobId};

pub use self::file::CsvCollection;
pub use self::memory::MemoryCollection;

/// A row type with a fixed column schema and a lookup key.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const FILE_NAME: &'static str;
    /// Written even when the collection is empty.
    const HEADERS: &'static [&'static str];
    type Key: PartialEq + fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// Storage abstraction over one collection.
pub trait Collection<T: Record>: Send + Sync {
    /// All records in storage order; an absent backing store is empty.
    fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Appends without any uniqueness check.
    fn append(&self, record: T) -> Result<(), StoreError>;

    /// Appends unless a record with the same key exists, atomically with respect to other
    /// writers on this collection.
    fn insert(&self, record: T) -> Result<(), StoreError>;

    /// Replaces the first record sharing the key, or appends.
    fn upsert(&self, record: T) -> Result<(), StoreError>;

    fn list_where(&self, filter: &dyn Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        Ok(self.list()?.into_iter().filter(|record| filter(record)).collect())
    }

    fn get(&self, key: &T::Key) -> Result<Option<T>, StoreError> {
        Ok(self.list()?.into_iter().find(|record| &record.key() == key))
    }
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed collection data: {0}")]
    Csv(#[from] csv::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// The four collections the workflow layer reads and writes.
#[derive(Clone)]
pub struct FairStore {
    pub companies: Arc<dyn Collection<Company>>,
    pub jobs: Arc<dyn Collection<Job>>,
    pub candidates: Arc<dyn Collection<Candidate>>,
    pub applications: Arc<dyn Collection<Application>>,
}

impl FairStore {
    /// CSV files under `data_dir`, one per collection.
    pub fn csv(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            companies: Arc::new(CsvCollection::<Company>::in_dir(dir)),
            jobs: Arc::new(CsvCollection::<Job>::in_dir(dir)),
            candidates: Arc::new(CsvCollection::<Candidate>::in_dir(dir)),
            applications: Arc::new(CsvCollection::<Application>::in_dir(dir)),
        }
    }

    pub fn in_memory(
        companies: Vec<Company>,
        jobs: Vec<Job>,
        candidates: Vec<Candidate>,
        applications: Vec<Application>,
    ) -> Self {
        Self {
            companies: Arc::new(MemoryCollection::new(companies)),
            jobs: Arc::new(MemoryCollection::new(jobs)),
            candidates: Arc::new(MemoryCollection::new(candidates)),
            applications: Arc::new(MemoryCollection::new(applications)),
        }
    }

    pub fn open_jobs(&self) -> Result<Vec<Job>, StoreError> {
        self.jobs.list_where(&Job::is_open)
    }

    pub fn applications_for_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Application>, StoreError> {
        self.applications
            .list_where(&|application: &Application| &application.candidate_id == candidate_id)
    }

    pub fn applications_for_job(&self, job_id: &JobId) -> Result<Vec<Application>, StoreError> {
        self.applications
            .list_where(&|application: &Application| &application.job_id == job_id)
    }
}
