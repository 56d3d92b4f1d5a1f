//! Single-key listing orders.
//!
//! Every sort is stable and uses only the selected key, so ties keep their storage order.
//! Text keys compare lowercased. `deadline` and `applied_at` compare as raw text, which is
//! chronological only for zero-padded `YYYY-MM-DD` style values.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Application, Candidate, Company, CompanyId, Job, JobId};
use crate::store::{FairStore, StoreError};

/// Snapshot of jobs and companies used to resolve joins while sorting and rendering.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    companies: HashMap<CompanyId, Company>,
    jobs: HashMap<JobId, Job>,
}

impl Directory {
    /// The first record wins when an id appears more than once, matching `get`.
    pub fn new(companies: Vec<Company>, jobs: Vec<Job>) -> Self {
        let mut directory = Self::default();
        for company in companies {
            directory
                .companies
                .entry(company.company_id.clone())
                .or_insert(company);
        }
        for job in jobs {
            directory.jobs.entry(job.job_id.clone()).or_insert(job);
        }
        directory
    }

    pub fn load(store: &FairStore) -> Result<Self, StoreError> {
        Ok(Self::new(store.companies.list()?, store.jobs.list()?))
    }

    pub fn job(&self, job_id: &JobId) -> Option<&Job> {
        self.jobs.get(job_id)
    }

    /// Empty when the company is unknown.
    pub fn company_name(&self, company_id: &CompanyId) -> &str {
        self.companies
            .get(company_id)
            .map(|company| company.name.as_str())
            .unwrap_or("")
    }

    pub fn job_title(&self, job_id: &JobId) -> &str {
        self.job(job_id).map(|job| job.title.as_str()).unwrap_or("")
    }

    pub fn company_name_for_job(&self, job_id: &JobId) -> &str {
        self.job(job_id)
            .map(|job| self.company_name(&job.company_id))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSortKey {
    #[default]
    FirstName,
    LastName,
    Email,
    CandidateId,
}

impl CandidateSortKey {
    /// Unknown names fall back to `first_name`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "last_name" => Self::LastName,
            "email" => Self::Email,
            "candidate_id" => Self::CandidateId,
            _ => Self::FirstName,
        }
    }

    fn field(self, candidate: &Candidate) -> &str {
        match self {
            Self::FirstName => &candidate.first_name,
            Self::LastName => &candidate.last_name,
            Self::Email => &candidate.email,
            Self::CandidateId => candidate.candidate_id.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSortKey {
    #[default]
    Title,
    Company,
    Deadline,
}

impl JobSortKey {
    /// Unknown names fall back to `title`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "company" => Self::Company,
            "deadline" => Self::Deadline,
            _ => Self::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationSortKey {
    #[default]
    Title,
    Company,
    AppliedAt,
}

impl ApplicationSortKey {
    /// Unknown names fall back to `title`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "company" => Self::Company,
            "applied_at" => Self::AppliedAt,
            _ => Self::Title,
        }
    }
}

pub fn sort_candidates(candidates: &mut [Candidate], key: CandidateSortKey) {
    candidates.sort_by_cached_key(|candidate| key.field(candidate).to_lowercase());
}

pub fn sort_jobs(jobs: &mut [Job], key: JobSortKey, directory: &Directory) {
    jobs.sort_by_cached_key(|job| match key {
        JobSortKey::Title => job.title.to_lowercase(),
        JobSortKey::Company => directory.company_name(&job.company_id).to_lowercase(),
        JobSortKey::Deadline => job.deadline.clone(),
    });
}

pub fn sort_applications(
    applications: &mut [Application],
    key: ApplicationSortKey,
    directory: &Directory,
) {
    applications.sort_by_cached_key(|application| match key {
        ApplicationSortKey::Title => directory.job_title(&application.job_id).to_lowercase(),
        ApplicationSortKey::Company => directory
            .company_name_for_job(&application.job_id)
            .to_lowercase(),
        ApplicationSortKey::AppliedAt => application.applied_at.clone(),
    });
}
