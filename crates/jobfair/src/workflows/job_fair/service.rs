use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::eligibility::check_eligibility;
use super::error::FairError;
use super::sorting::{
    sort_applications, sort_candidates, sort_jobs, ApplicationSortKey, CandidateSortKey,
    Directory, JobSortKey,
};
use crate::domain::{Application, Candidate, CandidateId, Job, JobId};
use crate::store::{FairStore, StoreError};

/// Confirmation shown after a successful application.
pub const APPLY_SUCCESS_MESSAGE: &str = "สมัครงานสำเร็จ";

/// Open posting joined with its company name for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub company_name: String,
}

/// One application resolved to the job title and company it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub title: String,
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    pub candidate: Candidate,
    pub applications: Vec<ApplicationDetail>,
}

/// Admin summary row: applicant count for one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobApplicantCount {
    pub job_id: JobId,
    pub title: String,
    pub company_name: String,
    pub deadline: String,
    pub status: String,
    pub applicant_count: usize,
}

/// Business rules layered over the four collections.
#[derive(Clone)]
pub struct JobFairService {
    store: FairStore,
    clock: Arc<dyn Clock>,
}

impl JobFairService {
    pub fn new(store: FairStore) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: FairStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &FairStore {
        &self.store
    }

    /// Identity is established by a matching id/email pair; emails compare case-insensitively.
    pub fn login(&self, candidate_id: &CandidateId, email: &str) -> Result<Candidate, FairError> {
        let candidate = self
            .store
            .candidates
            .get(candidate_id)?
            .ok_or(FairError::UnknownCandidateId)?;

        if candidate.email.trim().to_lowercase() != email.trim().to_lowercase() {
            debug!(%candidate_id, "login rejected: email mismatch");
            return Err(FairError::EmailMismatch);
        }

        Ok(candidate)
    }

    pub fn open_jobs_sorted(&self, key: JobSortKey) -> Result<Vec<Job>, FairError> {
        let mut jobs = self.store.open_jobs()?;
        let directory = Directory::load(&self.store)?;
        sort_jobs(&mut jobs, key, &directory);
        Ok(jobs)
    }

    pub fn open_job_listings(&self, key: JobSortKey) -> Result<Vec<JobListing>, FairError> {
        let mut jobs = self.store.open_jobs()?;
        let directory = Directory::load(&self.store)?;
        sort_jobs(&mut jobs, key, &directory);

        Ok(jobs
            .into_iter()
            .map(|job| JobListing {
                company_name: directory.company_name(&job.company_id).to_string(),
                job,
            })
            .collect())
    }

    pub fn can_apply(&self, job_id: &JobId) -> Result<(), FairError> {
        let job = self
            .store
            .jobs
            .get(job_id)?
            .ok_or(FairError::JobNotFound)?;
        check_eligibility(&job, self.clock.today())
    }

    /// Records an application stamped with the current time. The candidate must exist.
    pub fn apply_job(
        &self,
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Result<Application, FairError> {
        if let Err(err) = self.can_apply(job_id) {
            debug!(%job_id, %candidate_id, reason = %err, "application rejected");
            return Err(err);
        }

        if self.store.candidates.get(candidate_id)?.is_none() {
            debug!(%job_id, %candidate_id, "application rejected: unknown candidate");
            return Err(FairError::CandidateNotFound);
        }

        let existing = self.store.applications_for_candidate(candidate_id)?;
        if existing.iter().any(|application| &application.job_id == job_id) {
            debug!(%job_id, %candidate_id, "application rejected: already applied");
            return Err(FairError::DuplicateApplication);
        }

        let application = Application::new(job_id.clone(), candidate_id.clone(), self.clock.now());
        match self.store.applications.insert(application.clone()) {
            Ok(()) => {}
            Err(StoreError::Conflict) => return Err(FairError::DuplicateApplication),
            Err(other) => return Err(other.into()),
        }

        info!(
            %job_id,
            %candidate_id,
            applied_at = %application.applied_at,
            "application recorded"
        );
        Ok(application)
    }

    pub fn candidate_profile(
        &self,
        candidate_id: &CandidateId,
        key: ApplicationSortKey,
    ) -> Result<CandidateProfile, FairError> {
        let candidate = self
            .store
            .candidates
            .get(candidate_id)?
            .ok_or(FairError::CandidateNotFound)?;

        let mut applications = self.store.applications_for_candidate(candidate_id)?;
        let directory = Directory::load(&self.store)?;
        sort_applications(&mut applications, key, &directory);

        let applications = applications
            .into_iter()
            .map(|application| ApplicationDetail {
                title: directory.job_title(&application.job_id).to_string(),
                company_name: directory
                    .company_name_for_job(&application.job_id)
                    .to_string(),
                application,
            })
            .collect();

        Ok(CandidateProfile {
            candidate,
            applications,
        })
    }

    /// Applicant counts for every posting, open or closed, in storage order.
    pub fn admin_counts_by_job(&self) -> Result<Vec<JobApplicantCount>, FairError> {
        let jobs = self.store.jobs.list()?;
        let directory = Directory::new(self.store.companies.list()?, Vec::new());

        let mut counts: HashMap<JobId, usize> = HashMap::new();
        for application in self.store.applications.list()? {
            *counts.entry(application.job_id).or_default() += 1;
        }

        Ok(jobs
            .into_iter()
            .map(|job| JobApplicantCount {
                applicant_count: counts.get(&job.job_id).copied().unwrap_or(0),
                company_name: directory.company_name(&job.company_id).to_string(),
                job_id: job.job_id,
                title: job.title,
                deadline: job.deadline,
                status: job.status,
            })
            .collect())
    }

    pub fn candidates_sorted(&self, key: CandidateSortKey) -> Result<Vec<Candidate>, FairError> {
        let mut candidates = self.store.candidates.list()?;
        sort_candidates(&mut candidates, key);
        Ok(candidates)
    }

    /// Resolves the acting candidate and insists on the admin role.
    pub fn require_admin(&self, candidate_id: &CandidateId) -> Result<Candidate, FairError> {
        let candidate = self.acting_candidate(candidate_id)?;

        if !candidate.is_admin() {
            debug!(%candidate_id, "admin access denied");
            return Err(FairError::AdminRequired);
        }

        Ok(candidate)
    }

    /// Candidates may read their own records; anyone else's needs the admin role.
    pub fn require_self_or_admin(
        &self,
        acting_id: &CandidateId,
        subject_id: &CandidateId,
    ) -> Result<Candidate, FairError> {
        let acting = self.acting_candidate(acting_id)?;

        if &acting.candidate_id != subject_id && !acting.is_admin() {
            debug!(%acting_id, %subject_id, "profile access denied");
            return Err(FairError::AdminRequired);
        }

        Ok(acting)
    }

    fn acting_candidate(&self, candidate_id: &CandidateId) -> Result<Candidate, FairError> {
        self.store
            .candidates
            .get(candidate_id)?
            .ok_or(FairError::UnknownCandidateId)
    }
}
