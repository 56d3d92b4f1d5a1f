use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Application, Candidate, CandidateId, Company, CompanyId, Job, JobId, Role};
use crate::store::FairStore;
use crate::workflows::job_fair::{FixedClock, JobFairService};

pub(super) const OPEN_JOB: &str = "20000001";
pub(super) const CLOSED_JOB: &str = "20000002";
pub(super) const EXPIRED_JOB: &str = "20000003";
pub(super) const DUE_TODAY_JOB: &str = "20000004";
pub(super) const BAD_DEADLINE_JOB: &str = "20000005";
pub(super) const SLASHED_DEADLINE_JOB: &str = "20000006";

pub(super) const ANYA: &str = "30000001";
pub(super) const BEN: &str = "30000002";
pub(super) const FAH: &str = "30000005";
pub(super) const ADMIN: &str = "30000010";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn now() -> NaiveDateTime {
    today().and_hms_opt(10, 30, 0).expect("valid time")
}

pub(super) fn company(id: &str, name: &str) -> Company {
    Company {
        company_id: CompanyId::from(id),
        name: name.to_string(),
        email: "hr@example.com".to_string(),
        location: "Bangkok".to_string(),
    }
}

pub(super) fn job(id: &str, title: &str, company_id: &str, deadline: &str, status: &str) -> Job {
    Job {
        job_id: JobId::from(id),
        title: title.to_string(),
        description: format!("{title} role"),
        company_id: CompanyId::from(company_id),
        deadline: deadline.to_string(),
        status: status.to_string(),
    }
}

pub(super) fn candidate(id: &str, first: &str, last: &str, role: Role) -> Candidate {
    Candidate {
        candidate_id: CandidateId::from(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        role,
    }
}

pub(super) fn application(job_id: &str, candidate_id: &str, applied_at: &str) -> Application {
    Application {
        job_id: JobId::from(job_id),
        candidate_id: CandidateId::from(candidate_id),
        applied_at: applied_at.to_string(),
    }
}

pub(super) fn companies() -> Vec<Company> {
    vec![
        company("10000001", "Alpha Tech Co., Ltd."),
        company("10000002", "Beta Solutions PLC"),
    ]
}

pub(super) fn jobs() -> Vec<Job> {
    vec![
        job(OPEN_JOB, "Software Engineer (Backend)", "10000002", "2099-01-01", "OPEN"),
        job(CLOSED_JOB, "Data Analyst", "10000001", "2099-01-01", "CLOSED"),
        job(EXPIRED_JOB, "QA Engineer", "10000001", "2025-06-14", "OPEN"),
        job(DUE_TODAY_JOB, "DevOps Engineer", "10000002", "2025-06-15", "open"),
        job(BAD_DEADLINE_JOB, "UI/UX Designer", "10000001", "next week", "OPEN"),
        job(SLASHED_DEADLINE_JOB, "alpha tester", "10000002", "20/06/2025", "Open"),
    ]
}

pub(super) fn candidates() -> Vec<Candidate> {
    vec![
        candidate(ANYA, "Anya", "Wong", Role::Candidate),
        candidate(BEN, "ben", "Smith", Role::Candidate),
        candidate(FAH, "Fah", "Chan", Role::Candidate),
        candidate(ADMIN, "Admin", "User", Role::Admin),
    ]
}

pub(super) fn seeded_store() -> FairStore {
    FairStore::in_memory(
        companies(),
        jobs(),
        candidates(),
        vec![application(OPEN_JOB, ANYA, "2025-06-01 09:00:00")],
    )
}

pub(super) fn service_for(store: FairStore) -> JobFairService {
    JobFairService::with_clock(store, Arc::new(FixedClock(now())))
}

pub(super) fn build_service() -> (JobFairService, FairStore) {
    let store = seeded_store();
    (service_for(store.clone()), store)
}
