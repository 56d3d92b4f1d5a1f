//! Candidate and administrator workflows over the job fair collections.
//!
//! Expected business failures (unknown id, closed posting, passed deadline, duplicate
//! application) come back as [`FairError`] values whose display text is the message shown
//! to the user. Storage faults travel in [`FairError::Store`].

mod clock;
mod eligibility;
mod error;
pub mod router;
pub mod service;
pub mod sorting;
pub mod validation;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use eligibility::{check_eligibility, parse_deadline, DEADLINE_FORMATS};
pub use error::FairError;
pub use router::job_fair_router;
pub use service::{
    ApplicationDetail, CandidateProfile, JobApplicantCount, JobFairService, JobListing,
    APPLY_SUCCESS_MESSAGE,
};
pub use sorting::{ApplicationSortKey, CandidateSortKey, Directory, JobSortKey};
pub use validation::{validate_email, ValidationError};
