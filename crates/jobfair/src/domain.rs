//! Records stored in the four job fair collections.
//!
//! Field order on every record matches the CSV header order of its collection, so the
//! structs serialize straight into rows. Missing columns deserialize to empty strings.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::store::Record;

/// Timestamp layout used for `applied_at`.
pub const APPLIED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of an employer.
    CompanyId
);
string_id!(
    /// Identifier of a job posting.
    JobId
);
string_id!(
    /// Eight-digit candidate identifier. Format is checked at the input boundary only.
    CandidateId
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub company_id: CompanyId,
    pub name: String,
    pub email: String,
    pub location: String,
}

impl Record for Company {
    const FILE_NAME: &'static str = "companies.csv";
    const HEADERS: &'static [&'static str] = &["company_id", "name", "email", "location"];
    type Key = CompanyId;

    fn key(&self) -> CompanyId {
        self.company_id.clone()
    }
}

/// Whether a posting accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    /// `OPEN` in any case is open; every other value, padded ones included, counts as closed.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("open") {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub job_id: JobId,
    pub title: String,
    pub description: String,
    pub company_id: CompanyId,
    /// Raw deadline text as seeded; parsed on demand by the eligibility check.
    pub deadline: String,
    /// Raw status text; see [`Job::status`].
    pub status: String,
}

impl Job {
    pub fn status(&self) -> JobStatus {
        JobStatus::parse(&self.status)
    }

    pub fn is_open(&self) -> bool {
        self.status() == JobStatus::Open
    }
}

impl Record for Job {
    const FILE_NAME: &'static str = "jobs.csv";
    const HEADERS: &'static [&'static str] = &[
        "job_id",
        "title",
        "description",
        "company_id",
        "deadline",
        "status",
    ];
    type Key = JobId;

    fn key(&self) -> JobId {
        self.job_id.clone()
    }
}

/// Capability set of a signed-in candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Candidate,
    Admin,
}

impl Role {
    /// Exact `ADMIN` in any case; anything else is an ordinary candidate.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Candidate
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidate => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub candidate_id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl Candidate {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Candidate {
    const FILE_NAME: &'static str = "candidates.csv";
    const HEADERS: &'static [&'static str] =
        &["candidate_id", "first_name", "last_name", "email", "role"];
    type Key = CandidateId;

    fn key(&self) -> CandidateId {
        self.candidate_id.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    /// `YYYY-MM-DD HH:MM:SS`; compared as text when sorting.
    pub applied_at: String,
}

impl Application {
    pub fn new(job_id: JobId, candidate_id: CandidateId, applied_at: NaiveDateTime) -> Self {
        Self {
            job_id,
            candidate_id,
            applied_at: applied_at.format(APPLIED_AT_FORMAT).to_string(),
        }
    }
}

impl Record for Application {
    const FILE_NAME: &'static str = "applications.csv";
    const HEADERS: &'static [&'static str] = &["job_id", "candidate_id", "applied_at"];
    type Key = (JobId, CandidateId);

    fn key(&self) -> (JobId, CandidateId) {
        (self.job_id.clone(), self.candidate_id.clone())
    }
}
