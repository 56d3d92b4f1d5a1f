use chrono::NaiveDate;

use super::error::FairError;
use crate::domain::Job;

/// Deadline layouts accepted, tried in order.
pub const DEADLINE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Parses a stored deadline, ignoring anything past the first 10 characters so an
/// appended time component does not matter.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let head: String = trimmed.chars().take(10).collect();

    DEADLINE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&head, format).ok())
}

/// Applies the posting rules for `today`. The deadline day itself is still open.
pub fn check_eligibility(job: &Job, today: NaiveDate) -> Result<(), FairError> {
    if !job.is_open() {
        return Err(FairError::JobClosed);
    }

    let deadline = parse_deadline(&job.deadline).ok_or(FairError::InvalidDeadline)?;
    if today > deadline {
        return Err(FairError::DeadlinePassed);
    }

    Ok(())
}
