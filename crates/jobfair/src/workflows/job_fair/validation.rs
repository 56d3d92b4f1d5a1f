//! Input checks applied at the request boundary before a workflow call.

use crate::domain::CandidateId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("รหัสผู้ใช้ต้องเป็นเลข 8 หลัก และตัวแรกต้องไม่ใช่ 0")]
    CandidateIdFormat,
    #[error("อีเมลไม่ถูกต้อง")]
    EmailFormat,
}

impl CandidateId {
    /// Exactly eight ASCII digits with a non-zero first digit.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let well_formed = trimmed.len() == 8
            && trimmed.bytes().all(|byte| byte.is_ascii_digit())
            && !trimmed.starts_with('0');

        if well_formed {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::CandidateIdFormat)
        }
    }
}

/// Normalizes (trim, lowercase) and checks an email address: one `@`, a non-empty local
/// part, and a dotted domain.
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(ValidationError::EmailFormat),
    };

    if local.is_empty() || !domain.contains('.') {
        return Err(ValidationError::EmailFormat);
    }

    Ok(email)
}
