use crate::store::StoreError;

/// Failure of a job fair workflow operation.
///
/// The display text of every variant except [`FairError::Store`] is the localized message
/// presented to the candidate.
#[derive(Debug, thiserror::Error)]
pub enum FairError {
    #[error("ไม่พบรหัสผู้ใช้")]
    UnknownCandidateId,
    #[error("อีเมลไม่ถูกต้อง")]
    EmailMismatch,
    #[error("ไม่พบตำแหน่งงาน")]
    JobNotFound,
    #[error("ตำแหน่งนี้ปิดรับสมัครแล้ว")]
    JobClosed,
    #[error("ข้อมูลวันปิดรับสมัครไม่ถูกต้อง")]
    InvalidDeadline,
    #[error("วันนี้เกินวันปิดรับสมัครแล้ว")]
    DeadlinePassed,
    #[error("คุณสมัครตำแหน่งนี้แล้ว")]
    DuplicateApplication,
    #[error("ไม่พบผู้สมัคร")]
    CandidateNotFound,
    #[error("ต้องเป็นแอดมินเท่านั้น")]
    AdminRequired,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FairError {
    /// True for expected business outcomes, false for storage faults.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
