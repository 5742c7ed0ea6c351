//! Intake request workflow (citizen and worker requests).
//!
//! ```text
//! pending ──> in_review ──> approved
//!    │            └───────> rejected
//!    ├──────────────────────> approved
//!    └──────────────────────> rejected
//! ```
//!
//! Approved and rejected are terminal.

use crate::error::CoreError;
use crate::status::{RequestStatus, StatusId};

/// Whether a request may move from `from` to `to`. Staying put is allowed.
pub fn can_transition(from: RequestStatus, to: RequestStatus) -> bool {
    use RequestStatus::*;
    if from == to {
        return true;
    }
    matches!(
        (from, to),
        (Pending, InReview) | (Pending, Approved) | (Pending, Rejected)
            | (InReview, Approved) | (InReview, Rejected)
    )
}

/// Validate a status change expressed as raw lookup ids.
pub fn validate_transition(from: StatusId, to: StatusId) -> Result<(), CoreError> {
    let from_status = RequestStatus::from_id(from)?;
    let to_status = RequestStatus::from_id(to)?;
    if can_transition(from_status, to_status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot move a request from {from_status:?} to {to_status:?}"
        )))
    }
}

/// Maximum size of an attached document's metadata file name.
pub const MAX_DOCUMENT_NAME_LENGTH: usize = 225;

/// Validate attached document metadata. Sizes, when known, must be positive.
pub fn validate_document(file_name: &str, file_size: Option<i64>) -> Result<(), CoreError> {
    if file_name.trim().is_empty() {
        return Err(CoreError::missing_field("file_name"));
    }
    if file_name.chars().count() > MAX_DOCUMENT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "file_name must be at most {MAX_DOCUMENT_NAME_LENGTH} characters"
        )));
    }
    if matches!(file_size, Some(size) if size <= 0) {
        return Err(CoreError::Validation(
            "file_size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
