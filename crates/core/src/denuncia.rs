//! Complaint (denuncia) rules: procedure duration and referral kinds.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Total procedure duration in whole minutes between the mobile unit's
/// arrival and the end of the event.
///
/// Returns `Ok(None)` unless both timestamps are set. An end before the
/// arrival is a validation error.
pub fn procedure_minutes(
    arrival_at: Option<Timestamp>,
    ended_at: Option<Timestamp>,
) -> Result<Option<i32>, CoreError> {
    let (Some(arrival), Some(ended)) = (arrival_at, ended_at) else {
        return Ok(None);
    };
    if ended < arrival {
        return Err(CoreError::Validation(
            "The end of the event cannot be before the arrival time".to_string(),
        ));
    }
    let minutes = (ended - arrival).num_minutes();
    i32::try_from(minutes)
        .map(Some)
        .map_err(|_| CoreError::Validation("Procedure duration is out of range".to_string()))
}

/// How a complaint was referred to another service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralKind {
    Emergency,
    Specialized,
    FollowUp,
}

/// All valid referral kind strings.
const VALID_REFERRAL_KINDS: &[&str] = &["emergency", "specialized", "follow_up"];

impl ReferralKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Specialized => "specialized",
            Self::FollowUp => "follow_up",
        }
    }

    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emergency" => Ok(Self::Emergency),
            "specialized" => Ok(Self::Specialized),
            "follow_up" => Ok(Self::FollowUp),
            _ => Err(CoreError::Validation(format!(
                "Invalid referral kind '{s}'. Must be one of: {}",
                VALID_REFERRAL_KINDS.join(", ")
            ))),
        }
    }

    /// Emergency referrals must name the emergency service they went to.
    pub fn requires_service(self) -> bool {
        matches!(self, Self::Emergency)
    }
}
