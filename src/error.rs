//! Audit error taxonomy

use crate::api::ApiError;

/// Errors that can stop an audit, or the audit of one network.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The dashboard could not be reached or rejected the request.
    #[error("Dashboard API failure: {0}")]
    Transport(#[from] ApiError),

    /// An RF profile carried a channel width that is neither `auto` nor a positive integer.
    #[error("Malformed RF profile '{profile}': channel width '{value}' is not \"auto\" or a positive integer MHz value")]
    MalformedProfileData { profile: String, value: String },

    /// Operator input did not name a listed organization.
    #[error("Invalid organization selection: {0}")]
    InvalidSelection(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// True for data problems local to one network, as opposed to the
    /// dashboard itself being unavailable.
    pub fn is_data_error(&self) -> bool {
        matches!(self, AuditError::MalformedProfileData { .. })
    }
}
