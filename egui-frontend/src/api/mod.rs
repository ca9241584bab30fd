//! # API Module
//!
//! The backend boundary. Screens receive an `Arc<dyn PartnerApi>` at construction
//! instead of reaching for a process-wide client, so tests can swap in a fake.
//!
//! ## Module Organization:
//! - `http` - `HttpPartnerApi`, the reqwest implementation
//! - `token` - bearer token sources
//! - `user_cache` - memoized profile of the signed-in user

pub mod http;
pub mod token;
pub mod user_cache;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use shared::{AddPatientRequest, HealthResponse, PartnerInfo, Role, UserInfo};

pub use http::HttpPartnerApi;
pub use token::{StaticTokenProvider, TokenProvider};
pub use user_cache::SelfUserInfoCache;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("network error: {0}")]
    Transport(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl ApiError {
    /// The backend answered and refused the request (bad OTP, unknown id, ...)
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Status { .. } | ApiError::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Partner relationship endpoints of the MindTrace backend
#[async_trait]
pub trait PartnerApi: Send + Sync {
    /// Patients of a caregiver, or caregivers of a patient, depending on `role`
    async fn get_partners(&self, role: Role, include_deleted: bool) -> Result<Vec<PartnerInfo>, ApiError>;

    async fn add_patient(&self, request: &AddPatientRequest) -> Result<(), ApiError>;

    async fn send_patient_add_otp(&self, patient_id: &str) -> Result<(), ApiError>;

    async fn delete_caregiver(&self, caregiver_id: &str, otp: &str) -> Result<(), ApiError>;

    async fn remove_patient(&self, patient_id: &str) -> Result<(), ApiError>;

    async fn send_caregiver_removal_otp(&self, caregiver_id: &str) -> Result<(), ApiError>;

    /// Profile of `user_id`, or of the signed-in user when `None`.
    /// `Ok(None)` when the backend does not know the user.
    async fn get_user_info(&self, user_id: Option<&str>) -> Result<Option<UserInfo>, ApiError>;

    /// OTP the signed-in patient shares with a caregiver for pairing
    async fn get_pairing_otp(&self) -> Result<String, ApiError>;

    async fn health(&self) -> Result<HealthResponse, ApiError>;
}
