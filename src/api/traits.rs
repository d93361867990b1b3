//! Trait abstraction for the remote services to enable mocking in tests

use crate::directory::{CountryCodeEntry, DirectoryError};
use crate::state::FormState;
use async_trait::async_trait;

/// Message shown for every failed submission, whatever the cause
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to submit the form.";

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    Failure(String),
}

impl SubmissionResult {
    pub fn failure() -> Self {
        Self::Failure(SUBMIT_FAILURE_MESSAGE.to_string())
    }
}

/// Sends a completed form to the submission endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// POST the form. Exactly one request per call; not idempotent.
    async fn submit(&self, form: &FormState) -> SubmissionResult;
}

/// Reads the country calling-code directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn fetch_country_codes(&self) -> Result<Vec<CountryCodeEntry>, DirectoryError>;
}
