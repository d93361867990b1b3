//! HTTP client for the submission endpoint and the country directory

use super::traits::{DirectoryApi, SubmissionApi, SubmissionResult};
use crate::directory::{entries_from_countries, CountryCodeEntry, DirectoryCountry, DirectoryError};
use crate::state::FormState;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Default submission endpoint
pub const DEFAULT_SUBMIT_URL: &str = "https://pdf-form.onrender.com/api/form/submit";

/// Default country directory
pub const DEFAULT_DIRECTORY_URL: &str = "https://restcountries.com/v2/all";

/// Why a submission failed. Collapsed to the generic failure message before it
/// reaches the form.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("submission endpoint returned status {0}")]
    Status(StatusCode),
}

/// reqwest-backed implementation of both remote services
pub struct HttpApi {
    http: Client,
    submit_url: String,
    directory_url: String,
}

impl HttpApi {
    /// Create a client for the given endpoints
    pub fn new(submit_url: impl Into<String>, directory_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("admission-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            submit_url: submit_url.into(),
            directory_url: directory_url.into(),
        })
    }

    async fn post_form(&self, form: &FormState) -> Result<(), SubmitError> {
        let response = self
            .http
            .post(&self.submit_url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionApi for HttpApi {
    async fn submit(&self, form: &FormState) -> SubmissionResult {
        match self.post_form(form).await {
            Ok(()) => {
                tracing::info!("Form submitted successfully!");
                SubmissionResult::Success
            }
            Err(e) => {
                tracing::error!("{e}");
                SubmissionResult::failure()
            }
        }
    }
}

#[async_trait]
impl DirectoryApi for HttpApi {
    async fn fetch_country_codes(&self) -> Result<Vec<CountryCodeEntry>, DirectoryError> {
        let response = self.http.get(&self.directory_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status));
        }

        let countries: Vec<DirectoryCountry> = response.json().await?;
        Ok(entries_from_countries(countries))
    }
}
