//! Remote services: the submission endpoint and the country directory

mod client;
mod traits;

pub use client::{HttpApi, DEFAULT_DIRECTORY_URL, DEFAULT_SUBMIT_URL};
pub use traits::{DirectoryApi, SubmissionApi, SubmissionResult, SUBMIT_FAILURE_MESSAGE};

#[cfg(test)]
pub use traits::{MockDirectoryApi, MockSubmissionApi};
