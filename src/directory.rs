//! Country calling-code directory
//!
//! Loaded once per session from the remote directory service. A failed load
//! leaves the directory empty; the form stays usable without a country code.

use serde::Deserialize;
use thiserror::Error;

/// One selectable country code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCodeEntry {
    pub display_name: String,
    /// `+` followed by the country's first calling code
    pub calling_code: String,
}

impl CountryCodeEntry {
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.calling_code)
    }
}

/// A country as returned by the directory service
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryCountry {
    pub name: String,
    #[serde(rename = "callingCodes", default)]
    pub calling_codes: Vec<String>,
}

/// Keep the service's order, take each country's first calling code
pub fn entries_from_countries(countries: Vec<DirectoryCountry>) -> Vec<CountryCodeEntry> {
    countries
        .into_iter()
        .filter_map(|country| {
            let code = country.calling_codes.into_iter().next()?;
            if code.is_empty() {
                tracing::debug!("Skipping {} without a calling code", country.name);
                return None;
            }
            Some(CountryCodeEntry {
                display_name: country.name,
                calling_code: format!("+{code}"),
            })
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("country directory request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("country directory returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Where the directory is in its one-shot load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryStatus {
    #[default]
    Loading,
    Loaded,
    Unavailable,
}

/// The loaded country codes
#[derive(Debug, Default)]
pub struct CountryDirectory {
    entries: Vec<CountryCodeEntry>,
    status: DirectoryStatus,
}

impl CountryDirectory {
    /// Record the outcome of the fetch. Errors are logged and leave the list empty.
    pub fn apply(&mut self, result: Result<Vec<CountryCodeEntry>, DirectoryError>) {
        match result {
            Ok(entries) => {
                tracing::info!("Loaded {} country codes", entries.len());
                self.entries = entries;
                self.status = DirectoryStatus::Loaded;
            }
            Err(e) => {
                tracing::error!("Failed to fetch country codes: {e}");
                self.entries.clear();
                self.status = DirectoryStatus::Unavailable;
            }
        }
    }

    pub fn status(&self) -> DirectoryStatus {
        self.status
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[CountryCodeEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CountryCodeEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
