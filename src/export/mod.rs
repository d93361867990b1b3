//! Document export after a successful submission
//!
//! Two independent sinks share only the submitted form:
//! - `print`: the on-screen form region is spooled to the platform printer
//! - `pdf`: a PDF is synthesized from the field values and saved to disk
//!
//! Neither sink's failure stops the other. Outcomes come back in an
//! [`ExportReport`] instead of being swallowed.

mod pdf;
mod print;

pub use pdf::PdfDocument;
pub use print::PrintSpooler;

use crate::state::{FormState, ScreenBuffer};
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Name of the saved document
pub const EXPORT_FILENAME: &str = "form_submission.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing has been rendered to print yet")]
    EmptyRegion,
    #[error("failed to start print command `{0}`: {1}")]
    PrintSpawn(String, #[source] std::io::Error),
    #[error("failed to send the form to the printer: {0}")]
    PrintIo(#[source] std::io::Error),
    #[error("print command exited with status {0:?}")]
    PrintExit(Option<i32>),
    #[error("failed to save {}: {}", .0.display(), .1)]
    Save(PathBuf, #[source] std::io::Error),
}

/// Receives a plain-text rendition of the on-screen form
#[cfg_attr(test, mockall::automock)]
pub trait PrintSink: Send + Sync {
    fn print(&self, rendition: &str) -> Result<(), ExportError>;
}

/// Writes the synthesized document, returning where it went
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSink {
    fn save(&self, form: &FormState) -> Result<PathBuf, ExportError>;
}

/// The submission record: four labelled lines 10mm apart
pub fn submission_document(form: &FormState) -> PdfDocument {
    let mut doc = PdfDocument::new();
    doc.text(20.0, 20.0, format!("Name: {}", form.name))
        .text(20.0, 30.0, format!("Email: {}", form.email))
        .text(20.0, 40.0, format!("Phone Number: {}", form.phone_number))
        .text(20.0, 50.0, format!("Free Text Field: {}", form.free_text));
    doc
}

/// Saves [`submission_document`] as `form_submission.pdf` in a directory
#[derive(Debug, Clone)]
pub struct PdfFileSink {
    dir: PathBuf,
}

impl PdfFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSink for PdfFileSink {
    fn save(&self, form: &FormState) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(EXPORT_FILENAME);
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::Save(path.clone(), e))?;
        fs::write(&path, submission_document(form).to_bytes())
            .map_err(|e| ExportError::Save(path.clone(), e))?;
        Ok(path)
    }
}

/// What each sink did
#[derive(Debug)]
pub struct ExportReport {
    /// `None` when printing is disabled
    pub print: Option<Result<(), ExportError>>,
    pub document: Result<PathBuf, ExportError>,
}

impl ExportReport {
    /// Messages for every sink that failed
    pub fn failures(&self) -> Vec<String> {
        let mut failures = Vec::new();
        if let Some(Err(e)) = &self.print {
            failures.push(format!("Printing failed: {e}"));
        }
        if let Err(e) = &self.document {
            failures.push(format!("Saving the PDF failed: {e}"));
        }
        failures
    }

    /// One-line status for the status bar
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Ok(path) = &self.document {
            parts.push(format!("Saved {}", path.display()));
        }
        if let Some(Ok(())) = &self.print {
            parts.push("sent to printer".to_string());
        }
        if parts.is_empty() {
            "Export failed".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// A print run on the blocking pool, resolving to its outcome
pub type PrintJob = Pin<Box<dyn Future<Output = Result<(), ExportError>> + Send>>;

/// An export whose document is already saved and whose print job may still be running
pub struct StartedExport {
    pub document: Result<PathBuf, ExportError>,
    pub print: Option<PrintJob>,
}

impl StartedExport {
    /// Wait for the print job and combine both outcomes
    pub async fn finish(self) -> ExportReport {
        let print = match self.print {
            Some(job) => Some(job.await),
            None => None,
        };
        ExportReport {
            print,
            document: self.document,
        }
    }
}

pub struct Exporter {
    printer: Option<Arc<dyn PrintSink>>,
    document: Box<dyn DocumentSink>,
}

impl Exporter {
    pub fn new(printer: Option<Arc<dyn PrintSink>>, document: Box<dyn DocumentSink>) -> Self {
        Self { printer, document }
    }

    /// Save the document and start printing the captured on-screen form.
    /// Returns without waiting for the print command.
    pub fn export(&self, form: &FormState, region: &ScreenBuffer) -> StartedExport {
        let document = self.document.save(form);
        match &document {
            Ok(path) => tracing::info!("Saved submission record to {}", path.display()),
            Err(e) => tracing::warn!("PDF export failed: {e}"),
        }

        let print = self
            .printer
            .as_ref()
            .map(|printer| print_job(Arc::clone(printer), region));

        StartedExport { document, print }
    }
}

fn print_job(printer: Arc<dyn PrintSink>, region: &ScreenBuffer) -> PrintJob {
    let rendition = (!region.is_empty()).then(|| region.text());
    Box::pin(async move {
        let rendition = rendition.ok_or(ExportError::EmptyRegion)?;
        let result = tokio::task::spawn_blocking(move || printer.print(&rendition))
            .await
            .unwrap_or_else(|e| Err(ExportError::PrintIo(std::io::Error::other(e))));
        if let Err(e) = &result {
            tracing::warn!("Print export failed: {e}");
        }
        result
    })
}
