//! Application state and core logic

use crate::api::{DirectoryApi, HttpApi, SubmissionApi, SubmissionResult};
use crate::config::AppConfig;
use crate::controller::{FormController, SubmitRejected};
use crate::directory::{CountryCodeEntry, DirectoryError};
use crate::export::{ExportReport, Exporter, PdfFileSink, PrintSink, PrintSpooler};
use crate::state::{AppState, FieldKind, FormState, ScreenBuffer};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Shown after every successful submission
pub const SUCCESS_NOTICE: &str = "Form submitted successfully!";

/// Results delivered back to the event loop from background tasks
#[derive(Debug)]
pub enum AppEvent {
    CountryCodes(Result<Vec<CountryCodeEntry>, DirectoryError>),
    SubmissionFinished(SubmissionResult),
    ExportFinished(ExportReport),
}

/// Main application struct
pub struct App {
    /// UI state around the form
    pub state: AppState,
    /// Form record and submission state machine
    pub controller: FormController,
    /// Last captured rendition of the form, used for printing
    pub screen_buffer: ScreenBuffer,
    submission: Arc<dyn SubmissionApi>,
    exporter: Exporter,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    /// Create a new App instance from configuration and start loading country codes
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api = Arc::new(HttpApi::new(config.submit_url(), config.directory_url())?);

        let printer = config
            .print_command()
            .and_then(|command| PrintSpooler::from_command(&command))
            .map(|spooler| Arc::new(spooler) as Arc<dyn PrintSink>);
        let exporter = Exporter::new(printer, Box::new(PdfFileSink::new(config.export_dir())));

        Ok(Self::with_services(api.clone(), api, exporter))
    }

    /// Create an App over explicit services. Must be called inside a tokio runtime.
    pub fn with_services(
        submission: Arc<dyn SubmissionApi>,
        directory: Arc<dyn DirectoryApi>,
        exporter: Exporter,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let app = Self {
            state: AppState::default(),
            controller: FormController::new(),
            screen_buffer: ScreenBuffer::default(),
            submission,
            exporter,
            events_tx,
            events_rx,
        };
        app.spawn_directory_fetch(directory);
        app
    }

    fn spawn_directory_fetch(&self, directory: Arc<dyn DirectoryApi>) {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = directory.fetch_country_codes().await;
            let _ = tx.send(AppEvent::CountryCodes(result));
        });
    }

    /// Apply every background result that has arrived since the last tick
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CountryCodes(result) => self.controller.apply_directory(result),
            AppEvent::SubmissionFinished(result) => {
                let succeeded = result == SubmissionResult::Success;
                let to_export = self.controller.finish_submit(result);
                if succeeded {
                    self.state.notice = Some(SUCCESS_NOTICE.to_string());
                }
                if let Some(form) = to_export {
                    self.run_export(&form);
                }
            }
            AppEvent::ExportFinished(report) => {
                for failure in report.failures() {
                    self.state.push_error(failure);
                }
                self.state.status_message = Some(report.summary());
            }
        }
    }

    /// Save the PDF now; the print command runs off the event loop
    fn run_export(&mut self, form: &FormState) {
        let started = self.exporter.export(form, &self.screen_buffer);
        self.state.status_message = Some("Exporting…".to_string());

        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let report = started.finish().await;
            let _ = tx.send(AppEvent::ExportFinished(report));
        });
    }

    /// Copy the drawn form region out of the frame buffer
    pub fn capture_print_region(&mut self, buffer: &Buffer, area: Rect) {
        self.screen_buffer.capture(buffer, area);
    }

    /// Validate and, when valid, send the form on a background task
    pub fn submit(&mut self) {
        match self.controller.begin_submit() {
            Ok(snapshot) => {
                let api = Arc::clone(&self.submission);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = api.submit(&snapshot).await;
                    let _ = tx.send(AppEvent::SubmissionFinished(result));
                });
            }
            Err(SubmitRejected::InFlight) => {
                self.state.status_message = Some("Submission already in progress".to_string());
            }
            Err(SubmitRejected::Invalid(e)) => {
                tracing::debug!("Submission blocked by validation: {e}");
            }
        }
    }

    /// Append pasted text to the focused field. Single-line fields drop line breaks.
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.has_dialog() {
            return;
        }
        let Some(field) = self.state.active_field().filter(FieldKind::accepts_text) else {
            return;
        };

        let pasted: String = if field.is_multiline() {
            text.replace("\r\n", "\n")
        } else {
            text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
        };
        let value = format!("{}{}", self.controller.form().value(field), pasted);
        self.controller.set_text(field, value);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Dialogs are modal
        if self.state.has_dialog() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_dialog();
            }
            return;
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        let field = self.state.active_field();
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Tab => self.state.next_form_field(),
            KeyCode::BackTab => self.state.prev_form_field(),
            KeyCode::Enter if self.state.is_submit_focused() => self.submit(),
            KeyCode::Enter if field == Some(FieldKind::FreeText) => {
                self.controller.input_char(FieldKind::FreeText, '\n');
            }
            KeyCode::Enter => self.state.next_form_field(),
            KeyCode::Char(' ') if self.state.is_terms_focused() => self.state.toggle_terms(),
            KeyCode::Up if field == Some(FieldKind::CountryCode) => {
                self.controller.select_prev_country();
            }
            KeyCode::Down if field == Some(FieldKind::CountryCode) => {
                self.controller.select_next_country();
            }
            KeyCode::Delete if field == Some(FieldKind::CountryCode) => {
                self.controller.clear_country();
            }
            KeyCode::Backspace => {
                if let Some(field) = field {
                    self.controller.backspace(field);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = field.filter(FieldKind::accepts_text) {
                    self.controller.input_char(field, c);
                }
            }
            _ => {}
        }
    }
}
