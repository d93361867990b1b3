//! Form controller: owns the form and drives validation and submission

use crate::api::SubmissionResult;
use crate::directory::{CountryCodeEntry, CountryDirectory, DirectoryError};
use crate::state::{FieldKind, FormState};
use crate::validation::{validate, ValidationError};
use thiserror::Error;

/// Where the form is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    Submitting,
    SubmittedOk,
    SubmittedError,
}

impl SubmissionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Editing => "Editing",
            Self::Submitting => "Submitting…",
            Self::SubmittedOk => "Submitted",
            Self::SubmittedError => "Submission failed",
        }
    }
}

/// Why a submit request did not start a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in progress")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Default)]
pub struct FormController {
    form: FormState,
    phase: SubmissionPhase,
    /// The one error message shown under the form
    error: Option<String>,
    directory: CountryDirectory,
    /// Index into the directory of the picked country
    selected_country: Option<usize>,
    /// What was sent by the submission in flight
    in_flight: Option<FormState>,
    /// Set once the export has been handed out
    export_triggered: bool,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn directory(&self) -> &CountryDirectory {
        &self.directory
    }

    pub fn apply_directory(&mut self, result: Result<Vec<CountryCodeEntry>, DirectoryError>) {
        self.directory.apply(result);
        self.selected_country = None;
        self.form.country_code = None;
    }

    /// Any edit after a finished submission puts the form back into editing
    fn touch(&mut self) {
        if matches!(
            self.phase,
            SubmissionPhase::SubmittedOk | SubmissionPhase::SubmittedError
        ) {
            self.phase = SubmissionPhase::Editing;
        }
    }

    pub fn input_char(&mut self, field: FieldKind, c: char) {
        if self.form.push_char(field, c) {
            self.touch();
        }
    }

    pub fn backspace(&mut self, field: FieldKind) {
        if field == FieldKind::CountryCode {
            self.clear_country();
        } else if self.form.pop_char(field) {
            self.touch();
        }
    }

    pub fn set_text(&mut self, field: FieldKind, value: impl Into<String>) {
        if self.form.set_text(field, value) {
            self.touch();
        }
    }

    pub fn selected_country(&self) -> Option<&CountryCodeEntry> {
        self.selected_country.and_then(|i| self.directory.get(i))
    }

    /// Pick the next loaded country, starting from the first
    pub fn select_next_country(&mut self) {
        let count = self.directory.len();
        if count == 0 {
            return;
        }
        let next = match self.selected_country {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.select_country(next);
    }

    /// Pick the previous loaded country, starting from the last
    pub fn select_prev_country(&mut self) {
        let count = self.directory.len();
        if count == 0 {
            return;
        }
        let prev = match self.selected_country {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.select_country(prev);
    }

    fn select_country(&mut self, index: usize) {
        if let Some(entry) = self.directory.get(index) {
            self.form.country_code = Some(entry.calling_code.clone());
            self.selected_country = Some(index);
            self.touch();
        }
    }

    pub fn clear_country(&mut self) {
        if self.selected_country.take().is_some() {
            self.form.country_code = None;
            self.touch();
        }
    }

    /// Validate and move to `Submitting`, returning the snapshot to send
    pub fn begin_submit(&mut self) -> Result<FormState, SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::InFlight);
        }

        self.error = None;
        if let Err(e) = validate(&self.form) {
            self.error = Some(e.to_string());
            self.phase = SubmissionPhase::Editing;
            return Err(e.into());
        }

        self.phase = SubmissionPhase::Submitting;
        let snapshot = self.form.clone();
        self.in_flight = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Record a submission outcome.
    ///
    /// Returns the submitted snapshot to export on the first success only;
    /// later successes do not export again.
    pub fn finish_submit(&mut self, result: SubmissionResult) -> Option<FormState> {
        let snapshot = self.in_flight.take();
        match result {
            SubmissionResult::Success => {
                self.phase = SubmissionPhase::SubmittedOk;
                self.error = None;
                if self.export_triggered {
                    return None;
                }
                self.export_triggered = true;
                snapshot.or_else(|| Some(self.form.clone()))
            }
            SubmissionResult::Failure(reason) => {
                self.phase = SubmissionPhase::SubmittedError;
                self.error = Some(reason);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockSubmissionApi, SubmissionApi, SUBMIT_FAILURE_MESSAGE};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    fn filled() -> FormController {
        let mut controller = FormController::new();
        controller.set_text(FieldKind::Name, "Jane Doe");
        controller.set_text(FieldKind::Email, "jane@x.com");
        controller.set_text(FieldKind::PhoneNumber, "9876543210");
        controller
    }

    fn with_countries(controller: &mut FormController) {
        controller.apply_directory(Ok(vec![
            CountryCodeEntry {
                display_name: "India".to_string(),
                calling_code: "+91".to_string(),
            },
            CountryCodeEntry {
                display_name: "Canada".to_string(),
                calling_code: "+1".to_string(),
            },
        ]));
    }

    /// Run one full submit through an API, the way the app does across tasks
    async fn submit_via(
        controller: &mut FormController,
        api: &dyn SubmissionApi,
    ) -> Result<Option<FormState>, SubmitRejected> {
        let snapshot = controller.begin_submit()?;
        let result = api.submit(&snapshot).await;
        Ok(controller.finish_submit(result))
    }

    #[test]
    fn test_starts_editing_without_error() {
        let controller = FormController::new();
        assert_eq!(controller.phase(), SubmissionPhase::Editing);
        assert!(controller.error().is_none());
        assert_eq!(controller.form(), &FormState::default());
    }

    #[test]
    fn test_invalid_form_stays_editing_with_error() {
        let mut controller = FormController::new();
        let err = controller.begin_submit().unwrap_err();
        assert_eq!(err, SubmitRejected::Invalid(ValidationError::MissingFields));
        assert_eq!(controller.phase(), SubmissionPhase::Editing);
        assert_eq!(controller.error(), Some("All fields are required"));
    }

    #[test]
    fn test_new_error_replaces_previous() {
        let mut controller = filled();
        controller.set_text(FieldKind::Email, "a@b");
        tokio_test::assert_err!(controller.begin_submit());
        assert_eq!(controller.error(), Some("Please enter a valid email address"));

        controller.set_text(FieldKind::Email, "a@b.com");
        controller.set_text(FieldKind::PhoneNumber, "12345");
        tokio_test::assert_err!(controller.begin_submit());
        assert_eq!(
            controller.error(),
            Some("Please enter a valid 10-digit phone number")
        );
    }

    #[test]
    fn test_valid_form_moves_to_submitting() {
        let mut controller = filled();
        let snapshot = controller.begin_submit().unwrap();
        assert_eq!(controller.phase(), SubmissionPhase::Submitting);
        assert_eq!(&snapshot, controller.form());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut controller = filled();
        controller.begin_submit().unwrap();
        assert_eq!(controller.begin_submit(), Err(SubmitRejected::InFlight));
        assert!(controller.is_submitting());
    }

    #[test]
    fn test_edits_during_submission_do_not_touch_snapshot() {
        let mut controller = filled();
        let snapshot = controller.begin_submit().unwrap();
        controller.input_char(FieldKind::Name, '!');
        assert_eq!(snapshot.name, "Jane Doe");
        assert_eq!(controller.form().name, "Jane Doe!");
        assert!(controller.is_submitting());

        let exported = controller.finish_submit(SubmissionResult::Success).unwrap();
        assert_eq!(exported.name, "Jane Doe");
    }

    #[test]
    fn test_failure_surfaces_reason_and_allows_retry() {
        let mut controller = filled();
        controller.begin_submit().unwrap();
        assert!(controller
            .finish_submit(SubmissionResult::failure())
            .is_none());
        assert_eq!(controller.phase(), SubmissionPhase::SubmittedError);
        assert_eq!(controller.error(), Some(SUBMIT_FAILURE_MESSAGE));

        tokio_test::assert_ok!(controller.begin_submit());
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_success_triggers_export_once() {
        let mut controller = filled();
        controller.begin_submit().unwrap();
        let exported = controller.finish_submit(SubmissionResult::Success);
        assert_eq!(exported.as_ref(), Some(controller.form()));
        assert_eq!(controller.phase(), SubmissionPhase::SubmittedOk);

        // Re-entering success does not export again
        assert!(controller.finish_submit(SubmissionResult::Success).is_none());
        controller.begin_submit().unwrap();
        assert!(controller.finish_submit(SubmissionResult::Success).is_none());
    }

    #[test]
    fn test_success_clears_error() {
        let mut controller = filled();
        controller.begin_submit().unwrap();
        controller.finish_submit(SubmissionResult::failure());
        controller.begin_submit().unwrap();
        controller.finish_submit(SubmissionResult::Success);
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_edit_after_submission_returns_to_editing() {
        let mut controller = filled();
        controller.begin_submit().unwrap();
        controller.finish_submit(SubmissionResult::Success);
        controller.backspace(FieldKind::Name);
        assert_eq!(controller.phase(), SubmissionPhase::Editing);
    }

    #[test]
    fn test_country_selection_cycles_through_directory() {
        let mut controller = filled();
        with_countries(&mut controller);

        controller.select_next_country();
        assert_eq!(controller.form().country_code.as_deref(), Some("+91"));
        controller.select_next_country();
        assert_eq!(controller.selected_country().unwrap().display_name, "Canada");
        controller.select_next_country();
        assert_eq!(controller.form().country_code.as_deref(), Some("+91"));
        controller.select_prev_country();
        assert_eq!(controller.form().country_code.as_deref(), Some("+1"));
    }

    #[test]
    fn test_prev_country_from_unset_picks_last() {
        let mut controller = FormController::new();
        with_countries(&mut controller);
        controller.select_prev_country();
        assert_eq!(controller.form().country_code.as_deref(), Some("+1"));
    }

    #[test]
    fn test_backspace_on_country_clears_selection() {
        let mut controller = FormController::new();
        with_countries(&mut controller);
        controller.select_next_country();
        controller.backspace(FieldKind::CountryCode);
        assert!(controller.form().country_code.is_none());
        assert!(controller.selected_country().is_none());
    }

    #[test]
    fn test_country_selection_without_directory_is_noop() {
        let mut controller = FormController::new();
        controller.apply_directory(Err(DirectoryError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        )));
        controller.select_next_country();
        controller.select_prev_country();
        assert!(controller.form().country_code.is_none());
        assert_eq!(controller.phase(), SubmissionPhase::Editing);
    }

    #[tokio::test]
    async fn test_submit_sends_snapshot_once_and_exports() {
        let mut controller = filled();
        let expected = controller.form().clone();
        let mut api = MockSubmissionApi::new();
        api.expect_submit()
            .with(eq(expected.clone()))
            .times(1)
            .returning(|_| SubmissionResult::Success);

        let exported = submit_via(&mut controller, &api).await.unwrap();

        assert_eq!(exported, Some(expected));
        assert_eq!(controller.phase(), SubmissionPhase::SubmittedOk);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_api() {
        let mut controller = FormController::new();
        let mut api = MockSubmissionApi::new();
        api.expect_submit().times(0);

        let result = submit_via(&mut controller, &api).await;

        assert_eq!(
            result,
            Err(SubmitRejected::Invalid(ValidationError::MissingFields))
        );
    }

    #[tokio::test]
    async fn test_failed_then_successful_retry() {
        let mut controller = filled();
        let mut api = MockSubmissionApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| SubmissionResult::failure());
        api.expect_submit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| SubmissionResult::Success);

        assert_eq!(submit_via(&mut controller, &api).await, Ok(None));
        assert_eq!(controller.error(), Some(SUBMIT_FAILURE_MESSAGE));

        let exported = submit_via(&mut controller, &api).await.unwrap();
        assert!(exported.is_some());
        assert!(controller.error().is_none());
    }
}
