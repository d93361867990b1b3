//! Application state definitions

use super::FieldKind;
use std::collections::VecDeque;

/// Focus index of the terms checkbox (after the editable fields)
pub const TERMS_FOCUS: usize = FieldKind::ALL.len();
/// Focus index of the Submit button
pub const SUBMIT_FOCUS: usize = TERMS_FOCUS + 1;
/// Number of focusable positions in the form
pub const FOCUS_COUNT: usize = SUBMIT_FOCUS + 1;

/// UI state around the form; the form record itself lives in the controller
#[derive(Debug, Default)]
pub struct AppState {
    /// Focus position: editable fields, then the checkbox, then Submit
    pub active_form_field: usize,
    /// "I agree to the Terms and Service." (shown and printed, never submitted)
    pub terms_accepted: bool,
    /// Confirmation shown in a dialog until dismissed
    pub notice: Option<String>,
    /// Transient message in the status bar
    pub status_message: Option<String>,
    /// Pending error dialogs, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    /// Move to next form field
    pub fn next_form_field(&mut self) {
        self.active_form_field = (self.active_form_field + 1) % FOCUS_COUNT;
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        if self.active_form_field == 0 {
            self.active_form_field = FOCUS_COUNT - 1;
        } else {
            self.active_form_field -= 1;
        }
    }

    /// The editable field under focus, if focus is on one
    pub fn active_field(&self) -> Option<FieldKind> {
        FieldKind::from_index(self.active_form_field)
    }

    pub fn is_terms_focused(&self) -> bool {
        self.active_form_field == TERMS_FOCUS
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active_form_field == SUBMIT_FOCUS
    }

    pub fn toggle_terms(&mut self) {
        self.terms_accepted = !self.terms_accepted;
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Whether a modal dialog is on screen
    pub fn has_dialog(&self) -> bool {
        self.has_errors() || self.notice.is_some()
    }

    /// Dismiss the top dialog: errors first, then the notice
    pub fn dismiss_dialog(&mut self) {
        if self.has_errors() {
            self.dismiss_error();
        } else {
            self.notice = None;
        }
    }
}
