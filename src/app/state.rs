//! Application state definitions
//!
//! UI-only state that lives next to the wizard: list cursor, focused date
//! field, help visibility and the status line. Anything that affects the
//! quote itself belongs to [`crate::wizard::Wizard`].

use crate::wizard::{DateField, WizardState};

/// Main application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Highlighted row of the current list
    pub cursor: usize,
    /// Date field receiving typed characters
    pub focused_field: DateField,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status_message: String,
    /// Step the cursor was last positioned for
    pub last_state: WizardState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cursor: 0,
            focused_field: DateField::Start,
            help_visible: false,
            status_message: "Choose a brand to start a quote".to_string(),
            last_state: WizardState::default(),
        }
    }
}

impl AppState {
    /// Move the cursor up, stopping at the first row
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down, stopping at the last of `len` rows
    pub fn cursor_down(&mut self, len: usize) {
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Jump to the last of `len` rows
    pub fn cursor_end(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Reset per-screen state after the wizard moved to `state`
    pub fn enter(&mut self, state: WizardState) {
        if state != self.last_state {
            self.cursor = 0;
            self.focused_field = DateField::Start;
            self.last_state = state;
        }
    }

    /// Keep the cursor inside a list of `len` rows
    pub fn clamp_cursor(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}
