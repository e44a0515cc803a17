//! Application module
//!
//! Contains the interactive loop: it turns key presses into wizard events,
//! keeps the UI-side state in sync and redraws.
//!
//! # Module Structure
//! - `state` - UI state (cursor, focused field, help, status line)
//! - Main module - App struct and event loop

mod state;

pub use state::AppState;

use crate::catalogue::Catalogue;
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::Result;
use crate::pricing::format_euros;
use crate::ui::UiRenderer;
use crate::wizard::{DateField, Wizard, WizardEvent, WizardState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Main application struct
pub struct App {
    wizard: Wizard,
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            wizard: Wizard::new(catalogue),
            state: AppState::default(),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main application loop
    ///
    /// Returns when the user quits. A selection contract violation ends the
    /// loop with an error.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| self.render(f))?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                match crossterm::event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event)? {
                            info!("Quit requested");
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!("Terminal resized to {}x{}", width, height);
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Draw the current screen
    pub fn render(&self, f: &mut Frame) {
        let view = self.wizard.view();
        self.ui_renderer
            .render_with_context(f, &view, &self.state, &self.keybinding_context);
    }

    /// Handle keyboard input events
    ///
    /// Returns `Ok(true)` when the application should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(false);
        }

        let current = self.wizard.state();
        let action =
            self.keybinding_context
                .action_for(current, key_event.code, key_event.modifiers);

        // Help overlay - ? or Esc dismisses it
        if self.state.help_visible {
            match (key_event.code, action) {
                (_, Some(KeyAction::Quit)) => return Ok(true),
                (KeyCode::Char('?') | KeyCode::Esc, _) => self.state.help_visible = false,
                _ => {}
            }
            return Ok(false);
        }

        let Some(action) = action else {
            let plain = !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if plain && KeybindingContext::accepts_text(current) {
                self.edit_focused_field(key_event.code)?;
            }
            return Ok(false);
        };

        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::NavigateUp => self.state.cursor_up(),
            KeyAction::NavigateDown => self.state.cursor_down(self.wizard.item_count()),
            KeyAction::Home => self.state.cursor = 0,
            KeyAction::End => self.state.cursor_end(self.wizard.item_count()),
            KeyAction::NextField => {
                self.state.focused_field = self.state.focused_field.other();
            }
            KeyAction::Select => {
                if self.wizard.item_count() == 0 {
                    self.state.status_message = "Nothing to choose here".to_string();
                } else {
                    self.dispatch(WizardEvent::Select(self.state.cursor))?;
                }
            }
            KeyAction::Toggle => {
                let option_count = self.wizard.item_count().saturating_sub(2);
                if self.state.cursor < option_count {
                    self.dispatch(WizardEvent::Toggle(self.state.cursor))?;
                } else {
                    self.state.status_message = "Only options can be toggled".to_string();
                }
            }
            KeyAction::Submit => self.dispatch(WizardEvent::Submit)?,
            KeyAction::Back => {
                if current.can_go_back() {
                    self.dispatch(WizardEvent::Back)?;
                }
            }
        }

        Ok(false)
    }

    /// Apply a typed character or backspace to the focused date field
    fn edit_focused_field(&mut self, code: KeyCode) -> Result<()> {
        let field = self.state.focused_field;
        let mut text = match field {
            DateField::Start => self.wizard.selection().start_date().to_string(),
            DateField::End => self.wizard.selection().end_date().to_string(),
        };

        match code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                if text.pop().is_none() {
                    return Ok(());
                }
            }
            _ => return Ok(()),
        }

        self.dispatch(WizardEvent::SetText(field, text))
    }

    /// Feed an event to the wizard and refresh the UI state
    fn dispatch(&mut self, event: WizardEvent) -> Result<()> {
        let before = self.wizard.state();
        let after = self.wizard.handle(event)?;

        self.state.enter(after);
        self.state.clamp_cursor(self.wizard.item_count());
        if before != after || after == WizardState::DateInput {
            self.state.status_message = self.status_for(after);
        }
        Ok(())
    }

    fn status_for(&self, state: WizardState) -> String {
        match state {
            WizardState::BrandSelect => "Choose a brand to start a quote".to_string(),
            WizardState::ModelSelect => "Choose a model".to_string(),
            WizardState::OptionSelect => "Toggle options, then proceed".to_string(),
            WizardState::DateInput if self.wizard.date_errors().is_some() => {
                "Please correct the highlighted dates".to_string()
            }
            WizardState::DateInput => "Enter the rental period".to_string(),
            WizardState::PriceDisplay => match self.wizard.breakdown() {
                Some(breakdown) => format!(
                    "Total {} for {} days",
                    format_euros(breakdown.totals.total_price),
                    breakdown.rental_days
                ),
                None => String::new(),
            },
        }
    }
}
