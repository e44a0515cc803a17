//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Step header, status line, navigation bar and help overlay
//! - `screens` - List screens, the rental period form and the price screen

pub mod header;
pub mod screens;

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use crate::theme::UiConstants;
use crate::wizard::{WizardState, WizardView};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI with keybinding context
    pub fn render_with_context(
        &self,
        f: &mut Frame,
        view: &WizardView,
        state: &AppState,
        keybinding_ctx: &KeybindingContext,
    ) {
        // Header, content, status, nav bar at bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(UiConstants::STATUS_HEIGHT),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        header::render_step_header(f, view, chunks[0]);

        match view.state {
            WizardState::BrandSelect | WizardState::ModelSelect | WizardState::OptionSelect => {
                screens::render_list_screen(f, chunks[1], view, state);
            }
            WizardState::DateInput => {
                screens::render_date_form(f, chunks[1], view, state);
            }
            WizardState::PriceDisplay => {
                screens::render_price_screen(f, chunks[1], view, state);
            }
        }

        header::render_status(f, state, chunks[2]);
        header::render_nav_bar(f, view.state, keybinding_ctx, chunks[3]);

        // Help overlay on top of everything
        if state.help_visible {
            header::render_help_overlay(f, view.state, keybinding_ctx);
        }
    }
}
