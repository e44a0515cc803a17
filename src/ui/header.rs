//! Step header, status line, navigation bar and help overlay rendering

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::Styles;
use crate::wizard::{WizardState, WizardView};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Header text for a step, e.g. `Step 2 of 5: Choose a model`
pub fn step_title(state: WizardState) -> String {
    format!(
        "Step {} of {}: {}",
        state.step_number(),
        WizardState::TOTAL_STEPS,
        state.title()
    )
}

/// Render the step title and the selection made so far
pub fn render_step_header(f: &mut Frame, view: &WizardView, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let context = match view.context.as_deref() {
        Some(context) => Line::from(vec![
            Span::styled("Selected: ", Styles::text_muted()),
            Span::styled(context.to_string(), Styles::text_secondary()),
        ]),
        None => Line::from(Span::styled("No bike selected yet", Styles::text_muted())),
    };

    let header = Paragraph::new(vec![
        Line::from(Span::styled(step_title(view.state), Styles::title())),
        context,
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(" Bike Rental "),
    );
    f.render_widget(header, area);
}

/// Render the status message
pub fn render_status(f: &mut Frame, state: &AppState, area: Rect) {
    let status = Paragraph::new(state.status_message.as_str())
        .style(Styles::text_secondary())
        .alignment(Alignment::Center);
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: WizardState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, item) in keybinding_ctx.get_nav_items(state).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(format!("[{}]", item.key_display), Styles::action()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }

    let nav_bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(nav_bar, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: WizardState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(state, keybinding_ctx);
    help_overlay.render(f, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_title() {
        assert_eq!(step_title(WizardState::BrandSelect), "Step 1 of 5: Choose a brand");
        assert_eq!(step_title(WizardState::PriceDisplay), "Step 5 of 5: Price");
    }
}
