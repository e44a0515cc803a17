//! Wizard screens.
//!
//! - list screens for brands, models and options
//! - the rental period form
//! - the priced breakdown
//!
//! Screens only read a [`WizardView`] and the UI-side [`AppState`]. They
//! never touch the selection.

use crate::app::AppState;
use crate::pricing::{PriceBreakdown, PriceLineItem, format_euros};
use crate::theme::{Styles, UiConstants};
use crate::wizard::{DateField, ItemKind, ViewItem, WizardState, WizardView};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

// ============================================================================
// List Screens
// ============================================================================

/// Text shown for a list row, with a checkbox for toggles
pub fn item_text(item: &ViewItem) -> String {
    match item.kind {
        ItemKind::Choice => format!("  {}", item.label),
        ItemKind::Toggle if item.selected => format!("[x] {}", item.label),
        ItemKind::Toggle => format!("[ ] {}", item.label),
        ItemKind::Action => format!("> {}", item.label),
    }
}

fn empty_message(state: WizardState) -> &'static str {
    match state {
        WizardState::BrandSelect => "  The catalogue has no brands.",
        WizardState::ModelSelect => "  This brand has no models. Press Esc to go back.",
        _ => "  Nothing to choose here.",
    }
}

/// Render a brand, model or option list
pub fn render_list_screen(f: &mut Frame, area: Rect, view: &WizardView, state: &AppState) {
    let title = match view.state {
        WizardState::BrandSelect => " Brands ",
        WizardState::ModelSelect => " Models ",
        WizardState::OptionSelect => " Options ",
        _ => " Choices ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Styles::action())
        .border_style(Styles::border_inactive());

    if view.items.is_empty() {
        let empty = Paragraph::new(empty_message(view.state))
            .style(Styles::text_muted())
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|item| {
            let style = match item.kind {
                ItemKind::Toggle if item.selected => Styles::chosen(),
                ItemKind::Action => Styles::text_bold(),
                _ => Styles::text(),
            };
            ListItem::new(item_text(item)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Styles::selected());

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor.min(view.items.len() - 1)));
    f.render_stateful_widget(list, area, &mut list_state);
}

// ============================================================================
// Rental Period Form
// ============================================================================

/// Render the start and end date form
pub fn render_date_form(f: &mut Frame, area: Rect, view: &WizardView, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(UiConstants::FORM_WIDTH),
            Constraint::Min(0),
        ])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(UiConstants::FIELD_HEIGHT), // Start date
            Constraint::Length(UiConstants::FIELD_HEIGHT), // End date
            Constraint::Min(2),                            // Error/hint
        ])
        .split(columns[1]);

    for (field, text, chunk) in [
        (DateField::Start, &view.start_text, chunks[0]),
        (DateField::End, &view.end_text, chunks[1]),
    ] {
        let focused = field == state.focused_field;
        let invalid = view.field_errors.for_field(field) || view.field_errors.ordering;

        let border_style = if invalid {
            Styles::border_error()
        } else if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        };
        let cursor = if focused { "_" } else { "" };

        let widget = Paragraph::new(format!("{}{}", text, cursor))
            .style(if focused { Styles::text_bold() } else { Styles::text() })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", field.label()))
                    .border_style(border_style),
            );
        f.render_widget(widget, chunk);
    }

    let message = match view.error_message.as_deref() {
        Some(error) => Paragraph::new(Line::from(vec![
            Span::styled("Error: ", Styles::border_error()),
            Span::styled(error.to_string(), Styles::error()),
        ])),
        None => Paragraph::new("Both dates are inclusive").style(Styles::text_muted()),
    };
    f.render_widget(
        message
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[2],
    );
}

// ============================================================================
// Price Screen
// ============================================================================

fn price_row(line: &PriceLineItem) -> Row<'static> {
    Row::new(vec![
        Cell::from(line.label.clone()),
        Cell::from(format_euros(line.daily_price)),
        Cell::from(format_euros(line.total_price)),
        Cell::from(format!("{}%", line.tax_rate_percent)),
    ])
}

/// Render the price breakdown table and the start over action
pub fn render_price_screen(f: &mut Frame, area: Rect, view: &WizardView, state: &AppState) {
    let Some(breakdown) = view.breakdown.as_ref() else {
        let missing = Paragraph::new("  No price available. Press Esc to go back.")
            .style(Styles::error());
        f.render_widget(missing, area);
        return;
    };

    let table_height = breakdown.items.len() as u16 + 5;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(table_height), // Breakdown
            Constraint::Length(1),            // Rental period
            Constraint::Min(3),               // Actions
        ])
        .split(area);

    f.render_widget(price_table(breakdown), chunks[0]);

    let period = Paragraph::new(format!(
        "Rental period: {} days, prices exclude VAT",
        breakdown.rental_days
    ))
    .style(Styles::text_secondary())
    .alignment(Alignment::Center);
    f.render_widget(period, chunks[1]);

    render_list_screen(f, chunks[2], view, state);
}

/// Table widget for a breakdown, totals row last
pub fn price_table(breakdown: &PriceBreakdown) -> Table<'static> {
    let header = Row::new(vec!["Description", "Daily price", "Total", "VAT"])
        .style(Styles::action())
        .bottom_margin(1);

    let mut rows: Vec<Row> = breakdown.items.iter().map(price_row).collect();
    rows.push(price_row(&breakdown.totals).style(Styles::success()));

    Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Price ")
            .border_style(Styles::border_active()),
    )
}
