//! Terminal rendering through ratatui's TestBackend
//!
//! Drives the app with synthetic key events and checks what ends up on
//! screen for each step.

use std::sync::Arc;

use bakfiets::Catalogue;
use bakfiets::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

fn app() -> App {
    let catalogue = Catalogue::from_json(
        r#"{"brands": {
            "acme": {"name": "Acme", "models": {
                "cargo": {"name": "Cargo", "dailyPrice": 20, "options": {
                    "rain_cover": {"name": "Rain cover", "dailyPrice": 3}
                }}
            }},
            "zeta": {"name": "Zeta", "models": {}}
        }}"#,
    )
    .unwrap();
    App::new(Arc::new(catalogue))
}

fn press(app: &mut App, code: KeyCode) {
    let quit = app
        .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap();
    assert!(!quit);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_brand_screen() {
    let app = app();
    let text = screen(&app);
    assert!(text.contains("Step 1 of 5: Choose a brand"));
    assert!(text.contains("Acme"));
    assert!(text.contains("Zeta"));
    assert!(text.contains("[Enter] Choose brand"));
}

#[test]
fn test_option_screen_shows_prices_and_actions() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char(' '));

    let text = screen(&app);
    assert!(text.contains("Step 3 of 5: Choose options"));
    assert!(text.contains("Acme - Cargo"));
    assert!(text.contains("[x] Rain cover"));
    assert!(text.contains("€ 3 per day (selected)"));
    assert!(text.contains("Proceed with selected options"));
    assert!(text.contains("Proceed without options"));
}

#[test]
fn test_brand_without_models() {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    let text = screen(&app);
    assert!(text.contains("Step 2 of 5: Choose a model"));
    assert!(text.contains("This brand has no models"));

    press(&mut app, KeyCode::Esc);
    assert!(screen(&app).contains("Step 1 of 5"));
}

#[test]
fn test_date_form_and_price_table() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    let text = screen(&app);
    assert!(text.contains("Step 4 of 5: Rental period"));
    assert!(text.contains("Start date (DD-MM-YYYY)"));
    assert!(text.contains("End date (DD-MM-YYYY)"));

    type_text(&mut app, "01-01-2024");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "03-01-2024");
    press(&mut app, KeyCode::Enter);

    let text = screen(&app);
    assert!(text.contains("Step 5 of 5: Price"));
    for column in ["Description", "Daily price", "Total", "VAT"] {
        assert!(text.contains(column), "missing column {}", column);
    }
    assert!(text.contains("Acme - Cargo"));
    assert!(text.contains("€ 60"));
    assert!(text.contains("€ 9"));
    assert!(text.contains("€ 23"));
    assert!(text.contains("€ 69"));
    assert!(text.contains("21%"));
    assert!(text.contains("Start over"));
}

#[test]
fn test_start_over_from_price_screen() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::End);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "01-01-2024");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "01-01-2024");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Enter);
    let text = screen(&app);
    assert!(text.contains("Step 1 of 5"));
    assert!(text.contains("No bike selected yet"));
}

#[test]
fn test_invalid_date_message() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::End);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "1-1-2024");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "02-01-2024");
    press(&mut app, KeyCode::Enter);

    let text = screen(&app);
    assert!(text.contains("Step 4 of 5"));
    assert!(text.contains("Error:"));
    assert!(text.contains("Please correct the highlighted dates"));
}
