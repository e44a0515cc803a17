//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the current wizard
//! step. The same registry drives key dispatch, the navigation bar and the
//! help overlay, so what is shown is always what is bound.

use crate::wizard::WizardState;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    Home,
    End,
    Select,
    Toggle,
    NextField,
    Submit,
    Back,
    Quit,
    Help,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        // Shift is implied by the character itself ('?' on most layouts)
        let mut modifiers = modifiers;
        modifiers.remove(KeyModifiers::SHIFT);
        self.key == key && self.modifiers == modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Step-specific keybindings
    state_bindings: HashMap<WizardState, Vec<Keybinding>>,
    /// Bindings available on the list screens
    list_globals: Vec<Keybinding>,
    /// Bindings available everywhere, including while typing
    always: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            state_bindings: HashMap::new(),
            list_globals: Vec::new(),
            always: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all steps
    fn register_defaults(&mut self) {
        self.always = vec![Keybinding::with_modifiers(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyAction::Quit,
            "Ctrl+C",
            "Quit",
        )];

        // Plain letters would swallow typed characters on the date form
        self.list_globals = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
        ];

        let list_navigation = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
            Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "Go to first"),
            Keybinding::new(KeyCode::End, KeyAction::End, "End", "Go to last"),
        ];

        let mut brand = list_navigation.clone();
        brand.push(Keybinding::new(
            KeyCode::Enter,
            KeyAction::Select,
            "Enter",
            "Choose brand",
        ));
        self.state_bindings.insert(WizardState::BrandSelect, brand);

        let mut model = list_navigation.clone();
        model.extend([
            Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose model"),
            Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back"),
            Keybinding::new(KeyCode::Backspace, KeyAction::Back, "Bksp", "Back"),
        ]);
        self.state_bindings.insert(WizardState::ModelSelect, model);

        let mut options = list_navigation;
        options.extend([
            Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Toggle / proceed"),
            Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle option"),
            Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back"),
            Keybinding::new(KeyCode::Backspace, KeyAction::Back, "Bksp", "Back"),
        ]);
        self.state_bindings.insert(WizardState::OptionSelect, options);

        self.state_bindings.insert(
            WizardState::DateInput,
            vec![
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
                Keybinding::new(KeyCode::BackTab, KeyAction::NextField, "S-Tab", "Previous field"),
                Keybinding::new(KeyCode::Up, KeyAction::NextField, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NextField, "Down", "Next field"),
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Calculate price"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            ],
        );

        self.state_bindings.insert(
            WizardState::PriceDisplay,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Start over"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back"),
                Keybinding::new(KeyCode::Backspace, KeyAction::Back, "Bksp", "Back"),
            ],
        );
    }

    /// Whether plain characters are text input on this step
    pub fn accepts_text(state: WizardState) -> bool {
        state == WizardState::DateInput
    }

    /// Get keybindings for a specific step (includes global bindings)
    pub fn get_bindings(&self, state: WizardState) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(state_bindings) = self.state_bindings.get(&state) {
            bindings.extend(state_bindings.iter());
        }
        if !Self::accepts_text(state) {
            bindings.extend(self.list_globals.iter());
        }
        bindings.extend(self.always.iter());

        bindings
    }

    /// Look up the action bound to a key on this step
    pub fn action_for(
        &self,
        state: WizardState,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<KeyAction> {
        self.get_bindings(state)
            .into_iter()
            .find(|b| b.matches(key, modifiers))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, state: WizardState) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(state);

        let priority_actions = match state {
            WizardState::BrandSelect => vec![
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            WizardState::ModelSelect => vec![
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            WizardState::OptionSelect => vec![
                KeyAction::NavigateUp,
                KeyAction::Toggle,
                KeyAction::Select,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            WizardState::DateInput => vec![
                KeyAction::NextField,
                KeyAction::Submit,
                KeyAction::Back,
                KeyAction::Quit,
            ],
            WizardState::PriceDisplay => vec![
                KeyAction::Select,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            if action == KeyAction::NavigateUp {
                // Up/Down shown as one item
                items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Navigate".to_string(),
                });
                continue;
            }
            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Get full help content for a step (for help overlay)
    pub fn get_help_content(&self, state: WizardState) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            (
                "Navigation",
                &[
                    KeyAction::NavigateUp,
                    KeyAction::NavigateDown,
                    KeyAction::Home,
                    KeyAction::End,
                    KeyAction::NextField,
                ],
            ),
            (
                "Actions",
                &[KeyAction::Select, KeyAction::Toggle, KeyAction::Submit],
            ),
            ("General", &[KeyAction::Back, KeyAction::Help, KeyAction::Quit]),
        ];

        let bindings = self.get_bindings(state);
        groups
            .into_iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }

    /// Steps that have at least one binding registered
    pub fn covered_states(&self) -> Vec<WizardState> {
        WizardState::iter()
            .filter(|s| self.state_bindings.contains_key(s))
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_step_has_bindings() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.covered_states().len(), WizardState::TOTAL_STEPS);
    }

    #[test]
    fn test_space_toggles_only_on_option_list() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.action_for(WizardState::OptionSelect, KeyCode::Char(' '), KeyModifiers::NONE),
            Some(KeyAction::Toggle)
        );
        assert_eq!(
            ctx.action_for(WizardState::BrandSelect, KeyCode::Char(' '), KeyModifiers::NONE),
            None
        );
    }

    #[test]
    fn test_letters_are_free_on_date_form() {
        let ctx = KeybindingContext::new();
        for c in ['q', 'b', '?'] {
            assert_eq!(
                ctx.action_for(WizardState::DateInput, KeyCode::Char(c), KeyModifiers::NONE),
                None
            );
        }
        assert_eq!(
            ctx.action_for(WizardState::DateInput, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_shifted_question_mark_opens_help() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.action_for(WizardState::BrandSelect, KeyCode::Char('?'), KeyModifiers::SHIFT),
            Some(KeyAction::Help)
        );
    }

    #[test]
    fn test_first_step_has_no_back_binding() {
        let ctx = KeybindingContext::new();
        assert!(
            ctx.get_bindings(WizardState::BrandSelect)
                .iter()
                .all(|b| b.action != KeyAction::Back)
        );
    }

    #[test]
    fn test_nav_items_combine_up_down() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(WizardState::OptionSelect);
        assert_eq!(items[0].key_display, "Up/Dn");
        assert!(items.iter().any(|i| i.key_display == "Space"));
    }

    #[test]
    fn test_help_content_sections() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(WizardState::DateInput);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Navigation", "Actions", "General"]);
    }
}
