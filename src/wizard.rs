//! Quote wizard state machine
//!
//! The wizard walks the user through five steps and owns the per-session
//! [`Selection`]. It has no rendering code: the presentation layer reads a
//! [`WizardView`] and feeds back [`WizardEvent`]s.
//!
//! # State Transitions
//!
//! ```text
//! BrandSelect -> ModelSelect -> OptionSelect -> DateInput -> PriceDisplay
//!                     |             ^  |            ^  |           |
//!                     |       toggle+--+   rejected +--+           |
//!                     <---- back ---+  <--- back ---+  <-- back ---+
//!  BrandSelect <--------------------------------------- start over +
//! ```
//!
//! Every edge is listed in [`WizardState::transition`]. Events are first
//! resolved to a [`Trigger`] without touching any state; the transition table
//! is consulted; only then is the selection mutated.

use std::sync::Arc;

use strum::EnumIter;
use tracing::{debug, info};

use crate::catalogue::Catalogue;
use crate::dates::{self, RentalPeriod, ValidationError};
use crate::error::SelectionError;
use crate::pricing::{self, PriceBreakdown, format_euros};
use crate::selection::Selection;

/// Label of the option-list action that keeps the toggled options
pub const PROCEED_WITH_SELECTED: &str = "Proceed with selected options";
/// Label of the option-list action that drops all options
pub const PROCEED_WITHOUT_OPTIONS: &str = "Proceed without options";
/// Label of the price screen action that starts a new quote
pub const START_OVER: &str = "Start over";

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum WizardState {
    /// List of brands
    #[default]
    BrandSelect,
    /// Models of the chosen brand
    ModelSelect,
    /// Options of the chosen model, plus the two proceed actions
    OptionSelect,
    /// Start and end date form
    DateInput,
    /// Priced breakdown
    PriceDisplay,
}

/// What caused a transition, independent of any payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Trigger {
    PickBrand,
    PickModel,
    ToggleOption,
    ProceedWithSelected,
    ProceedWithoutOptions,
    EditDate,
    DatesAccepted,
    DatesRejected,
    Back,
    StartOver,
}

impl WizardState {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 5;

    /// The transition table.
    ///
    /// Returns `None` when the state does not accept the trigger.
    pub const fn transition(self, trigger: Trigger) -> Option<Self> {
        match (self, trigger) {
            (Self::BrandSelect, Trigger::PickBrand) => Some(Self::ModelSelect),

            (Self::ModelSelect, Trigger::PickModel) => Some(Self::OptionSelect),
            (Self::ModelSelect, Trigger::Back) => Some(Self::BrandSelect),

            (Self::OptionSelect, Trigger::ToggleOption) => Some(Self::OptionSelect),
            (Self::OptionSelect, Trigger::ProceedWithSelected) => Some(Self::DateInput),
            (Self::OptionSelect, Trigger::ProceedWithoutOptions) => Some(Self::DateInput),
            (Self::OptionSelect, Trigger::Back) => Some(Self::ModelSelect),

            (Self::DateInput, Trigger::EditDate) => Some(Self::DateInput),
            (Self::DateInput, Trigger::DatesRejected) => Some(Self::DateInput),
            (Self::DateInput, Trigger::DatesAccepted) => Some(Self::PriceDisplay),
            (Self::DateInput, Trigger::Back) => Some(Self::OptionSelect),

            (Self::PriceDisplay, Trigger::Back) => Some(Self::DateInput),
            (Self::PriceDisplay, Trigger::StartOver) => Some(Self::BrandSelect),

            _ => None,
        }
    }

    /// Check if the current state allows going back.
    pub const fn can_go_back(self) -> bool {
        self.transition(Trigger::Back).is_some()
    }

    /// Get the display title for this state.
    pub const fn title(self) -> &'static str {
        match self {
            Self::BrandSelect => "Choose a brand",
            Self::ModelSelect => "Choose a model",
            Self::OptionSelect => "Choose options",
            Self::DateInput => "Rental period",
            Self::PriceDisplay => "Price",
        }
    }

    /// Get the step number (1-indexed for display).
    pub const fn step_number(self) -> usize {
        match self {
            Self::BrandSelect => 1,
            Self::ModelSelect => 2,
            Self::OptionSelect => 3,
            Self::DateInput => 4,
            Self::PriceDisplay => 5,
        }
    }
}

impl std::fmt::Display for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// The two text fields of the date form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start date (DD-MM-YYYY)",
            Self::End => "End date (DD-MM-YYYY)",
        }
    }

    /// The other field
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Input events delivered by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Activate the list item at this index
    Select(usize),
    /// Flip the option at this index (option-list only)
    Toggle(usize),
    /// Replace the text of a date field
    SetText(DateField, String),
    /// Submit the date form
    Submit,
    /// Go one step back
    Back,
}

/// How a list item behaves when selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Picks a brand or model and advances
    Choice,
    /// Flips an option in place
    Toggle,
    /// A terminal action of the screen
    Action,
}

/// One selectable line of the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    pub index: usize,
    pub label: String,
    pub kind: ItemKind,
    /// Only meaningful for `ItemKind::Toggle`
    pub selected: bool,
}

/// Per-field error flags of the date form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub start: bool,
    pub end: bool,
    pub ordering: bool,
}

impl FieldErrors {
    pub fn any(&self) -> bool {
        self.start || self.end || self.ordering
    }

    pub fn for_field(&self, field: DateField) -> bool {
        match field {
            DateField::Start => self.start,
            DateField::End => self.end,
        }
    }
}

impl From<&ValidationError> for FieldErrors {
    fn from(err: &ValidationError) -> Self {
        Self {
            start: err.start_invalid(),
            end: err.end_invalid(),
            ordering: err.ordering_invalid(),
        }
    }
}

/// Read-only snapshot of the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardView {
    pub state: WizardState,
    /// What has been chosen so far, e.g. `Acme - Cargo`
    pub context: Option<String>,
    pub items: Vec<ViewItem>,
    pub start_text: String,
    pub end_text: String,
    pub field_errors: FieldErrors,
    pub error_message: Option<String>,
    pub breakdown: Option<PriceBreakdown>,
}

/// An event resolved against the current state, before anything is mutated
#[derive(Debug)]
enum Effect {
    ChooseBrand(String),
    ChooseModel(String),
    ToggleOption(String),
    KeepOptions,
    ClearOptions,
    SetDate(DateField, String),
    Accept(RentalPeriod, PriceBreakdown),
    Reject(ValidationError),
    Back,
    StartOver,
}

impl Effect {
    fn trigger(&self) -> Trigger {
        match self {
            Self::ChooseBrand(_) => Trigger::PickBrand,
            Self::ChooseModel(_) => Trigger::PickModel,
            Self::ToggleOption(_) => Trigger::ToggleOption,
            Self::KeepOptions => Trigger::ProceedWithSelected,
            Self::ClearOptions => Trigger::ProceedWithoutOptions,
            Self::SetDate(..) => Trigger::EditDate,
            Self::Accept(..) => Trigger::DatesAccepted,
            Self::Reject(_) => Trigger::DatesRejected,
            Self::Back => Trigger::Back,
            Self::StartOver => Trigger::StartOver,
        }
    }
}

/// A single quoting session
///
/// Holds a shared, read-only catalogue and owns its selection. Independent
/// sessions can run side by side over the same catalogue.
#[derive(Debug, Clone)]
pub struct Wizard {
    catalogue: Arc<Catalogue>,
    state: WizardState,
    selection: Selection,
    date_errors: Option<ValidationError>,
    breakdown: Option<PriceBreakdown>,
}

impl Wizard {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            state: WizardState::default(),
            selection: Selection::new(),
            date_errors: None,
            breakdown: None,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Errors from the last rejected date submission
    pub fn date_errors(&self) -> Option<&ValidationError> {
        self.date_errors.as_ref()
    }

    /// Breakdown of the last accepted date submission
    pub fn breakdown(&self) -> Option<&PriceBreakdown> {
        self.breakdown.as_ref()
    }

    /// Feed one event into the wizard.
    ///
    /// A rejected date range is not an error: the wizard stays in `DateInput`
    /// with field errors set.
    ///
    /// # Errors
    ///
    /// `SelectionError` when the event is outside what the current view
    /// offers (bad index, event not accepted in this state).
    pub fn handle(&mut self, event: WizardEvent) -> Result<WizardState, SelectionError> {
        let from = self.state;
        let effect = self.resolve(event)?;
        let trigger = effect.trigger();
        let next = from
            .transition(trigger)
            .ok_or_else(|| SelectionError::NotAllowed {
                state: from,
                event: format!("{:?}", trigger),
            })?;

        self.apply(effect)?;
        self.state = next;

        if from != next {
            info!("Wizard: {} -> {} ({:?})", from, next, trigger);
        } else {
            debug!("Wizard: {} ({:?})", from, trigger);
        }
        Ok(next)
    }

    /// Snapshot of the current step for rendering
    pub fn view(&self) -> WizardView {
        let items = match self.state {
            WizardState::BrandSelect => self.brand_items(),
            WizardState::ModelSelect => self.model_items(),
            WizardState::OptionSelect => self.option_items(),
            WizardState::DateInput => Vec::new(),
            WizardState::PriceDisplay => vec![ViewItem {
                index: 0,
                label: START_OVER.to_string(),
                kind: ItemKind::Action,
                selected: false,
            }],
        };

        WizardView {
            state: self.state,
            context: self.context_label(),
            items,
            start_text: self.selection.start_date().to_string(),
            end_text: self.selection.end_date().to_string(),
            field_errors: self
                .date_errors
                .as_ref()
                .map(FieldErrors::from)
                .unwrap_or_default(),
            error_message: self.date_errors.as_ref().map(|e| e.to_string()),
            breakdown: self.breakdown.clone(),
        }
    }

    /// Number of selectable items on the current screen
    pub fn item_count(&self) -> usize {
        match self.state {
            WizardState::BrandSelect => self.catalogue.brands.len(),
            WizardState::ModelSelect => self
                .selection
                .resolve_brand(&self.catalogue)
                .map(|(_, b)| b.models.len())
                .unwrap_or(0),
            WizardState::OptionSelect => self
                .selection
                .resolve_model(&self.catalogue)
                .map(|m| m.options.len() + 2)
                .unwrap_or(0),
            WizardState::DateInput => 0,
            WizardState::PriceDisplay => 1,
        }
    }

    fn resolve(&self, event: WizardEvent) -> Result<Effect, SelectionError> {
        let state = self.state;
        let effect = match (state, event) {
            (WizardState::BrandSelect, WizardEvent::Select(index)) => {
                let keys: Vec<&str> = self.catalogue.brands().map(|(k, _)| k).collect();
                Effect::ChooseBrand(pick(state, &keys, index)?.to_string())
            }
            (WizardState::ModelSelect, WizardEvent::Select(index)) => {
                let (_, brand) = self.selection.resolve_brand(&self.catalogue)?;
                let keys: Vec<&str> = brand.models().map(|(k, _)| k).collect();
                Effect::ChooseModel(pick(state, &keys, index)?.to_string())
            }
            (WizardState::OptionSelect, WizardEvent::Select(index)) => {
                let keys = self.option_keys()?;
                match index.checked_sub(keys.len()) {
                    None => Effect::ToggleOption(keys[index].to_string()),
                    Some(0) => Effect::KeepOptions,
                    Some(1) => Effect::ClearOptions,
                    Some(_) => {
                        return Err(SelectionError::IndexOutOfRange {
                            state,
                            index,
                            len: keys.len() + 2,
                        });
                    }
                }
            }
            (WizardState::OptionSelect, WizardEvent::Toggle(index)) => {
                let keys = self.option_keys()?;
                Effect::ToggleOption(pick(state, &keys, index)?.to_string())
            }
            (WizardState::DateInput, WizardEvent::SetText(field, text)) => {
                Effect::SetDate(field, text)
            }
            (WizardState::DateInput, WizardEvent::Submit) => {
                match dates::validate(self.selection.start_date(), self.selection.end_date()) {
                    Ok(period) => Effect::Accept(period, self.quote(period.rental_days())?),
                    Err(err) => Effect::Reject(err),
                }
            }
            (WizardState::PriceDisplay, WizardEvent::Select(index)) => {
                pick(state, &[START_OVER], index)?;
                Effect::StartOver
            }
            (_, WizardEvent::Back) => Effect::Back,
            (state, event) => {
                return Err(SelectionError::NotAllowed {
                    state,
                    event: format!("{:?}", event),
                });
            }
        };
        Ok(effect)
    }

    fn apply(&mut self, effect: Effect) -> Result<(), SelectionError> {
        match effect {
            Effect::ChooseBrand(key) => self.selection.set_brand(&self.catalogue, &key)?,
            Effect::ChooseModel(key) => self.selection.set_model(&self.catalogue, &key)?,
            Effect::ToggleOption(key) => {
                self.selection.toggle_option(&self.catalogue, &key)?;
            }
            Effect::KeepOptions => {}
            Effect::ClearOptions => self.selection.clear_options(),
            Effect::SetDate(DateField::Start, text) => self.selection.set_start_date(text),
            Effect::SetDate(DateField::End, text) => self.selection.set_end_date(text),
            Effect::Accept(period, breakdown) => {
                info!(
                    "Quote for {}: {} total",
                    period,
                    format_euros(breakdown.totals.total_price)
                );
                self.selection.set_period(period);
                self.date_errors = None;
                self.breakdown = Some(breakdown);
            }
            Effect::Reject(err) => {
                info!("Date range rejected: {}", err);
                self.date_errors = Some(err);
            }
            Effect::Back => self.step_back(),
            Effect::StartOver => {
                self.selection.reset();
                self.date_errors = None;
                self.breakdown = None;
            }
        }
        Ok(())
    }

    /// Undo what the current step established before leaving it
    fn step_back(&mut self) {
        match self.state {
            WizardState::BrandSelect => {}
            WizardState::ModelSelect => self.selection.reset(),
            WizardState::OptionSelect => self.selection.clear_model(),
            WizardState::DateInput => self.date_errors = None,
            WizardState::PriceDisplay => {
                self.selection.clear_period();
                self.breakdown = None;
            }
        }
    }

    /// Price the current selection
    fn quote(&self, rental_days: u32) -> Result<PriceBreakdown, SelectionError> {
        let (_, brand) = self.selection.resolve_brand(&self.catalogue)?;
        let model = self.selection.resolve_model(&self.catalogue)?;
        let options = self.selection.resolve_options(&self.catalogue)?;
        let label = format!("{} - {}", brand.name, model.name);
        Ok(pricing::compute_labelled(&label, model, options, rental_days))
    }

    /// Option keys of the chosen model in display order, recomputed on every call
    fn option_keys(&self) -> Result<Vec<&str>, SelectionError> {
        let model = self.selection.resolve_model(&self.catalogue)?;
        Ok(model.options_by_name().into_iter().map(|(k, _)| k).collect())
    }

    fn brand_items(&self) -> Vec<ViewItem> {
        self.catalogue
            .brands()
            .enumerate()
            .map(|(index, (_, brand))| ViewItem {
                index,
                label: brand.name.clone(),
                kind: ItemKind::Choice,
                selected: false,
            })
            .collect()
    }

    fn model_items(&self) -> Vec<ViewItem> {
        let Ok((_, brand)) = self.selection.resolve_brand(&self.catalogue) else {
            return Vec::new();
        };
        brand
            .models()
            .enumerate()
            .map(|(index, (_, model))| ViewItem {
                index,
                label: format!(
                    "{} — {} per day",
                    model.name,
                    format_euros(model.daily_price.into())
                ),
                kind: ItemKind::Choice,
                selected: false,
            })
            .collect()
    }

    fn option_items(&self) -> Vec<ViewItem> {
        let Ok(model) = self.selection.resolve_model(&self.catalogue) else {
            return Vec::new();
        };
        let mut items: Vec<ViewItem> = model
            .options_by_name()
            .into_iter()
            .enumerate()
            .map(|(index, (key, option))| {
                let selected = self.selection.is_option_chosen(key);
                let mut label = format!(
                    "{} — {} per day",
                    option.name,
                    format_euros(option.daily_price.into())
                );
                if selected {
                    label.push_str(" (selected)");
                }
                ViewItem {
                    index,
                    label,
                    kind: ItemKind::Toggle,
                    selected,
                }
            })
            .collect();

        let count = items.len();
        for (offset, label) in [PROCEED_WITH_SELECTED, PROCEED_WITHOUT_OPTIONS]
            .into_iter()
            .enumerate()
        {
            items.push(ViewItem {
                index: count + offset,
                label: label.to_string(),
                kind: ItemKind::Action,
                selected: false,
            });
        }
        items
    }

    fn context_label(&self) -> Option<String> {
        let (_, brand) = self.selection.resolve_brand(&self.catalogue).ok()?;
        match self.selection.resolve_model(&self.catalogue) {
            Ok(model) => Some(format!("{} - {}", brand.name, model.name)),
            Err(_) => Some(brand.name.clone()),
        }
    }
}

fn pick<'k>(state: WizardState, keys: &[&'k str], index: usize) -> Result<&'k str, SelectionError> {
    keys.get(index)
        .copied()
        .ok_or(SelectionError::IndexOutOfRange {
            state,
            index,
            len: keys.len(),
        })
}
