//! Bakfiets Library
//!
//! Core of the bicycle rental quote wizard: catalogue loading, the
//! per-session selection, date validation, pricing and the wizard state
//! machine, plus the terminal front end that drives them.

pub mod app;
pub mod catalogue;
pub mod cli;
pub mod components;
pub mod config;
pub mod dates;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod quote;
pub mod selection;
pub mod theme;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use catalogue::{Brand, Catalogue, Model, ModelOption, Price};
pub use config::AppConfig;
pub use dates::{RentalPeriod, ValidationError, ValidationErrorKind};
pub use error::{BakfietsError, LoadError, Result, SelectionError};
pub use pricing::{PriceBreakdown, PriceLineItem, TAX_RATE_PERCENT};
pub use quote::{QuoteRequest, quote};
pub use selection::Selection;
pub use wizard::{DateField, Wizard, WizardEvent, WizardState, WizardView};
