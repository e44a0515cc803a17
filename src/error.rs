//! Error handling module for Bakfiets
//!
//! Provides centralized error handling with proper error types using thiserror.
//! There are three kinds of failure, and only one of them is expected while the
//! wizard is running:
//!
//! - [`LoadError`] - the catalogue could not be read or parsed. Fatal, raised
//!   before any UI is shown.
//! - [`SelectionError`] - an event referenced something outside the currently
//!   valid scope. A contract violation between the presentation layer and the
//!   wizard; it is never produced by legal input.
//! - [`crate::dates::ValidationError`] - the date range was rejected. Fully
//!   recoverable, the wizard stays on the date form.

use std::path::PathBuf;

use thiserror::Error;

use crate::dates::ValidationError;
use crate::wizard::WizardState;

/// Catalogue loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// The catalogue file could not be read
    #[error("failed to read catalogue {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid catalogue (bad JSON, missing name, bad price)
    #[error("malformed catalogue: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A name field is present but blank
    #[error("malformed catalogue: {0} has an empty name")]
    EmptyName(String),
}

/// Selection contract violations
///
/// These indicate a bug in whatever drives the wizard: the presentation layer
/// only ever offers indices and actions that are valid for the current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Brand key not present in the catalogue
    #[error("unknown brand '{0}'")]
    UnknownBrand(String),

    /// Model key not present in the chosen brand
    #[error("model '{model}' does not belong to brand '{brand}'")]
    UnknownModel { brand: String, model: String },

    /// Option key not present in the chosen model
    #[error("option '{option}' does not belong to model '{model}'")]
    UnknownOption { model: String, option: String },

    /// A model was chosen before a brand
    #[error("no brand has been chosen")]
    NoBrand,

    /// An option was toggled before a model was chosen
    #[error("no model has been chosen")]
    NoModel,

    /// Pricing was requested without a validated rental period
    #[error("no rental period has been validated")]
    NoRentalPeriod,

    /// List index outside the items exposed by the current view
    #[error("index {index} is out of range for {state} ({len} items)")]
    IndexOutOfRange {
        state: WizardState,
        index: usize,
        len: usize,
    },

    /// Event that the current state does not accept
    #[error("{event} is not accepted in {state}")]
    NotAllowed { state: WizardState, event: String },
}

/// Main error type for Bakfiets
#[derive(Error, Debug)]
pub enum BakfietsError {
    /// Catalogue could not be loaded
    #[error("Catalogue error: {0}")]
    Load(#[from] LoadError),

    /// Selection contract violation
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Date range rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors (terminal, log file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Configuration errors (CLI values, environment)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Bakfiets operations
pub type Result<T> = std::result::Result<T, BakfietsError>;

impl BakfietsError {
    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
