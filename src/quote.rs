//! Headless quotes
//!
//! Prices a selection given as keys, without the interactive wizard. Goes
//! through the same selection, date validation and pricing as the wizard.

use tracing::info;

use crate::catalogue::Catalogue;
use crate::dates;
use crate::error::Result;
use crate::pricing::{self, PriceBreakdown};
use crate::selection::Selection;

/// What to quote, by catalogue key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub brand: String,
    pub model: String,
    pub options: Vec<String>,
    pub start: String,
    pub end: String,
}

/// Price a request.
///
/// Repeated option keys count once.
///
/// # Errors
///
/// `SelectionError` for unknown keys, `ValidationError` for a rejected
/// date range.
pub fn quote(catalogue: &Catalogue, request: &QuoteRequest) -> Result<PriceBreakdown> {
    let mut selection = Selection::new();
    selection.set_brand(catalogue, &request.brand)?;
    selection.set_model(catalogue, &request.model)?;
    for option in &request.options {
        if !selection.is_option_chosen(option) {
            selection.toggle_option(catalogue, option)?;
        }
    }

    selection.set_dates(request.start.as_str(), request.end.as_str());
    let period = dates::validate(selection.start_date(), selection.end_date())?;
    selection.set_period(period);

    let (_, brand) = selection.resolve_brand(catalogue)?;
    let model = selection.resolve_model(catalogue)?;
    let options = selection.resolve_options(catalogue)?;
    let label = format!("{} - {}", brand.name, model.name);

    info!("Headless quote for {} over {}", label, period);
    Ok(pricing::compute_labelled(
        &label,
        model,
        options,
        period.rental_days(),
    ))
}
