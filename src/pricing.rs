//! Price calculation for a model, its chosen options and a rental period.
//!
//! Totals are pre-tax. The VAT rate is carried on every line for display only
//! and is never added into a total.

use std::fmt;

use tracing::debug;

use crate::catalogue::{Model, ModelOption};

/// VAT rate shown alongside every price line
pub const TAX_RATE_PERCENT: u8 = 21;

/// Label of the synthesized totals line
pub const TOTALS_LABEL: &str = "Total";

/// One priced row of a breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLineItem {
    pub label: String,
    pub daily_price: u64,
    pub total_price: u64,
    pub tax_rate_percent: u8,
}

impl PriceLineItem {
    fn new(label: impl Into<String>, daily_price: u64, rental_days: u32) -> Self {
        Self {
            label: label.into(),
            daily_price,
            total_price: daily_price * u64::from(rental_days),
            tax_rate_percent: TAX_RATE_PERCENT,
        }
    }
}

/// Itemized price for a confirmed selection
///
/// `items` holds the model line first, then one line per option ordered by
/// option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub items: Vec<PriceLineItem>,
    pub totals: PriceLineItem,
    pub rental_days: u32,
}

impl PriceBreakdown {
    /// The model line
    pub fn model_line(&self) -> &PriceLineItem {
        &self.items[0]
    }

    /// The option lines, in display order
    pub fn option_lines(&self) -> &[PriceLineItem] {
        &self.items[1..]
    }

    /// Every line including totals, in display order
    pub fn lines(&self) -> impl Iterator<Item = &PriceLineItem> {
        self.items.iter().chain(std::iter::once(&self.totals))
    }
}

impl fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .lines()
            .map(|l| l.label.chars().count())
            .max()
            .unwrap_or(0)
            .max("Description".len());
        writeln!(
            f,
            "{:<width$}  {:>12}  {:>12}  {:>5}",
            "Description", "Daily price", "Total", "VAT"
        )?;
        for line in self.lines() {
            writeln!(
                f,
                "{:<width$}  {:>12}  {:>12}  {:>4}%",
                line.label,
                format_euros(line.daily_price),
                format_euros(line.total_price),
                line.tax_rate_percent
            )?;
        }
        write!(f, "Rental period: {} days", self.rental_days)
    }
}

/// Format a whole-euro amount for display
pub fn format_euros(amount: u64) -> String {
    format!("€ {}", amount)
}

/// Price a model with its options, labelling the model line with the model name.
///
/// # Panics
///
/// If `rental_days` is 0. A validated rental period is always at least one day.
pub fn compute<'a, I>(model: &Model, options: I, rental_days: u32) -> PriceBreakdown
where
    I: IntoIterator<Item = &'a ModelOption>,
{
    compute_labelled(&model.name, model, options, rental_days)
}

/// Price a model with its options, using `label` for the model line.
///
/// Options are ordered by name (then price) before pricing, so the result does
/// not depend on the order they are supplied in.
///
/// # Panics
///
/// If `rental_days` is 0.
pub fn compute_labelled<'a, I>(
    label: &str,
    model: &Model,
    options: I,
    rental_days: u32,
) -> PriceBreakdown
where
    I: IntoIterator<Item = &'a ModelOption>,
{
    assert!(rental_days >= 1, "rental period must be at least one day");

    let mut options: Vec<&ModelOption> = options.into_iter().collect();
    options.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.daily_price.cmp(&b.daily_price))
    });

    let mut items = Vec::with_capacity(options.len() + 1);
    items.push(PriceLineItem::new(
        label,
        u64::from(model.daily_price),
        rental_days,
    ));
    for option in options {
        items.push(PriceLineItem::new(
            option.name.clone(),
            u64::from(option.daily_price),
            rental_days,
        ));
    }

    let daily_sum: u64 = items.iter().map(|i| i.daily_price).sum();
    let totals = PriceLineItem::new(TOTALS_LABEL, daily_sum, rental_days);
    debug!(
        "Priced {} lines over {} days: {} per day, {} total",
        items.len(),
        rental_days,
        totals.daily_price,
        totals.total_price
    );

    PriceBreakdown {
        items,
        totals,
        rental_days,
    }
}
