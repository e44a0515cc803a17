//! Per-session record of the user's choices.
//!
//! Choices are stored as catalogue keys and resolved against the catalogue on
//! demand. The option set only ever holds keys of the currently chosen model:
//! choosing a brand or a model clears it.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalogue::{Brand, Catalogue, Model, ModelOption};
use crate::dates::RentalPeriod;
use crate::error::SelectionError;

/// Choices accumulated while stepping through the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    brand: Option<String>,
    model: Option<String>,
    options: BTreeSet<String>,
    start_date: String,
    end_date: String,
    period: Option<RentalPeriod>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a brand; clears the model, options and rental period.
    pub fn set_brand(&mut self, catalogue: &Catalogue, key: &str) -> Result<(), SelectionError> {
        if catalogue.brand(key).is_none() {
            return Err(SelectionError::UnknownBrand(key.to_string()));
        }
        debug!("Brand chosen: {}", key);
        self.brand = Some(key.to_string());
        self.clear_model();
        Ok(())
    }

    /// Choose a model of the current brand; resets the options to empty.
    pub fn set_model(&mut self, catalogue: &Catalogue, key: &str) -> Result<(), SelectionError> {
        let (brand_key, brand) = self.resolve_brand(catalogue)?;
        if brand.model(key).is_none() {
            return Err(SelectionError::UnknownModel {
                brand: brand_key.to_string(),
                model: key.to_string(),
            });
        }
        debug!("Model chosen: {}/{}", brand_key, key);
        self.model = Some(key.to_string());
        self.options.clear();
        self.period = None;
        Ok(())
    }

    /// Flip membership of an option of the current model.
    ///
    /// Returns whether the option is chosen after the toggle.
    pub fn toggle_option(
        &mut self,
        catalogue: &Catalogue,
        key: &str,
    ) -> Result<bool, SelectionError> {
        let model = self.resolve_model(catalogue)?;
        if model.option(key).is_none() {
            return Err(SelectionError::UnknownOption {
                model: self.model.clone().unwrap_or_default(),
                option: key.to_string(),
            });
        }
        let chosen = if self.options.remove(key) {
            false
        } else {
            self.options.insert(key.to_string());
            true
        };
        debug!("Option {} toggled, now chosen: {}", key, chosen);
        Ok(chosen)
    }

    /// Drop every chosen option
    pub fn clear_options(&mut self) {
        self.options.clear();
    }

    /// Store the raw date strings. Validation happens elsewhere.
    pub fn set_dates(&mut self, start: impl Into<String>, end: impl Into<String>) {
        self.start_date = start.into();
        self.end_date = end.into();
        self.period = None;
    }

    pub fn set_start_date(&mut self, text: impl Into<String>) {
        self.start_date = text.into();
        self.period = None;
    }

    pub fn set_end_date(&mut self, text: impl Into<String>) {
        self.end_date = text.into();
        self.period = None;
    }

    /// Record the validated period for the current dates
    pub fn set_period(&mut self, period: RentalPeriod) {
        self.period = Some(period);
    }

    /// Forget the validated period, keeping the raw date strings
    pub fn clear_period(&mut self) {
        self.period = None;
    }

    /// Clear everything
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clear the model and everything scoped to it, keeping the brand
    pub fn clear_model(&mut self) {
        self.model = None;
        self.options.clear();
        self.period = None;
    }

    pub fn brand_key(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn model_key(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Keys of the chosen options
    pub fn option_keys(&self) -> &BTreeSet<String> {
        &self.options
    }

    pub fn is_option_chosen(&self, key: &str) -> bool {
        self.options.contains(key)
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn period(&self) -> Option<RentalPeriod> {
        self.period
    }

    /// Rental day count, once the dates have been validated
    pub fn rental_days(&self) -> Option<u32> {
        self.period.map(|p| p.rental_days())
    }

    /// Resolve the chosen brand against the catalogue
    pub fn resolve_brand<'c>(
        &self,
        catalogue: &'c Catalogue,
    ) -> Result<(&'c str, &'c Brand), SelectionError> {
        let key = self.brand.as_deref().ok_or(SelectionError::NoBrand)?;
        catalogue
            .brands
            .get_key_value(key)
            .map(|(k, b)| (k.as_str(), b))
            .ok_or_else(|| SelectionError::UnknownBrand(key.to_string()))
    }

    /// Resolve the chosen model against the catalogue
    pub fn resolve_model<'c>(&self, catalogue: &'c Catalogue) -> Result<&'c Model, SelectionError> {
        let (brand_key, brand) = self.resolve_brand(catalogue)?;
        let key = self.model.as_deref().ok_or(SelectionError::NoModel)?;
        brand.model(key).ok_or_else(|| SelectionError::UnknownModel {
            brand: brand_key.to_string(),
            model: key.to_string(),
        })
    }

    /// Resolve the chosen options, in key order
    pub fn resolve_options<'c>(
        &self,
        catalogue: &'c Catalogue,
    ) -> Result<Vec<&'c ModelOption>, SelectionError> {
        let model = self.resolve_model(catalogue)?;
        self.options
            .iter()
            .map(|key| {
                model.option(key).ok_or_else(|| SelectionError::UnknownOption {
                    model: self.model.clone().unwrap_or_default(),
                    option: key.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Catalogue {
        Catalogue::from_json(
            r#"{"brands": {
                "acme": {"name": "Acme", "models": {
                    "cargo": {"name": "Cargo", "dailyPrice": 20, "options": {
                        "rain_cover": {"name": "Rain cover", "dailyPrice": 3},
                        "seat": {"name": "Seat", "dailyPrice": 4}
                    }},
                    "trike": {"name": "Trike", "dailyPrice": 25, "options": {
                        "rain_cover": {"name": "Rain cover", "dailyPrice": 2}
                    }}
                }},
                "other": {"name": "Other", "models": {
                    "solo": {"name": "Solo", "dailyPrice": 10}
                }}
            }}"#,
        )
        .unwrap()
    }

    fn with_cargo(catalogue: &Catalogue) -> Selection {
        let mut selection = Selection::new();
        selection.set_brand(catalogue, "acme").unwrap();
        selection.set_model(catalogue, "cargo").unwrap();
        selection
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let catalogue = catalogue();
        let mut selection = with_cargo(&catalogue);
        selection.toggle_option(&catalogue, "seat").unwrap();
        let before = selection.option_keys().clone();

        assert!(selection.toggle_option(&catalogue, "rain_cover").unwrap());
        assert!(!selection.toggle_option(&catalogue, "rain_cover").unwrap());
        assert_eq!(selection.option_keys(), &before);
    }

    #[test]
    fn test_set_model_resets_options_even_with_same_keys() {
        let catalogue = catalogue();
        let mut selection = with_cargo(&catalogue);
        selection.toggle_option(&catalogue, "rain_cover").unwrap();

        selection.set_model(&catalogue, "trike").unwrap();
        assert!(selection.option_keys().is_empty());
    }

    #[test]
    fn test_set_brand_clears_model_and_options() {
        let catalogue = catalogue();
        let mut selection = with_cargo(&catalogue);
        selection.toggle_option(&catalogue, "seat").unwrap();

        selection.set_brand(&catalogue, "other").unwrap();
        assert_eq!(selection.brand_key(), Some("other"));
        assert_eq!(selection.model_key(), None);
        assert!(selection.option_keys().is_empty());
    }

    #[test]
    fn test_model_outside_brand_is_rejected() {
        let catalogue = catalogue();
        let mut selection = Selection::new();
        selection.set_brand(&catalogue, "other").unwrap();
        assert_eq!(
            selection.set_model(&catalogue, "cargo"),
            Err(SelectionError::UnknownModel {
                brand: "other".into(),
                model: "cargo".into()
            })
        );
        assert_eq!(selection.model_key(), None);
    }

    #[test]
    fn test_option_outside_model_is_rejected() {
        let catalogue = catalogue();
        let mut selection = Selection::new();
        selection.set_brand(&catalogue, "acme").unwrap();
        selection.set_model(&catalogue, "trike").unwrap();
        assert!(matches!(
            selection.toggle_option(&catalogue, "seat"),
            Err(SelectionError::UnknownOption { .. })
        ));
        assert!(selection.option_keys().is_empty());
    }

    #[test]
    fn test_model_before_brand_is_rejected() {
        let catalogue = catalogue();
        let mut selection = Selection::new();
        assert_eq!(
            selection.set_model(&catalogue, "cargo"),
            Err(SelectionError::NoBrand)
        );
        assert_eq!(
            selection.toggle_option(&catalogue, "seat"),
            Err(SelectionError::NoBrand)
        );
    }

    #[test]
    fn test_set_dates_does_not_validate() {
        let mut selection = Selection::new();
        selection.set_dates("garbage", "31-02-2024");
        assert_eq!(selection.start_date(), "garbage");
        assert_eq!(selection.end_date(), "31-02-2024");
        assert_eq!(selection.rental_days(), None);
    }

    #[test]
    fn test_editing_a_date_drops_the_period() {
        let mut selection = Selection::new();
        selection.set_dates("01-01-2024", "02-01-2024");
        selection.set_period(crate::dates::validate("01-01-2024", "02-01-2024").unwrap());
        assert_eq!(selection.rental_days(), Some(2));

        selection.set_end_date("05-01-2024");
        assert_eq!(selection.rental_days(), None);
    }

    #[test]
    fn test_clear_period_keeps_date_text() {
        let mut selection = Selection::new();
        selection.set_dates("01-01-2024", "03-01-2024");
        selection.set_period(crate::dates::validate("01-01-2024", "03-01-2024").unwrap());

        selection.clear_period();
        assert_eq!(selection.rental_days(), None);
        assert_eq!(selection.start_date(), "01-01-2024");
        assert_eq!(selection.end_date(), "03-01-2024");
    }

    #[test]
    fn test_reset_clears_everything() {
        let catalogue = catalogue();
        let mut selection = with_cargo(&catalogue);
        selection.toggle_option(&catalogue, "seat").unwrap();
        selection.set_dates("01-01-2024", "02-01-2024");

        selection.reset();
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_resolve_options() {
        let catalogue = catalogue();
        let mut selection = with_cargo(&catalogue);
        selection.toggle_option(&catalogue, "seat").unwrap();
        selection.toggle_option(&catalogue, "rain_cover").unwrap();

        let names: Vec<&str> = selection
            .resolve_options(&catalogue)
            .unwrap()
            .into_iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rain cover", "Seat"]);
    }
}
