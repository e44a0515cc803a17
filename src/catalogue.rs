//! Rental catalogue: brands, their models, and the options each model offers.
//!
//! The catalogue is a JSON document keyed by brand key, then model key, then
//! option key:
//!
//! ```json
//! {
//!   "brands": {
//!     "acme": {
//!       "name": "Acme",
//!       "models": {
//!         "cargo": {
//!           "name": "Cargo",
//!           "dailyPrice": 20,
//!           "options": { "rain_cover": { "name": "Rain cover", "dailyPrice": 3 } }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Maps are ordered by key so every listing derived from them is stable.
//! The catalogue is read-only once loaded.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LoadError;

/// Daily price in whole euros
pub type Price = u32;

/// Root of the brand/model/option hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    pub brands: BTreeMap<String, Brand>,
}

/// A bike brand and the models it offers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Brand {
    pub name: String,
    #[serde(default)]
    pub models: BTreeMap<String, Model>,
}

/// A rentable bike model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    pub daily_price: Price,
    #[serde(default)]
    pub options: BTreeMap<String, ModelOption>,
}

/// An add-on that can be rented together with a model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOption {
    pub name: String,
    pub daily_price: Price,
}

impl Catalogue {
    /// Load the catalogue from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!("Reading catalogue from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalogue = Self::from_json(&content)?;
        info!(
            "Loaded catalogue from {:?}: {} brands, {} models",
            path,
            catalogue.brands.len(),
            catalogue.model_count()
        );
        Ok(catalogue)
    }

    /// Parse a catalogue from a JSON document
    ///
    /// Missing names or prices, and prices that are negative or fractional,
    /// are rejected here rather than defaulted.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let catalogue: Self = serde_json::from_str(content)?;
        catalogue.check_names()?;
        Ok(catalogue)
    }

    fn check_names(&self) -> Result<(), LoadError> {
        for (brand_key, brand) in &self.brands {
            if brand.name.trim().is_empty() {
                return Err(LoadError::EmptyName(format!("brand '{}'", brand_key)));
            }
            for (model_key, model) in &brand.models {
                if model.name.trim().is_empty() {
                    return Err(LoadError::EmptyName(format!(
                        "model '{}/{}'",
                        brand_key, model_key
                    )));
                }
                for (option_key, option) in &model.options {
                    if option.name.trim().is_empty() {
                        return Err(LoadError::EmptyName(format!(
                            "option '{}/{}/{}'",
                            brand_key, model_key, option_key
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Look up a brand by key
    pub fn brand(&self, key: &str) -> Option<&Brand> {
        self.brands.get(key)
    }

    /// Brands in key order
    pub fn brands(&self) -> impl Iterator<Item = (&str, &Brand)> {
        self.brands.iter().map(|(k, b)| (k.as_str(), b))
    }

    /// Total number of models across all brands
    pub fn model_count(&self) -> usize {
        self.brands.values().map(|b| b.models.len()).sum()
    }

    /// Total number of options across all models
    pub fn option_count(&self) -> usize {
        self.brands
            .values()
            .flat_map(|b| b.models.values())
            .map(|m| m.options.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// One line per brand, model and option, indented by depth
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (brand_key, brand) in self.brands() {
            lines.push(format!("{} ({})", brand.name, brand_key));
            for (model_key, model) in brand.models() {
                lines.push(format!(
                    "  {} ({}): {} per day",
                    model.name,
                    model_key,
                    crate::pricing::format_euros(model.daily_price.into())
                ));
                for (option_key, option) in model.options_by_name() {
                    lines.push(format!(
                        "    {} ({}): {} per day",
                        option.name,
                        option_key,
                        crate::pricing::format_euros(option.daily_price.into())
                    ));
                }
            }
        }
        lines
    }
}

impl Brand {
    /// Look up a model by key
    pub fn model(&self, key: &str) -> Option<&Model> {
        self.models.get(key)
    }

    /// Models in key order
    pub fn models(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.models.iter().map(|(k, m)| (k.as_str(), m))
    }
}

impl Model {
    /// Look up an option by key
    pub fn option(&self, key: &str) -> Option<&ModelOption> {
        self.options.get(key)
    }

    /// Options ordered for display: by name, case-sensitive, key as tiebreak.
    pub fn options_by_name(&self) -> Vec<(&str, &ModelOption)> {
        let mut options: Vec<(&str, &ModelOption)> =
            self.options.iter().map(|(k, o)| (k.as_str(), o)).collect();
        options.sort_by(|(ka, a), (kb, b)| a.name.cmp(&b.name).then_with(|| ka.cmp(kb)));
        options
    }
}
