//! Search settings
//!
//! Marketplace-side filters applied by the offer source plus the opt-in
//! pre-search pruning flags. Settings load from a JSON file in which every
//! filter key accepts either a single value or a list.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::filters::FilterOptions;

/// Errors raised when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for this schema.
    #[error("failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Card language accepted by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// English printings
    English,

    /// German printings
    German,
}

/// Card condition, best to worst. A listing "meets" a minimum condition
/// when it is at least as good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCondition {
    /// Mint
    Mint,

    /// Near mint
    NearMint,

    /// Excellent
    Excellent,

    /// Good
    Good,

    /// Lightly played
    LightlyPlayed,

    /// Played
    Played,

    /// Poor
    Poor,
}

impl CardCondition {
    /// Whether this condition is at least as good as `minimum`.
    #[must_use]
    pub fn meets(self, minimum: Self) -> bool {
        self <= minimum
    }
}

/// Kind of seller account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerType {
    /// Private individual
    Private,

    /// Commercial seller
    Commercial,

    /// High-volume commercial seller
    PowerSeller,
}

/// Country the seller ships from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerCountry {
    /// Germany
    Germany,
}

/// Filter parameters for offer loading plus the pruning flags.
///
/// Empty filter lists and `None` mean "accept anything". The pruning flags
/// default to off; see [`crate::filters`] for the optimality trade-off
/// they buy speed with.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Accepted card languages
    #[serde(rename = "language", deserialize_with = "one_or_many")]
    pub languages: Vec<Language>,

    /// Worst acceptable card condition
    pub min_condition: Option<CardCondition>,

    /// Accepted seller account types
    #[serde(rename = "seller_type", deserialize_with = "one_or_many")]
    pub seller_types: Vec<SellerType>,

    /// Accepted seller countries
    #[serde(rename = "seller_country", deserialize_with = "one_or_many")]
    pub seller_countries: Vec<SellerCountry>,

    /// Enable single-seller pruning before bundle generation
    pub prune_single_sellers: bool,

    /// Enable expensive-offer pruning before bundle generation
    pub prune_expensive_offers: bool,
}

impl SearchSettings {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// The pre-search reductions these settings opt into.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            prune_single_sellers: self.prune_single_sellers,
            prune_expensive_offers: self.prune_expensive_offers,
        }
    }
}

/// Accepts `"x"`, `["x", "y"]` or `null` for a filter key.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}
