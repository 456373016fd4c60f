//! Offer sources
//!
//! The boundary to whatever supplies raw offers for a card. The search
//! core never fetches anything itself; it only consumes [`Offer`] lists
//! and needs the source to distinguish *why* a card yielded none, so the
//! caller can exclude it and keep going with the rest of the list.
//!
//! [`JsonOfferSource`] is the file-backed implementation used by the CLI
//! and the tests: a JSON dump of listings, optionally annotated with the
//! marketplace attributes the [`SearchSettings`] filter on.

use std::fs;
use std::path::Path;

use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::cards::Card;
use crate::offers::{Offer, OfferError};
use crate::sellers::{Seller, SellerError};
use crate::settings::{CardCondition, Language, SearchSettings, SellerCountry, SellerType};

/// Why a card's offers could not be supplied.
#[derive(Debug, Error)]
pub enum OfferSourceError {
    /// None of the card's acceptable expansions are known to this source.
    #[error("no expansion of {expansions:?} is known to this source")]
    UnknownExpansion {
        /// The card's acceptable expansions
        expansions: Vec<String>,
    },

    /// The expansions are known, but the card has no listings under them
    /// (or none that pass the settings filters).
    #[error("card '{card}' has no offers under its accepted expansions")]
    CardNotFound {
        /// Card name
        card: String,
    },

    /// The offer data could not be read.
    #[error("failed to load offer data: {0}")]
    Io(#[from] std::io::Error),

    /// The offer data could not be parsed.
    #[error("failed to parse offer data: {0}")]
    Json(#[from] serde_json::Error),

    /// A record produced an invalid offer.
    #[error(transparent)]
    Offer(#[from] OfferError),

    /// A record produced an invalid seller.
    #[error(transparent)]
    Seller(#[from] SellerError),
}

/// Supplies the raw offer list for one card.
pub trait OfferSource {
    /// Load all offers for `card` that pass the given settings filters.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferSourceError`] distinguishing unknown expansions,
    /// missing cards and load failures, so the caller can report each card
    /// individually and proceed with the rest.
    fn load_offers(
        &self,
        card: &Card,
        settings: &SearchSettings,
    ) -> Result<Vec<Offer>, OfferSourceError>;
}

/// One listing in the offer dump.
#[derive(Debug, Clone, Deserialize)]
struct OfferRecord {
    expansion: String,
    card: String,
    seller: String,
    shipping: Decimal,
    quantity: u32,
    price: Decimal,
    #[serde(default)]
    language: Option<Language>,
    #[serde(default)]
    condition: Option<CardCondition>,
    #[serde(default)]
    seller_type: Option<SellerType>,
    #[serde(default)]
    seller_country: Option<SellerCountry>,
}

impl OfferRecord {
    /// Records missing an attribute pass the corresponding filter.
    fn passes(&self, settings: &SearchSettings) -> bool {
        if !settings.languages.is_empty()
            && self
                .language
                .is_some_and(|language| !settings.languages.contains(&language))
        {
            return false;
        }

        if let (Some(minimum), Some(condition)) = (settings.min_condition, self.condition)
            && !condition.meets(minimum)
        {
            return false;
        }

        if !settings.seller_types.is_empty()
            && self
                .seller_type
                .is_some_and(|kind| !settings.seller_types.contains(&kind))
        {
            return false;
        }

        if !settings.seller_countries.is_empty()
            && self
                .seller_country
                .is_some_and(|country| !settings.seller_countries.contains(&country))
        {
            return false;
        }

        true
    }
}

#[derive(Debug, Deserialize)]
struct OfferDump {
    /// Expansions this dump knows about; a card asking only for others is
    /// an [`OfferSourceError::UnknownExpansion`].
    #[serde(default)]
    expansions: Vec<String>,

    offers: Vec<OfferRecord>,
}

/// File-backed [`OfferSource`] reading a JSON offer dump.
#[derive(Debug)]
pub struct JsonOfferSource {
    dump: OfferDump,
}

impl JsonOfferSource {
    /// Read an offer dump from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferSourceError`] if the file cannot be read or
    /// parsed.
    pub fn from_path(path: &Path) -> Result<Self, OfferSourceError> {
        let dump = serde_json::from_str(&fs::read_to_string(path)?)?;

        Ok(Self { dump })
    }
}

impl OfferSource for JsonOfferSource {
    fn load_offers(
        &self,
        card: &Card,
        settings: &SearchSettings,
    ) -> Result<Vec<Offer>, OfferSourceError> {
        let accepted: Vec<&String> = card
            .expansions()
            .iter()
            .filter(|expansion| self.dump.expansions.contains(expansion))
            .collect();

        if accepted.is_empty() {
            return Err(OfferSourceError::UnknownExpansion {
                expansions: card.expansions().to_vec(),
            });
        }

        let mut offers = Vec::new();

        for record in &self.dump.offers {
            if record.card != card.name()
                || !accepted.iter().any(|expansion| **expansion == record.expansion)
                || !record.passes(settings)
            {
                continue;
            }

            let seller = Seller::new(&record.seller, record.shipping)?;

            offers.push(Offer::new(
                card.clone(),
                seller,
                record.quantity,
                record.price,
                &record.expansion,
            )?);
        }

        if offers.is_empty() {
            return Err(OfferSourceError::CardNotFound {
                card: card.name().to_string(),
            });
        }

        offers.sort();
        offers.dedup();

        info!("loaded {} offers for '{}'", offers.len(), card.name());

        Ok(offers)
    }
}
