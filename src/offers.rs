//! Offers
//!
//! An [`Offer`] is one seller's listing for one card from one specific
//! expansion. Offers are immutable, hash on their full tuple so they can be
//! de-duplicated and used as keys, and order primarily by unit price.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cards::Card;
use crate::sellers::Seller;

/// Errors raised when constructing an [`Offer`].
#[derive(Debug, Error)]
pub enum OfferError {
    /// A listing with nothing to sell is meaningless.
    #[error("offer from '{seller}' for '{card}' has a quantity of zero")]
    ZeroQuantity {
        /// Seller name
        seller: String,

        /// Card name
        card: String,
    },

    /// Unit prices are never negative.
    #[error("offer from '{seller}' for '{card}' has a negative price: {price}")]
    NegativePrice {
        /// Seller name
        seller: String,

        /// Card name
        card: String,

        /// The offending unit price
        price: Decimal,
    },

    /// The listed expansion is not in the card's acceptable set.
    #[error("offer for '{card}' lists expansion '{expansion}', which the card does not accept")]
    ExpansionNotAccepted {
        /// Card name
        card: String,

        /// The offending expansion
        expansion: String,
    },
}

/// A seller's listing for one card from one expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Offer {
    card: Card,
    seller: Seller,
    available: u32,
    price: Decimal,
    expansion: String,
}

impl Offer {
    /// Create a new offer of `available` copies at `price` per copy.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferError`] if the quantity is zero, the price is
    /// negative, or the expansion is not acceptable for the card.
    pub fn new(
        card: Card,
        seller: Seller,
        available: u32,
        price: Decimal,
        expansion: impl Into<String>,
    ) -> Result<Self, OfferError> {
        let expansion = expansion.into();

        if available == 0 {
            return Err(OfferError::ZeroQuantity {
                seller: seller.name().to_string(),
                card: card.name().to_string(),
            });
        }

        if price < Decimal::ZERO {
            return Err(OfferError::NegativePrice {
                seller: seller.name().to_string(),
                card: card.name().to_string(),
                price,
            });
        }

        if !card.accepts(&expansion) {
            return Err(OfferError::ExpansionNotAccepted {
                card: card.name().to_string(),
                expansion,
            });
        }

        Ok(Self {
            card,
            seller,
            available,
            price,
            expansion,
        })
    }

    /// The card this offer is for.
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// The seller making the offer.
    #[must_use]
    pub fn seller(&self) -> &Seller {
        &self.seller
    }

    /// How many copies the seller has listed.
    #[must_use]
    pub fn available(&self) -> u32 {
        self.available
    }

    /// The unit price per copy.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// The expansion this listing is from.
    #[must_use]
    pub fn expansion(&self) -> &str {
        &self.expansion
    }
}

impl PartialOrd for Offer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Offer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| self.seller.cmp(&other.seller))
            .then_with(|| self.expansion.cmp(&other.expansion))
            .then_with(|| self.available.cmp(&other.available))
            .then_with(|| self.card.cmp(&other.card))
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of '{}' ({}) at {}",
            self.seller.name(),
            self.available,
            self.card.name(),
            self.expansion,
            self.price
        )
    }
}
