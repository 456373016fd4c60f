//! Offer bundles
//!
//! An [`OfferSet`] is a de-duplicated combination of offers, all for the
//! same card, together with the deterministic cheapest-first distribution
//! of the card's wanted quantity across those offers. Offers that end up
//! contributing nothing are trimmed away, so two bundles compare equal
//! whenever their effective offers match.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::cards::Card;
use crate::offers::Offer;
use crate::sellers::Seller;

pub mod generator;

/// Errors raised when constructing an [`OfferSet`].
#[derive(Debug, Error)]
pub enum OfferSetError {
    /// A bundle needs at least one offer.
    #[error("an offer bundle needs at least one offer")]
    Empty,

    /// All offers of a bundle must be for the same card.
    #[error("offer bundle mixes cards: expected '{expected}', found '{found}'")]
    MixedCards {
        /// Card of the first offer
        expected: String,

        /// Card of the offending offer
        found: String,
    },

    /// The combined quantity does not cover the wanted amount.
    #[error("offers for '{card}' cover only {available} of {needed} wanted copies")]
    InsufficientQuantity {
        /// Card name
        card: String,

        /// Combined quantity across the offers
        available: u32,

        /// Wanted amount
        needed: u32,
    },
}

/// One offer inside a bundle together with the quantity drawn from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawnOffer {
    /// The offer bought from
    pub offer: Offer,

    /// How many copies the distribution draws from it (always at least one)
    pub quantity: u32,
}

impl DrawnOffer {
    /// The price contribution of this line: unit price times drawn quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.offer.price() * Decimal::from(self.quantity)
    }
}

impl PartialOrd for DrawnOffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DrawnOffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offer
            .cmp(&other.offer)
            .then_with(|| self.quantity.cmp(&other.quantity))
    }
}

/// A minimal covering bundle of offers for one card.
///
/// The distribution is computed once at construction: offers are sorted by
/// `(unit price ascending, quantity available descending)` and the wanted
/// amount is filled greedily from the cheapest offer onwards. [`price`]
/// excludes shipping entirely; shipping is only accounted for at the
/// [`crate::collections::OfferCollection`] level, where sellers shared
/// between bundles are charged once.
///
/// [`price`]: OfferSet::price
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OfferSet {
    card: Card,
    lines: SmallVec<[DrawnOffer; 4]>,
    price: Decimal,
}

impl OfferSet {
    /// Build a bundle from the given offers.
    ///
    /// Duplicate offers are dropped. Construction fails fast on a contract
    /// violation rather than producing a half-valid bundle.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferSetError`] if no offers are given, the offers span
    /// more than one card, or their combined quantity cannot cover the
    /// card's wanted amount.
    pub fn new(offers: impl IntoIterator<Item = Offer>) -> Result<Self, OfferSetError> {
        let mut unique: Vec<Offer> = Vec::new();

        for offer in offers {
            if !unique.contains(&offer) {
                unique.push(offer);
            }
        }

        let Some(first) = unique.first() else {
            return Err(OfferSetError::Empty);
        };

        let card = first.card().clone();

        if let Some(foreign) = unique.iter().find(|offer| offer.card() != &card) {
            return Err(OfferSetError::MixedCards {
                expected: card.name().to_string(),
                found: foreign.card().name().to_string(),
            });
        }

        let available: u32 = unique.iter().map(Offer::available).sum();

        if available < card.amount() {
            return Err(OfferSetError::InsufficientQuantity {
                card: card.name().to_string(),
                available,
                needed: card.amount(),
            });
        }

        // Cheapest first; among equal prices, prefer the larger stock so
        // fewer offers survive the trim.
        unique.sort_by(|a, b| {
            a.price()
                .cmp(&b.price())
                .then_with(|| b.available().cmp(&a.available()))
                .then_with(|| a.cmp(b))
        });

        let mut remaining = card.amount();
        let mut lines: SmallVec<[DrawnOffer; 4]> = SmallVec::new();

        for offer in unique {
            if remaining == 0 {
                break;
            }

            let quantity = remaining.min(offer.available());
            remaining -= quantity;
            lines.push(DrawnOffer { offer, quantity });
        }

        // Canonical line order, so equality and hashing are structural.
        lines.sort();

        let price = lines.iter().map(DrawnOffer::line_total).sum();

        Ok(Self { card, lines, price })
    }

    /// The card every offer of this bundle is for.
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// The bundle price: sum of unit price times drawn quantity over the
    /// distribution. Shipping is not included.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// The trimmed distribution: every retained offer with its drawn
    /// quantity. No line has a quantity of zero.
    #[must_use]
    pub fn distribution(&self) -> &[DrawnOffer] {
        &self.lines
    }

    /// The sellers referenced by the trimmed bundle, de-duplicated in line
    /// order.
    #[must_use]
    pub fn sellers(&self) -> Vec<&Seller> {
        let mut sellers: Vec<&Seller> = Vec::new();

        for line in &self.lines {
            if !sellers.contains(&line.offer.seller()) {
                sellers.push(line.offer.seller());
            }
        }

        sellers
    }

    /// Number of effective offers after trimming.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// A bundle is never empty; provided for container-API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl PartialOrd for OfferSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OfferSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| self.card.cmp(&other.card))
            .then_with(|| self.lines.cmp(&other.lines))
    }
}

impl fmt::Display for OfferSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} offers for '{}' at {}",
            self.lines.len(),
            self.card.name(),
            self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(amount: u32) -> Card {
        Card::new("Shock", ["M20"], amount).expect("valid card")
    }

    fn offer(card: &Card, seller: &str, available: u32, cents: i64) -> Offer {
        let seller = Seller::new(seller, Decimal::new(115, 2)).expect("valid seller");

        Offer::new(card.clone(), seller, available, Decimal::new(cents, 2), "M20")
            .expect("valid offer")
    }

    #[test]
    fn distributes_cheapest_first() -> Result<(), OfferSetError> {
        let card = card(3);
        let set = OfferSet::new([
            offer(&card, "alice", 2, 30),
            offer(&card, "bob", 2, 10),
        ])?;

        let drawn: Vec<(u32, Decimal)> = set
            .distribution()
            .iter()
            .map(|line| (line.quantity, line.offer.price()))
            .collect();

        assert_eq!(drawn, [(2, Decimal::new(10, 2)), (1, Decimal::new(30, 2))]);
        assert_eq!(set.price(), Decimal::new(50, 2));

        Ok(())
    }

    #[test]
    fn covers_at_least_the_wanted_amount() -> Result<(), OfferSetError> {
        let card = card(3);
        let set = OfferSet::new([
            offer(&card, "alice", 2, 30),
            offer(&card, "bob", 2, 10),
        ])?;

        let drawn: u32 = set.distribution().iter().map(|line| line.quantity).sum();

        assert!(drawn >= card.amount(), "distribution must cover the card");
        assert!(
            set.distribution().iter().all(|line| line.quantity > 0),
            "trimmed bundles have no zero-quantity lines"
        );

        Ok(())
    }

    #[test]
    fn trims_offers_that_contribute_nothing() -> Result<(), OfferSetError> {
        let card = card(2);
        let covering = offer(&card, "bob", 2, 10);
        let redundant = offer(&card, "alice", 2, 30);

        let trimmed = OfferSet::new([covering.clone(), redundant])?;
        let singleton = OfferSet::new([covering])?;

        assert_eq!(trimmed, singleton);
        assert_eq!(trimmed.len(), 1);

        Ok(())
    }

    #[test]
    fn price_is_stable_under_permutation() -> Result<(), OfferSetError> {
        let card = card(3);
        let a = offer(&card, "alice", 1, 12);
        let b = offer(&card, "bob", 2, 10);
        let c = offer(&card, "carol", 1, 34);

        let forward = OfferSet::new([a.clone(), b.clone(), c.clone()])?;
        let backward = OfferSet::new([c, b, a])?;

        assert_eq!(forward.price(), backward.price());
        assert_eq!(forward, backward);

        Ok(())
    }

    #[test]
    fn equal_prices_prefer_larger_stock() -> Result<(), OfferSetError> {
        let card = card(2);
        let small = offer(&card, "alice", 1, 10);
        let large = offer(&card, "bob", 2, 10);

        let set = OfferSet::new([small, large])?;

        assert_eq!(set.len(), 1, "the larger stock should absorb the draw");
        assert_eq!(
            set.distribution()
                .first()
                .map(|line| line.offer.seller().name().to_string()),
            Some("bob".to_string())
        );

        Ok(())
    }

    #[test]
    fn rejects_mixed_cards() {
        let shock = card(1);
        let bolt = Card::new("Lightning Bolt", ["M20"], 1).expect("valid card");

        let result = OfferSet::new([offer(&shock, "alice", 1, 10), offer(&bolt, "alice", 1, 20)]);

        assert!(matches!(result, Err(OfferSetError::MixedCards { .. })));
    }

    #[test]
    fn rejects_empty_and_insufficient_bundles() {
        assert!(matches!(OfferSet::new([]), Err(OfferSetError::Empty)));

        let card = card(5);
        let result = OfferSet::new([offer(&card, "alice", 2, 10)]);

        assert!(matches!(
            result,
            Err(OfferSetError::InsufficientQuantity {
                available: 2,
                needed: 5,
                ..
            })
        ));
    }

    #[test]
    fn orders_by_price() -> Result<(), OfferSetError> {
        let card = card(1);
        let cheap = OfferSet::new([offer(&card, "alice", 1, 10)])?;
        let pricey = OfferSet::new([offer(&card, "bob", 1, 40)])?;

        assert!(cheap < pricey);

        Ok(())
    }
}
