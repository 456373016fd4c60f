//! Offer collections
//!
//! An [`OfferCollection`] is one full candidate solution: exactly one
//! bundle per wanted card. Its [`sum`] charges every distinct seller's
//! shipping fee once across all bundles, which is what couples the
//! per-card decisions together. Collections are persistent values: `add`
//! and `remove` return new collections sharing their bundles through
//! [`Arc`], so concurrent search branches can fan out from a common
//! starting point without locks.
//!
//! [`sum`]: OfferCollection::sum

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::bundles::OfferSet;
use crate::cards::Card;
use crate::sellers::Seller;

/// A candidate solution: one bundle per card.
#[derive(Debug, Clone)]
pub struct OfferCollection {
    bundles: Vec<Arc<OfferSet>>,
    sum: Decimal,
}

impl OfferCollection {
    /// Create a collection from shared bundles.
    ///
    /// Bundles are kept in a canonical order so that structurally equal
    /// collections compare equal regardless of insertion order. The caller
    /// is expected to supply at most one bundle per card.
    #[must_use]
    pub fn new(bundles: impl IntoIterator<Item = Arc<OfferSet>>) -> Self {
        let mut bundles: Vec<Arc<OfferSet>> = bundles.into_iter().collect();

        bundles.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));

        let sum = total(&bundles);

        Self { bundles, sum }
    }

    /// Create a collection from owned bundles.
    #[must_use]
    pub fn from_sets(sets: impl IntoIterator<Item = OfferSet>) -> Self {
        Self::new(sets.into_iter().map(Arc::new))
    }

    /// Total cost of the candidate: the sum of all bundle prices plus the
    /// shipping fee of every *distinct* seller referenced by any bundle.
    #[must_use]
    pub fn sum(&self) -> Decimal {
        self.sum
    }

    /// The bundles of this candidate.
    #[must_use]
    pub fn bundles(&self) -> &[Arc<OfferSet>] {
        &self.bundles
    }

    /// The distinct sellers referenced by any bundle, in first-appearance
    /// order.
    #[must_use]
    pub fn sellers(&self) -> Vec<&Seller> {
        distinct_sellers(&self.bundles)
    }

    /// The bundle covering the given card, if any.
    #[must_use]
    pub fn bundle_for(&self, card: &Card) -> Option<&OfferSet> {
        self.bundles
            .iter()
            .map(Arc::as_ref)
            .find(|bundle| bundle.card() == card)
    }

    /// A new collection with the given bundle included. Non-mutating.
    #[must_use]
    pub fn add(&self, bundle: Arc<OfferSet>) -> Self {
        let mut bundles = self.bundles.clone();
        bundles.push(bundle);

        Self::new(bundles)
    }

    /// A new collection without the given card's bundle. Non-mutating.
    #[must_use]
    pub fn remove(&self, card: &Card) -> Self {
        Self::new(
            self.bundles
                .iter()
                .filter(|bundle| bundle.card() != card)
                .cloned(),
        )
    }

    /// Number of bundles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether the collection holds no bundles yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl PartialEq for OfferCollection {
    fn eq(&self, other: &Self) -> bool {
        self.bundles
            .iter()
            .map(Arc::as_ref)
            .eq(other.bundles.iter().map(Arc::as_ref))
    }
}

impl Eq for OfferCollection {}

impl fmt::Display for OfferCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bundles totalling {}", self.bundles.len(), self.sum)
    }
}

fn total(bundles: &[Arc<OfferSet>]) -> Decimal {
    let prices: Decimal = bundles.iter().map(|bundle| bundle.price()).sum();
    let shipping: Decimal = distinct_sellers(bundles)
        .iter()
        .map(|seller| seller.shipping())
        .sum();

    prices + shipping
}

fn distinct_sellers(bundles: &[Arc<OfferSet>]) -> Vec<&Seller> {
    let mut sellers: Vec<&Seller> = Vec::new();

    for bundle in bundles {
        for seller in bundle.sellers() {
            if !sellers.contains(&seller) {
                sellers.push(seller);
            }
        }
    }

    sellers
}
