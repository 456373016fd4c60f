//! Pre-search offer filtering
//!
//! Two independent reductions that shrink a card's offer pool before
//! bundle generation. Both are heuristics: either one can discard an offer
//! the true optimum would have used once shipping consolidation is
//! accounted for. They are therefore opt-in and off by default; skip them
//! whenever guaranteed optimality matters more than search time.

use log::info;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cards::Card;
use crate::offers::Offer;
use crate::sellers::Seller;

/// Which of the opt-in reductions to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Drop offers from sellers that appear for only one card of the list
    /// (single-copy cards only; the cheapest offer is always kept).
    pub prune_single_sellers: bool,

    /// Drop offers priced above the cheapest offer's price plus its
    /// seller's shipping (single-copy cards only). Can discard the true
    /// optimum in consolidation scenarios.
    pub prune_expensive_offers: bool,
}

impl FilterOptions {
    /// No reductions: the search stays exhaustive over the raw offers.
    #[must_use]
    pub fn exact() -> Self {
        Self::default()
    }
}

/// Apply the selected reductions to the raw per-card offer lists.
#[must_use]
pub fn apply(
    options: FilterOptions,
    mut data: FxHashMap<Card, Vec<Offer>>,
) -> FxHashMap<Card, Vec<Offer>> {
    if options.prune_single_sellers {
        data = prune_single_sellers(data);
    }

    if options.prune_expensive_offers {
        data = prune_expensive_offers(data);
    }

    data
}

/// Sellers offering only one card of the list cannot amortize shipping
/// across cards. For cards wanted once, restrict the pool to sellers that
/// appear for at least two cards, always keeping the card's single
/// cheapest offer so the card stays coverable. Cards wanted more than once
/// are left untouched, since multi-offer bundles may still need unique
/// sellers to reach the quantity.
fn prune_single_sellers(data: FxHashMap<Card, Vec<Offer>>) -> FxHashMap<Card, Vec<Offer>> {
    let mut cards_per_seller: FxHashMap<&Seller, FxHashSet<&Card>> = FxHashMap::default();

    for (card, offers) in &data {
        for offer in offers {
            cards_per_seller.entry(offer.seller()).or_default().insert(card);
        }
    }

    let shared_sellers: FxHashSet<Seller> = cards_per_seller
        .iter()
        .filter(|(_, cards)| cards.len() > 1)
        .map(|(seller, _)| (*seller).clone())
        .collect();

    let mut out = FxHashMap::default();

    for (card, offers) in data {
        if card.amount() > 1 {
            out.insert(card, offers);
            continue;
        }

        let before = offers.len();
        let cheapest = offers.iter().min().cloned();
        let mut kept: Vec<Offer> = offers
            .into_iter()
            .filter(|offer| shared_sellers.contains(offer.seller()))
            .collect();

        if let Some(cheapest) = cheapest
            && !kept.contains(&cheapest)
        {
            kept.push(cheapest);
        }

        kept.sort();

        info!(
            "single-seller pruning reduced '{}' from {} to {} offers",
            card.name(),
            before,
            kept.len()
        );

        out.insert(card, kept);
    }

    out
}

/// For cards wanted once, an offer priced above the cheapest offer's price
/// plus that seller's shipping can never beat buying the cheapest offer on
/// its own, before even counting consolidation savings. Offers at exactly
/// the baseline are kept.
fn prune_expensive_offers(data: FxHashMap<Card, Vec<Offer>>) -> FxHashMap<Card, Vec<Offer>> {
    let mut out = FxHashMap::default();

    for (card, mut offers) in data {
        if card.amount() > 1 {
            out.insert(card, offers);
            continue;
        }

        offers.sort();

        let Some(cheapest) = offers.first() else {
            out.insert(card, offers);
            continue;
        };

        let baseline = cheapest.price() + cheapest.seller().shipping();
        let before = offers.len();

        offers.retain(|offer| offer.price() <= baseline);

        info!(
            "expensive-offer pruning reduced '{}' from {} to {} offers",
            card.name(),
            before,
            offers.len()
        );

        out.insert(card, offers);
    }

    out
}
