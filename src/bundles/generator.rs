//! Candidate bundle generation
//!
//! Enumerates every *minimal* combination of a card's offers whose combined
//! quantity covers the wanted amount. Bundles are grown by recursive
//! extension from each singleton and extension stops the instant a bundle
//! becomes sufficient, so no emitted bundle grows past the point of
//! covering the card. With `k` offers the candidate count is exponential
//! in the worst case; the opt-in reductions in [`crate::filters`] exist
//! to keep `k` small before generation runs.

use log::info;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::bundles::{OfferSet, OfferSetError};
use crate::cards::Card;
use crate::offers::Offer;

/// Enumerate all minimal covering bundles for one card's offer list.
///
/// Duplicate offers are dropped before enumeration, and structurally equal
/// bundles (equal after trimming) are de-duplicated in the result. The
/// returned bundles are sorted by price ascending. An empty offer list
/// yields no bundles.
///
/// # Errors
///
/// Returns [`OfferSetError::MixedCards`] if the offers span more than one
/// card.
pub fn minimal_bundles(offers: &[Offer]) -> Result<Vec<OfferSet>, OfferSetError> {
    let mut pool: Vec<&Offer> = Vec::new();

    for offer in offers {
        if !pool.contains(&offer) {
            pool.push(offer);
        }
    }

    let Some(first) = pool.first() else {
        return Ok(Vec::new());
    };

    let card = first.card();

    if let Some(foreign) = pool.iter().find(|offer| offer.card() != card) {
        return Err(OfferSetError::MixedCards {
            expected: card.name().to_string(),
            found: foreign.card().name().to_string(),
        });
    }

    let mut combos: FxHashSet<Vec<usize>> = FxHashSet::default();
    let mut current = Vec::new();

    for start in 0..pool.len() {
        extend(&pool, card.amount(), &mut current, start, &mut combos);
    }

    let mut seen: FxHashSet<OfferSet> = FxHashSet::default();
    let mut sets = Vec::new();

    for combo in combos {
        let set = OfferSet::new(combo.iter().map(|&index| pool[index].clone()))?;

        if seen.insert(set.clone()) {
            sets.push(set);
        }
    }

    sets.sort();

    Ok(sets)
}

fn extend(
    pool: &[&Offer],
    needed: u32,
    current: &mut Vec<usize>,
    next: usize,
    combos: &mut FxHashSet<Vec<usize>>,
) {
    current.push(next);

    let available: u32 = current.iter().map(|&index| pool[index].available()).sum();

    if available >= needed {
        let mut combo = current.clone();
        combo.sort_unstable();
        combos.insert(combo);
    } else {
        for index in 0..pool.len() {
            if !current.contains(&index) {
                extend(pool, needed, current, index, combos);
            }
        }
    }

    current.pop();
}

/// Generate the candidate bundle list for every card of a shopping list.
///
/// Cards whose offer list is empty map to an empty candidate list; the
/// caller decides whether to exclude them or treat that as a failure (the
/// search rejects them).
///
/// # Errors
///
/// Returns [`OfferSetError::MixedCards`] if any card's offer list contains
/// offers for a different card.
pub fn bundles_by_card(
    all_offers: &FxHashMap<Card, Vec<Offer>>,
) -> Result<FxHashMap<Card, Vec<OfferSet>>, OfferSetError> {
    let mut candidates = FxHashMap::default();

    for (card, offers) in all_offers {
        let sets = minimal_bundles(offers)?;

        info!(
            "generated {} candidate bundles for '{}' from {} offers",
            sets.len(),
            card.name(),
            offers.len()
        );

        candidates.insert(card.clone(), sets);
    }

    Ok(candidates)
}
