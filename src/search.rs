//! Order search
//!
//! [`OrderFinder`] owns the per-card candidate bundle lists and explores
//! their full cross product for the cheapest [`OfferCollection`]. The
//! first card's candidate index range is partitioned into contiguous
//! sub-ranges, one per worker thread; each worker then runs a depth-first
//! enumeration over the remaining cards. Every leaf is evaluated — there
//! is no branch-and-bound cutoff — so wall-clock cost is proportional to
//! [`OrderFinder::total_checks`]. The best candidate found so far and the
//! evaluated-leaf counter live behind a single mutex; per-branch state is
//! persistent, so workers never share mutable state outside that lock.

use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::bundles::OfferSet;
use crate::cards::Card;
use crate::collections::OfferCollection;

/// Errors raised when constructing an [`OrderFinder`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// An empty shopping list has nothing to search.
    #[error("cannot search an empty card list")]
    EmptyCardList,

    /// Every card must have at least one candidate bundle; exclude cards
    /// that yielded none before building the finder.
    #[error("card '{card}' has no candidate bundles")]
    NoCandidates {
        /// Card name
        card: String,
    },

    /// A candidate bundle was listed under a card it does not cover.
    #[error("candidate bundle for '{found}' was listed under card '{expected}'")]
    ForeignBundle {
        /// The card the bundle was listed under
        expected: String,

        /// The card the bundle actually covers
        found: String,
    },
}

#[derive(Debug)]
struct SearchState {
    performed: u64,
    best: OfferCollection,
}

/// Exhaustive, partitioned search over per-card candidate bundles.
#[derive(Debug)]
pub struct OrderFinder {
    /// One candidate list per card, cards with more candidates first so
    /// the partition of the first list yields evenly sized work shares.
    candidates: Vec<(Card, Vec<Arc<OfferSet>>)>,
    total_checks: u64,
    shared: Mutex<SearchState>,
}

impl OrderFinder {
    /// Build a finder from the candidate bundles of every card.
    ///
    /// Candidate lists are sorted cheapest-first and the running best is
    /// seeded with each card's cheapest bundle.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] if the card list is empty, a card has no
    /// candidates, or a bundle is listed under the wrong card.
    pub fn new(candidates: FxHashMap<Card, Vec<OfferSet>>) -> Result<Self, SearchError> {
        if candidates.is_empty() {
            return Err(SearchError::EmptyCardList);
        }

        let mut lists: Vec<(Card, Vec<Arc<OfferSet>>)> = Vec::with_capacity(candidates.len());

        for (card, mut sets) in candidates {
            if sets.is_empty() {
                return Err(SearchError::NoCandidates {
                    card: card.name().to_string(),
                });
            }

            if let Some(foreign) = sets.iter().find(|set| set.card() != &card) {
                return Err(SearchError::ForeignBundle {
                    expected: card.name().to_string(),
                    found: foreign.card().name().to_string(),
                });
            }

            sets.sort();
            lists.push((card, sets.into_iter().map(Arc::new).collect()));
        }

        lists.sort_by(|a, b| {
            b.1.len()
                .cmp(&a.1.len())
                .then_with(|| a.0.cmp(&b.0))
        });

        let total_checks = lists
            .iter()
            .fold(1u64, |acc, (_, sets)| acc.saturating_mul(sets.len() as u64));

        let best = OfferCollection::new(
            lists
                .iter()
                .filter_map(|(_, sets)| sets.first().map(Arc::clone)),
        );

        Ok(Self {
            candidates: lists,
            total_checks,
            shared: Mutex::new(SearchState { performed: 0, best }),
        })
    }

    /// The full cross-product size: the number of leaf combinations a
    /// complete search evaluates.
    #[must_use]
    pub fn total_checks(&self) -> u64 {
        self.total_checks
    }

    /// How many leaf combinations have been evaluated so far. Readable
    /// concurrently with a running search; after [`find_lowest_offer`]
    /// returns it equals [`total_checks`].
    ///
    /// [`find_lowest_offer`]: OrderFinder::find_lowest_offer
    /// [`total_checks`]: OrderFinder::total_checks
    #[must_use]
    pub fn performed_checks(&self) -> u64 {
        self.shared_state().performed
    }

    /// Exhaustively search the cross product with the given number of
    /// worker threads and return the cheapest collection found.
    ///
    /// A `thread_count` below one is treated as one; counts beyond the
    /// first card's candidate count are clamped to it. Blocks until every
    /// worker has finished. Ties on equal sums are won by whichever branch
    /// reports first, so the winning collection may differ across runs —
    /// its sum never does.
    #[must_use]
    pub fn find_lowest_offer(&self, thread_count: usize) -> OfferCollection {
        self.shared_state().performed = 0;

        let Some((_, first)) = self.candidates.first() else {
            return self.shared_state().best.clone();
        };

        let leaves = first.len();
        let workers = thread_count.max(1).min(leaves);
        let share = leaves / workers;

        thread::scope(|scope| {
            for worker in 0..workers {
                let start = worker * share;
                // The division remainder is folded into the final range.
                let end = if worker + 1 == workers {
                    leaves
                } else {
                    start + share
                };

                scope.spawn(move || self.explore(start..end));
            }
        });

        self.shared_state().best.clone()
    }

    /// Explore one contiguous sub-range of the first card's candidates.
    fn explore(&self, range: Range<usize>) {
        let Some((_, first)) = self.candidates.first() else {
            return;
        };

        for bundle in &first[range] {
            let partial = OfferCollection::new([Arc::clone(bundle)]);
            self.descend(1, &partial);
        }
    }

    fn descend(&self, depth: usize, partial: &OfferCollection) {
        let Some((_, bundles)) = self.candidates.get(depth) else {
            self.record_leaf(partial);
            return;
        };

        for bundle in bundles {
            let next = partial.add(Arc::clone(bundle));
            self.descend(depth + 1, &next);
        }
    }

    fn record_leaf(&self, leaf: &OfferCollection) {
        let mut state = self.shared_state();

        state.performed += 1;

        if leaf.sum() < state.best.sum() {
            state.best = leaf.clone();
        }
    }

    /// Workers never panic while holding the lock, but a poisoned guard
    /// still yields the underlying state rather than aborting the search.
    fn shared_state(&self) -> MutexGuard<'_, SearchState> {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
