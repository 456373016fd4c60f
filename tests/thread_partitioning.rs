//! Partitioning invariants of the multi-threaded search.
//!
//! Splitting the first card's candidate range across workers must neither
//! skip nor double-count leaves, for any thread count, including counts
//! larger than the range itself.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use testresult::TestResult;

use cardhaul::bundles::OfferSet;
use cardhaul::cards::Card;
use cardhaul::offers::Offer;
use cardhaul::search::OrderFinder;
use cardhaul::sellers::Seller;

/// Three cards with 4, 3 and 2 single-offer candidate bundles.
fn candidates() -> TestResult<FxHashMap<Card, Vec<OfferSet>>> {
    let mut candidates = FxHashMap::default();

    for (name, bundle_count) in [("Ancestral Vision", 4u32), ("Brainstorm", 3), ("Counterspell", 2)]
    {
        let card = Card::new(name, ["EXP"], 1)?;
        let mut sets = Vec::new();

        for index in 0..bundle_count {
            let seller = Seller::new(
                format!("{name}-seller{index}"),
                Decimal::new(115, 2),
            )?;
            let offer = Offer::new(
                card.clone(),
                seller,
                1,
                Decimal::new(i64::from(10 + index * 7), 2),
                "EXP",
            )?;

            sets.push(OfferSet::new([offer])?);
        }

        candidates.insert(card, sets);
    }

    Ok(candidates)
}

#[test]
fn total_checks_is_the_full_cross_product() -> TestResult {
    let finder = OrderFinder::new(candidates()?)?;

    assert_eq!(finder.total_checks(), 4 * 3 * 2);

    Ok(())
}

#[test]
fn every_partition_evaluates_every_leaf_exactly_once() -> TestResult {
    for thread_count in [1, 2, 3, 4, 5, 7, 16, 64] {
        let finder = OrderFinder::new(candidates()?)?;
        let _best = finder.find_lowest_offer(thread_count);

        assert_eq!(
            finder.performed_checks(),
            finder.total_checks(),
            "leaves skipped or double-counted with {thread_count} threads"
        );
    }

    Ok(())
}

#[test]
fn the_minimum_is_invariant_to_the_thread_count() -> TestResult {
    let reference = {
        let finder = OrderFinder::new(candidates()?)?;
        finder.find_lowest_offer(1).sum()
    };

    for thread_count in [2, 4, 64] {
        let finder = OrderFinder::new(candidates()?)?;

        assert_eq!(finder.find_lowest_offer(thread_count).sum(), reference);
    }

    Ok(())
}

#[test]
fn performed_checks_resets_per_search() -> TestResult {
    let finder = OrderFinder::new(candidates()?)?;

    let first = finder.find_lowest_offer(2);
    let second = finder.find_lowest_offer(3);

    assert_eq!(finder.performed_checks(), finder.total_checks());
    assert_eq!(first.sum(), second.sum());

    Ok(())
}
