//! End-to-end search over a three-card list.
//!
//! Card A needs two copies, B and C one each; every seller charges 1.15
//! shipping. The per-card cheapest picks would pay four shipping fees. The
//! optimum instead buys both copies of A from seller3 and B and C from
//! seller6, paying shipping twice:
//!
//!   A: 2 x 0.30 = 0.60 (seller3)
//!   B:     0.48        (seller6)
//!   C:     0.55        (seller6)
//!   shipping: 2 x 1.15 = 2.30
//!   total: 3.93

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use testresult::TestResult;

use cardhaul::bundles::generator::bundles_by_card;
use cardhaul::cards::Card;
use cardhaul::offers::Offer;
use cardhaul::search::OrderFinder;
use cardhaul::sellers::Seller;

const SHIPPING: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

fn offer(card: &Card, seller: &str, available: u32, cents: i64) -> TestResult<Offer> {
    let seller = Seller::new(seller, SHIPPING)?;

    Ok(Offer::new(
        card.clone(),
        seller,
        available,
        Decimal::new(cents, 2),
        "EXP",
    )?)
}

fn scenario() -> TestResult<FxHashMap<Card, Vec<Offer>>> {
    let a = Card::new("Torrential Gearhulk", ["EXP"], 2)?;
    let b = Card::new("Glimmer of Genius", ["EXP"], 1)?;
    let c = Card::new("Harnessed Lightning", ["EXP"], 1)?;

    let mut all_offers = FxHashMap::default();

    all_offers.insert(
        a.clone(),
        vec![
            offer(&a, "seller1", 1, 10)?,
            offer(&a, "seller2", 1, 12)?,
            offer(&a, "seller3", 2, 30)?,
            offer(&a, "seller4", 4, 34)?,
        ],
    );
    all_offers.insert(
        b.clone(),
        vec![offer(&b, "seller5", 1, 40)?, offer(&b, "seller6", 1, 48)?],
    );
    all_offers.insert(
        c.clone(),
        vec![
            offer(&c, "seller8", 1, 47)?,
            offer(&c, "seller6", 1, 55)?,
            offer(&c, "seller7", 1, 110)?,
        ],
    );

    Ok(all_offers)
}

#[test]
fn consolidates_shipping_onto_shared_sellers() -> TestResult {
    let candidates = bundles_by_card(&scenario()?)?;
    let finder = OrderFinder::new(candidates)?;

    let best = finder.find_lowest_offer(1);

    assert_eq!(best.sum(), Decimal::new(393, 2));

    let mut sellers: Vec<&str> = best
        .sellers()
        .into_iter()
        .map(|seller| seller.name())
        .collect();
    sellers.sort_unstable();

    assert_eq!(sellers, ["seller3", "seller6"]);

    Ok(())
}

#[test]
fn beats_the_naive_per_card_cheapest_choice() -> TestResult {
    let candidates = bundles_by_card(&scenario()?)?;

    // One cheapest bundle per card in isolation: {seller1, seller2} for A,
    // seller5 for B, seller8 for C — four distinct sellers.
    let naive: Decimal = Decimal::new(22 + 40 + 47, 2) + SHIPPING * Decimal::from(4u32);

    let finder = OrderFinder::new(candidates)?;
    let best = finder.find_lowest_offer(2);

    assert!(
        best.sum() < naive,
        "consolidated {} must beat naive {naive}",
        best.sum()
    );

    Ok(())
}

#[test]
fn two_copies_of_a_come_from_one_seller() -> TestResult {
    let candidates = bundles_by_card(&scenario()?)?;
    let finder = OrderFinder::new(candidates)?;

    let best = finder.find_lowest_offer(1);
    let a = Card::new("Torrential Gearhulk", ["EXP"], 2)?;
    let bundle = best.bundle_for(&a).expect("card A missing from the result");

    assert_eq!(bundle.len(), 1, "both copies should come from seller3");
    assert_eq!(
        bundle.distribution().iter().map(|line| line.quantity).sum::<u32>(),
        2
    );

    Ok(())
}

#[test]
fn thread_count_does_not_change_the_minimum() -> TestResult {
    let single = {
        let finder = OrderFinder::new(bundles_by_card(&scenario()?)?)?;
        finder.find_lowest_offer(1).sum()
    };

    for thread_count in [2, 3, 4, 8] {
        let finder = OrderFinder::new(bundles_by_card(&scenario()?)?)?;
        let best = finder.find_lowest_offer(thread_count);

        assert_eq!(
            best.sum(),
            single,
            "{thread_count} threads returned a different minimum"
        );
    }

    Ok(())
}
