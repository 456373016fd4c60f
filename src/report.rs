//! Order report
//!
//! Turns the winning [`OfferCollection`] into the buyer-facing view:
//! purchases grouped by seller, one shipping line per seller, a per-seller
//! subtotal and the grand total.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::collections::OfferCollection;
use crate::sellers::Seller;

/// Per-seller subtotals: the sum of that seller's line totals across all
/// bundles plus their shipping fee, sellers sorted by name.
#[must_use]
pub fn seller_subtotals(collection: &OfferCollection) -> Vec<(Seller, Decimal)> {
    let mut sellers: Vec<Seller> = collection.sellers().into_iter().cloned().collect();

    sellers.sort();

    sellers
        .into_iter()
        .map(|seller| {
            let lines: Decimal = collection
                .bundles()
                .iter()
                .flat_map(|bundle| bundle.distribution())
                .filter(|line| line.offer.seller() == &seller)
                .map(|line| line.line_total())
                .sum();
            let subtotal = lines + seller.shipping();

            (seller, subtotal)
        })
        .collect()
}

/// Write the seller-grouped order table and the grand total.
///
/// # Errors
///
/// Returns an [`io::Error`] if writing to `out` fails.
pub fn write_to(out: &mut impl io::Write, collection: &OfferCollection) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Seller", "Card", "Expansion", "Qty", "Unit", "Total"]);

    for (seller, subtotal) in seller_subtotals(collection) {
        let mut label = seller.name();

        for bundle in collection.bundles() {
            for line in bundle.distribution() {
                if line.offer.seller() != &seller {
                    continue;
                }

                builder.push_record([
                    label.to_string(),
                    line.offer.card().name().to_string(),
                    line.offer.expansion().to_string(),
                    line.quantity.to_string(),
                    line.offer.price().to_string(),
                    line.line_total().to_string(),
                ]);
                label = "";
            }
        }

        builder.push_record([
            label.to_string(),
            "shipping".to_string(),
            String::new(),
            String::new(),
            String::new(),
            seller.shipping().to_string(),
        ]);
        builder.push_record([
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "subtotal".to_string(),
            subtotal.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::sharp());
    table.modify(Columns::new(3..), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "\nTotal: {}", collection.sum())
}
