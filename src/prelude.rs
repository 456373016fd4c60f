//! Cardhaul prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bundles::{DrawnOffer, OfferSet, OfferSetError, generator::minimal_bundles},
    cards::{Card, CardError},
    collections::OfferCollection,
    decklist::{Decklist, DecklistError},
    filters::FilterOptions,
    offers::{Offer, OfferError},
    progress::SearchProgress,
    search::{OrderFinder, SearchError},
    sellers::{Seller, SellerError},
    settings::{SearchSettings, SettingsError},
    source::{JsonOfferSource, OfferSource, OfferSourceError},
};
