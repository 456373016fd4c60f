//! Cardhaul
//!
//! Cardhaul finds the cheapest way to buy a fixed list of trading cards
//! when every card can be sourced in partial quantities from several
//! independent sellers and each seller charges one flat shipping fee per
//! order. Because buying several cards from the same seller pays that fee
//! only once, the per-card decisions are coupled: the engine enumerates
//! every minimal covering bundle of offers per card and exhaustively
//! searches the cross product of bundle choices, in parallel, for the
//! global minimum.

pub mod bundles;
pub mod cards;
pub mod collections;
pub mod decklist;
pub mod filters;
pub mod offers;
pub mod prelude;
pub mod progress;
pub mod report;
pub mod search;
pub mod sellers;
pub mod settings;
pub mod source;
