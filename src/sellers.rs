//! Sellers

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when constructing a [`Seller`].
#[derive(Debug, Error)]
pub enum SellerError {
    /// Shipping fees are flat but never negative.
    #[error("seller '{name}' has a negative shipping fee: {shipping}")]
    NegativeShipping {
        /// Seller name
        name: String,

        /// The offending fee
        shipping: Decimal,
    },
}

/// A marketplace seller.
///
/// A seller charges their flat `shipping` fee exactly once per final order,
/// no matter how many different cards are bought from them. Identity is the
/// full `(name, shipping)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seller {
    name: String,
    shipping: Decimal,
}

impl Seller {
    /// Create a new seller with the given flat shipping fee.
    ///
    /// # Errors
    ///
    /// Returns [`SellerError::NegativeShipping`] if the fee is negative.
    pub fn new(name: impl Into<String>, shipping: Decimal) -> Result<Self, SellerError> {
        let name = name.into();

        if shipping < Decimal::ZERO {
            return Err(SellerError::NegativeShipping { name, shipping });
        }

        Ok(Self { name, shipping })
    }

    /// The seller's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The seller's flat per-order shipping fee.
    #[must_use]
    pub fn shipping(&self) -> Decimal {
        self.shipping
    }
}

impl fmt::Display for Seller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.shipping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_shipping() {
        let result = Seller::new("alice", Decimal::new(-115, 2));

        assert!(matches!(
            result,
            Err(SellerError::NegativeShipping { .. })
        ));
    }

    #[test]
    fn identity_is_name_and_shipping() {
        let a = Seller::new("alice", Decimal::new(115, 2)).expect("valid seller");
        let b = Seller::new("alice", Decimal::new(115, 2)).expect("valid seller");
        let c = Seller::new("alice", Decimal::new(95, 2)).expect("valid seller");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn displays_name_and_fee() {
        let seller = Seller::new("alice", Decimal::new(115, 2)).expect("valid seller");

        assert_eq!(seller.to_string(), "alice (1.15)");
    }
}
