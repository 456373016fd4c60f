//! Cards
//!
//! A [`Card`] is one entry of the shopping list: a card name, the set of
//! expansions the buyer will accept it from, and the quantity wanted.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised when constructing or parsing a [`Card`].
#[derive(Debug, Error)]
pub enum CardError {
    /// The identifier did not match `[<n>x ]<expansion>[|<expansion>...] / <name>`.
    #[error("malformed card identifier '{0}' (expected '[<n>x ]<expansion>[|<expansion>...] / <name>')")]
    MalformedIdentifier(String),

    /// Every card must be wanted at least once.
    #[error("card '{0}' must be wanted in a quantity of at least one")]
    ZeroAmount(String),

    /// A card needs at least one acceptable expansion.
    #[error("card '{0}' has no acceptable expansions")]
    NoExpansions(String),
}

/// A wanted card.
///
/// Equality and hashing cover the name and the canonicalized expansion set
/// only; the wanted `amount` is a per-list quantity, not part of the card's
/// identity.
#[derive(Debug, Clone)]
pub struct Card {
    name: String,
    expansions: SmallVec<[String; 2]>,
    amount: u32,
}

impl Card {
    /// Create a new card. The expansion set is canonicalized (sorted and
    /// de-duplicated) so that display, equality and hashing are stable.
    ///
    /// # Errors
    ///
    /// Returns a [`CardError`] if the name is empty, no expansion is given,
    /// or the amount is zero.
    pub fn new(
        name: impl Into<String>,
        expansions: impl IntoIterator<Item = impl Into<String>>,
        amount: u32,
    ) -> Result<Self, CardError> {
        let name = name.into();

        if name.is_empty() {
            return Err(CardError::MalformedIdentifier(name));
        }

        let mut expansions: SmallVec<[String; 2]> = expansions
            .into_iter()
            .map(Into::into)
            .filter(|expansion| !expansion.is_empty())
            .collect();

        expansions.sort();
        expansions.dedup();

        if expansions.is_empty() {
            return Err(CardError::NoExpansions(name));
        }

        if amount == 0 {
            return Err(CardError::ZeroAmount(name));
        }

        Ok(Self {
            name,
            expansions,
            amount,
        })
    }

    /// Parse a decklist identifier.
    ///
    /// Accepted syntax is `[<n>x ]<expansion>[|<expansion>...] / <name>`,
    /// e.g. `2x KLD|AER / Torrential Gearhulk`. Only the first `/` splits
    /// the expansion list from the name, so names containing slashes keep
    /// them.
    ///
    /// # Errors
    ///
    /// Returns a [`CardError`] for malformed identifiers.
    pub fn parse(identifier: &str) -> Result<Self, CardError> {
        let trimmed = identifier.trim();

        let (amount, rest) = match trimmed.split_once(' ') {
            Some((prefix, rest)) if is_count_prefix(prefix) => {
                let digits = &prefix[..prefix.len() - 1];
                let amount = digits
                    .parse()
                    .map_err(|_| CardError::MalformedIdentifier(trimmed.to_string()))?;
                (amount, rest)
            }
            _ => (1, trimmed),
        };

        let Some((expansions, name)) = rest.split_once('/') else {
            return Err(CardError::MalformedIdentifier(trimmed.to_string()));
        };

        Self::new(
            name.trim(),
            expansions.split('|').map(str::trim),
            amount,
        )
    }

    /// The card's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The acceptable expansions, sorted and de-duplicated.
    #[must_use]
    pub fn expansions(&self) -> &[String] {
        &self.expansions
    }

    /// How many copies of the card are wanted.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Whether the given expansion is acceptable for this card.
    #[must_use]
    pub fn accepts(&self, expansion: &str) -> bool {
        self.expansions.iter().any(|e| e == expansion)
    }
}

fn is_count_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.ends_with('x')
        && prefix[..prefix.len() - 1].chars().all(|c| c.is_ascii_digit())
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.expansions == other.expansions
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.expansions.hash(state);
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.expansions.cmp(&other.expansions))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount > 1 {
            write!(f, "{}x ", self.amount)?;
        }

        write!(f, "{} / {}", self.expansions.join("|"), self.name)
    }
}
