//! Decklist files
//!
//! A decklist is a plain text file with one card identifier per line, in
//! the syntax accepted by [`Card::parse`]. Blank lines are skipped.
//! Malformed and duplicate lines are never fatal: they are counted,
//! logged, and reported back so the caller can decide whether to proceed.

use std::fs;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use crate::cards::Card;

/// Errors raised when loading a decklist file.
#[derive(Debug, Error)]
pub enum DecklistError {
    /// The decklist file could not be read.
    #[error("failed to read decklist: {0}")]
    Io(#[from] std::io::Error),
}

/// The parsed shopping list together with the per-line warning counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decklist {
    /// The parsed cards in file order, duplicates skipped.
    pub cards: Vec<Card>,

    /// How many lines failed to parse.
    pub malformed_lines: usize,

    /// How many lines repeated an earlier card.
    pub duplicate_lines: usize,
}

impl Decklist {
    /// Read and parse a decklist file.
    ///
    /// # Errors
    ///
    /// Returns [`DecklistError::Io`] if the file cannot be read. Parse
    /// problems are counted, not raised.
    pub fn from_path(path: &Path) -> Result<Self, DecklistError> {
        let decklist = Self::parse(&fs::read_to_string(path)?);

        info!(
            "read {} cards from {} ({} malformed, {} duplicate lines)",
            decklist.cards.len(),
            path.display(),
            decklist.malformed_lines,
            decklist.duplicate_lines
        );

        Ok(decklist)
    }

    /// Parse decklist text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut decklist = Self::default();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            match Card::parse(line) {
                Ok(card) if decklist.cards.contains(&card) => {
                    warn!("duplicate card in line {}: '{card}'", index + 1);
                    decklist.duplicate_lines += 1;
                }
                Ok(card) => decklist.cards.push(card),
                Err(err) => {
                    warn!("illegal card identifier in line {}: {err}", index + 1);
                    decklist.malformed_lines += 1;
                }
            }
        }

        decklist
    }

    /// Whether any lines were skipped.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.malformed_lines > 0 || self.duplicate_lines > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cards_in_file_order() {
        let decklist = Decklist::parse("KLD / Torrential Gearhulk\n\n2x M20 / Shock\n");

        assert_eq!(decklist.cards.len(), 2);
        assert_eq!(
            decklist.cards.first().map(Card::name),
            Some("Torrential Gearhulk")
        );
        assert!(!decklist.has_warnings());
    }

    #[test]
    fn counts_malformed_lines() {
        let decklist = Decklist::parse("not an identifier\nM20 / Shock\n???\n");

        assert_eq!(decklist.cards.len(), 1);
        assert_eq!(decklist.malformed_lines, 2);
        assert!(decklist.has_warnings());
    }

    #[test]
    fn counts_duplicates_without_keeping_them() {
        let decklist = Decklist::parse("M20 / Shock\nM20 / Shock\n4x M20 / Shock\n");

        // The third line repeats the same card identity (amount is not
        // part of it), so only the first survives.
        assert_eq!(decklist.cards.len(), 1);
        assert_eq!(decklist.duplicate_lines, 2);
    }

    #[test]
    fn blank_lines_are_not_warnings() {
        let decklist = Decklist::parse("\n\n   \nM20 / Shock\n");

        assert_eq!(decklist.cards.len(), 1);
        assert!(!decklist.has_warnings());
    }
}
