use std::collections::BTreeSet;

use crate::{codec::has_reserved_delimiter, error::RegistryError};

/// Kingdom cards of the Dominion 2nd edition base set. Seeded on first run.
pub const STARTER_CARDS: &[&str] = &[
    "Artisan",
    "Bandit",
    "Bureaucrat",
    "Cellar",
    "Chapel",
    "Council Room",
    "Festival",
    "Gardens",
    "Harbinger",
    "Laboratory",
    "Library",
    "Market",
    "Merchant",
    "Militia",
    "Mine",
    "Moat",
    "Moneylender",
    "Poacher",
    "Remodel",
    "Sentry",
    "Smithy",
    "Throne Room",
    "Vassal",
    "Village",
    "Witch",
    "Workshop",
];

/// The set of kingdom card names a submission is validated against.
///
/// Matching is exact and case-sensitive; names are stored as given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardRegistry {
    names: BTreeSet<String>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Adds a card, leaving the registry untouched on error.
    pub fn add(&mut self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if has_reserved_delimiter(name) {
            return Err(RegistryError::ReservedDelimiter(name.to_string()));
        }
        // Submitted card tokens are trimmed, so a padded name could never match.
        if name.trim() != name {
            return Err(RegistryError::PaddedName(name.to_string()));
        }
        if self.names.contains(name) {
            return Err(RegistryError::DuplicateCard(name.to_string()));
        }
        self.names.insert(name.to_string());
        Ok(())
    }

    /// Fills an empty registry with [`STARTER_CARDS`] and returns the names
    /// that were added. A registry that already has cards is left alone.
    pub fn seed_if_empty(&mut self) -> Vec<String> {
        if !self.names.is_empty() {
            return Vec::new();
        }
        log::info!(
            "Seeding card registry with {} starter cards",
            STARTER_CARDS.len()
        );
        let added: Vec<String> = STARTER_CARDS.iter().map(|name| name.to_string()).collect();
        self.names.extend(added.iter().cloned());
        added
    }
}

impl<S: Into<String>> FromIterator<S> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
