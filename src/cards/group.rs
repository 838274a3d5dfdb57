//! Named card groups and the card-or-group reference type.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use super::registry::Catalog;

/// Identifier of a group within its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Create a new group ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// A named, fixed set of cards: an expansion, a cost tier, a card type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    members: BTreeSet<CardId>,
}

impl Group {
    #[must_use]
    pub fn new(id: GroupId, name: impl Into<String>, members: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            id,
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.members.contains(&card)
    }

    /// Members in id order.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.members.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// How many of `cards` belong to this group.
    #[must_use]
    pub fn count_in(&self, cards: &[CardId]) -> usize {
        cards.iter().filter(|card| self.contains(**card)).count()
    }
}

/// Either a single card or a whole group.
///
/// Used as a limit condition and as the element of include/exclude lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardOrGroup {
    Card(CardId),
    Group(GroupId),
}

impl CardOrGroup {
    /// The cards this reference stands for.
    #[must_use]
    pub fn contained_cards(&self, catalog: &Catalog) -> Vec<CardId> {
        match *self {
            Self::Card(card) => vec![card],
            Self::Group(group) => catalog.group(group).cards().collect(),
        }
    }

    /// Whether `card` is, or belongs to, this reference.
    #[must_use]
    pub fn contains(&self, catalog: &Catalog, card: CardId) -> bool {
        match *self {
            Self::Card(own) => own == card,
            Self::Group(group) => catalog.group(group).contains(card),
        }
    }

    /// Whether any of `cards` is, or belongs to, this reference.
    #[must_use]
    pub fn present_in(&self, catalog: &Catalog, cards: &[CardId]) -> bool {
        cards.iter().any(|card| self.contains(catalog, *card))
    }

    /// Catalog name of the card or group.
    #[must_use]
    pub fn name<'a>(&self, catalog: &'a Catalog) -> &'a str {
        match *self {
            Self::Card(card) => &catalog.card(card).name,
            Self::Group(group) => &catalog.group(group).name,
        }
    }
}

impl From<CardId> for CardOrGroup {
    fn from(card: CardId) -> Self {
        Self::Card(card)
    }
}

impl From<GroupId> for CardOrGroup {
    fn from(group: GroupId) -> Self {
        Self::Group(group)
    }
}
