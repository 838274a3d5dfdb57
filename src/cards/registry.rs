//! Card catalog.
//!
//! The `Catalog` stores every card and group known to a session. It is
//! built once through `CatalogBuilder` and never mutated afterwards.

use rustc_hash::FxHashMap;

use crate::core::CatalogError;

use super::definition::{Card, CardId, CardType, Cost};
use super::group::{CardOrGroup, Group, GroupId};

/// Immutable registry of cards and groups.
///
/// ## Example
///
/// ```
/// use kingdom_shuffle::cards::{CardType, CatalogBuilder, Cost};
///
/// let mut builder = CatalogBuilder::new();
/// let village = builder.card("Village", "Base", Cost::coins(3), [CardType::Action]).unwrap();
/// builder.group("Base", [village]).unwrap();
/// let catalog = builder.build();
///
/// assert_eq!(catalog.card_by_name("Village"), Some(village));
/// assert_eq!(catalog.group_by_name("Base").map(|g| catalog.group(g).len()), Some(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<Card>,
    groups: Vec<Group>,
    card_names: FxHashMap<String, CardId>,
    group_names: FxHashMap<String, GroupId>,
}

impl Catalog {
    /// Get a card by ID.
    ///
    /// Panics if the ID was issued by a different catalog.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    #[must_use]
    pub fn get_card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Get a group by ID.
    ///
    /// Panics if the ID was issued by a different catalog.
    #[must_use]
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    #[must_use]
    pub fn get_group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    #[must_use]
    pub fn card_by_name(&self, name: &str) -> Option<CardId> {
        self.card_names.get(name).copied()
    }

    #[must_use]
    pub fn group_by_name(&self, name: &str) -> Option<GroupId> {
        self.group_names.get(name).copied()
    }

    /// Look a name up as a group first, then as a card.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<CardOrGroup> {
        self.group_by_name(name)
            .map(CardOrGroup::Group)
            .or_else(|| self.card_by_name(name).map(CardOrGroup::Card))
    }

    /// Iterate over all cards in registration order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Iterate over all groups in registration order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Groups that contain `card`.
    pub fn groups_with_card(&self, card: CardId) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(move |group| group.contains(card))
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Incremental catalog construction.
///
/// Names must be unique among cards and among groups; groups may only
/// reference cards registered before them.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card, assigning the next ID.
    pub fn add_card(&mut self, mut card: Card) -> Result<CardId, CatalogError> {
        if self.catalog.card_names.contains_key(&card.name) {
            return Err(CatalogError::DuplicateCard(card.name));
        }
        let id = CardId::new(self.catalog.cards.len() as u32);
        card.id = id;
        self.catalog.card_names.insert(card.name.clone(), id);
        self.catalog.cards.push(card);
        Ok(id)
    }

    /// Register a card from its parts.
    pub fn card(
        &mut self,
        name: &str,
        set: &str,
        cost: Cost,
        types: impl IntoIterator<Item = CardType>,
    ) -> Result<CardId, CatalogError> {
        let mut card = Card::new(CardId::new(0), name, set, cost);
        card.types.extend(types);
        self.add_card(card)
    }

    /// Register a group over already registered cards.
    pub fn group(
        &mut self,
        name: &str,
        members: impl IntoIterator<Item = CardId>,
    ) -> Result<GroupId, CatalogError> {
        if self.catalog.group_names.contains_key(name) {
            return Err(CatalogError::DuplicateGroup(name.to_string()));
        }
        let members: Vec<CardId> = members.into_iter().collect();
        if let Some(stray) = members.iter().find(|id| self.catalog.get_card(**id).is_none()) {
            return Err(CatalogError::UnknownCard {
                card: stray.to_string(),
                group: name.to_string(),
            });
        }
        let id = GroupId::new(self.catalog.groups.len() as u32);
        self.catalog.group_names.insert(name.to_string(), id);
        self.catalog.groups.push(Group::new(id, name, members));
        Ok(id)
    }

    /// Register a group whose members are given by card name.
    pub fn group_by_names<'a>(
        &mut self,
        name: &str,
        members: impl IntoIterator<Item = &'a str>,
    ) -> Result<GroupId, CatalogError> {
        let mut ids = Vec::new();
        for member in members {
            let id = self
                .catalog
                .card_by_name(member)
                .ok_or_else(|| CatalogError::UnknownCard {
                    card: member.to_string(),
                    group: name.to_string(),
                })?;
            ids.push(id);
        }
        self.group(name, ids)
    }

    #[must_use]
    pub fn build(self) -> Catalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Catalog, CardId, CardId, GroupId) {
        let mut builder = CatalogBuilder::new();
        let village = builder.card("Village", "Base", Cost::coins(3), [CardType::Action]).unwrap();
        let gold = builder
            .add_card(
                Card::new(CardId::new(99), "Gold", "Base", Cost::coins(6))
                    .with_type(CardType::Treasure)
                    .basic(),
            )
            .unwrap();
        let base = builder.group("Base", [village]).unwrap();
        (builder.build(), village, gold, base)
    }

    #[test]
    fn test_register_and_get() {
        let (catalog, village, gold, _) = sample();

        assert_eq!(catalog.card(village).name, "Village");
        assert_eq!(catalog.card(gold).id, gold);
        assert!(catalog.get_card(CardId::new(99)).is_none());
        assert_eq!(catalog.card_count(), 2);
    }

    #[test]
    fn test_ids_are_sequential() {
        let (_, village, gold, _) = sample();
        assert_eq!(village, CardId::new(0));
        assert_eq!(gold, CardId::new(1));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut builder = CatalogBuilder::new();
        builder.card("Village", "Base", Cost::coins(3), []).unwrap();
        let err = builder.card("Village", "Base", Cost::coins(3), []).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard(name) if name == "Village"));

        builder.group("Base", []).unwrap();
        assert!(matches!(builder.group("Base", []), Err(CatalogError::DuplicateGroup(_))));
    }

    #[test]
    fn test_group_with_unknown_card() {
        let mut builder = CatalogBuilder::new();
        let err = builder.group_by_names("Base", ["Nowhere"]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCard { .. }));
        assert!(builder.group("Base", [CardId::new(4)]).is_err());
    }

    #[test]
    fn test_resolve_prefers_groups() {
        let mut builder = CatalogBuilder::new();
        let card = builder.card("Shelter", "Dark Ages", Cost::coins(1), []).unwrap();
        let group = builder.group("Shelter", [card]).unwrap();
        let catalog = builder.build();

        assert_eq!(catalog.resolve("Shelter"), Some(CardOrGroup::Group(group)));
        assert_eq!(catalog.resolve("Missing"), None);
    }

    #[test]
    fn test_groups_with_card() {
        let (catalog, village, gold, base) = sample();
        let groups: Vec<_> = catalog.groups_with_card(village).map(|g| g.id).collect();
        assert_eq!(groups, vec![base]);
        assert_eq!(catalog.groups_with_card(gold).count(), 0);
    }
}
