//! The generated kingdom.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardOrder, Catalog};

/// Chosen cards plus the named setup slots.
///
/// Produced once per successful generate call and not touched afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kingdom {
    /// Cards in the order they were chosen; required cards come first.
    pub cards: Vec<CardId>,

    /// Extra kingdom pile demanded by the young witch.
    pub bane: Option<CardId>,

    /// Extra supply pile demanded by the ferryman.
    pub extra_pile: Option<CardId>,

    /// Prophecy drawn because an omen card is present.
    pub prophecy: Option<CardId>,

    /// Action card targeted by the obelisk landmark.
    pub landmark_target: Option<CardId>,

    /// One target per trait card, in trait order.
    pub trait_targets: Vec<CardId>,
}

impl Kingdom {
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Append a card unless it is already present.
    pub fn add(&mut self, card: CardId) {
        if !self.contains(card) {
            self.cards.push(card);
        }
    }

    /// Whether `card` counts toward the draw quota in this kingdom.
    #[must_use]
    pub fn counts(&self, catalog: &Catalog, card: CardId) -> bool {
        catalog.card(card).is_countable()
            && self.bane != Some(card)
            && self.extra_pile != Some(card)
    }

    /// Cards that count toward the draw quota.
    #[must_use]
    pub fn countable(&self, catalog: &Catalog) -> usize {
        self.cards
            .iter()
            .filter(|card| self.counts(catalog, **card))
            .count()
    }

    /// Cards in this kingdom matching `predicate`, in kingdom order.
    pub fn cards_where<'a, F>(&'a self, catalog: &'a Catalog, predicate: F) -> impl Iterator<Item = CardId> + 'a
    where
        F: Fn(&Card) -> bool + 'a,
    {
        self.cards
            .iter()
            .copied()
            .filter(move |card| predicate(catalog.card(*card)))
    }

    #[must_use]
    pub fn names<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        self.cards
            .iter()
            .map(|card| catalog.card(*card).name.as_str())
            .collect()
    }

    /// Cards sorted for display.
    #[must_use]
    pub fn sorted<'a>(&self, catalog: &'a Catalog, order: CardOrder) -> Vec<&'a Card> {
        let mut cards: Vec<&Card> = self.cards.iter().map(|card| catalog.card(*card)).collect();
        cards.sort_by(|a, b| order.compare(a, b));
        cards
    }
}
