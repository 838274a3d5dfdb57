//! Per-group cardinality limits.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardOrGroup, Catalog, GroupId};

/// Bounds on how many cards of one group a kingdom may hold.
///
/// The maximum always applies. The minimum applies only while the
/// condition (if any) is present in the selection: a card condition
/// needs that card, a group condition needs any of its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub group: GroupId,
    pub minimum: usize,
    /// `None` is unbounded.
    pub maximum: Option<usize>,
    pub condition: Option<CardOrGroup>,
}

impl Limit {
    /// A limit that constrains nothing yet.
    #[must_use]
    pub fn new(group: GroupId) -> Self {
        Self {
            group,
            minimum: 0,
            maximum: None,
            condition: None,
        }
    }

    #[must_use]
    pub fn with_minimum(mut self, minimum: usize) -> Self {
        self.minimum = minimum;
        self
    }

    #[must_use]
    pub fn with_maximum(mut self, maximum: usize) -> Self {
        self.maximum = Some(maximum);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<CardOrGroup>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// No minimum, no maximum, no condition.
    #[must_use]
    pub fn is_useless(&self) -> bool {
        self.minimum == 0 && self.maximum.is_none() && self.condition.is_none()
    }

    /// Cards of `cards` that belong to the limited group.
    #[must_use]
    pub fn count(&self, catalog: &Catalog, cards: &[CardId]) -> usize {
        catalog.group(self.group).count_in(cards)
    }

    /// Whether the minimum applies to this selection.
    #[must_use]
    pub fn is_active(&self, catalog: &Catalog, cards: &[CardId]) -> bool {
        match self.condition {
            None => true,
            Some(condition) => condition.present_in(catalog, cards),
        }
    }

    #[must_use]
    pub fn minimum_satisfied(&self, catalog: &Catalog, cards: &[CardId]) -> bool {
        !self.is_active(catalog, cards) || self.count(catalog, cards) >= self.minimum
    }

    #[must_use]
    pub fn maximum_satisfied(&self, catalog: &Catalog, cards: &[CardId]) -> bool {
        match self.maximum {
            None => true,
            Some(maximum) => self.count(catalog, cards) <= maximum,
        }
    }

    #[must_use]
    pub fn is_satisfied(&self, catalog: &Catalog, cards: &[CardId]) -> bool {
        self.minimum_satisfied(catalog, cards) && self.maximum_satisfied(catalog, cards)
    }
}
