//! Presentation orderings for card lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::definition::Card;

/// Sort key sequence for displaying cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardOrder {
    #[default]
    CostSetName,
    SetCostName,
    CostName,
    SetName,
    Name,
}

impl CardOrder {
    #[must_use]
    pub fn compare(self, a: &Card, b: &Card) -> Ordering {
        let by_cost = || a.cost.cmp(&b.cost);
        let by_set = || a.set.cmp(&b.set);
        let by_name = || a.name.cmp(&b.name);

        match self {
            Self::CostSetName => by_cost().then_with(by_set).then_with(by_name),
            Self::SetCostName => by_set().then_with(by_cost).then_with(by_name),
            Self::CostName => by_cost().then_with(by_name),
            Self::SetName => by_set().then_with(by_name),
            Self::Name => by_name(),
        }
    }
}
