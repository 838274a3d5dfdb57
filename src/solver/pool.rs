//! Available pool and branch-local limits.

use im::{OrdSet, Vector};

use crate::cards::{CardId, CardOrGroup, Catalog, GroupId};
use crate::rules::{ConstraintState, Limit};

/// Build the pool the solver draws from.
///
/// Precedence, lowest first: included groups, excluded groups, excluded
/// cards, included cards. Required cards are seeded into the kingdom
/// directly and never enter the pool.
#[must_use]
pub fn build_pool(catalog: &Catalog, constraints: &ConstraintState) -> OrdSet<CardId> {
    let mut pool = OrdSet::new();
    for group in constraints.included_groups() {
        for card in catalog.group(group).cards() {
            pool.insert(card);
        }
    }
    for group in constraints.excluded_groups() {
        for card in catalog.group(group).cards() {
            pool.remove(&card);
        }
    }
    for card in constraints.excluded_cards() {
        pool.remove(&card);
    }
    for card in constraints.included_cards() {
        pool.insert(card);
    }
    for card in constraints.required_cards() {
        pool.remove(&card);
    }
    pool
}

/// Limits in force on one search branch, tightest group first.
///
/// Backed by a persistent vector so each branch clones in O(1).
#[derive(Clone, Debug, Default)]
pub struct LimitSet {
    limits: Vector<Limit>,
}

impl LimitSet {
    /// Wrap limits already sorted by `ConstraintState::ordered_limits`.
    #[must_use]
    pub fn new(ordered: Vec<Limit>) -> Self {
        Self {
            limits: ordered.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Limit> {
        self.limits.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Require at least one card of `group` once `condition` is present.
    ///
    /// Raises an existing limit with the same group and condition rather
    /// than stacking a duplicate. Returns true if anything changed.
    pub fn require_one(&mut self, catalog: &Catalog, group: GroupId, condition: CardOrGroup) -> bool {
        let existing = self
            .limits
            .iter()
            .position(|limit| limit.group == group && limit.condition == Some(condition));
        if let Some(index) = existing {
            if self.limits[index].minimum >= 1 {
                return false;
            }
            let mut raised = self.limits[index];
            raised.minimum = 1;
            self.limits.set(index, raised);
            return true;
        }

        let limit = Limit::new(group).with_minimum(1).with_condition(condition);
        let key = |limit: &Limit| {
            let group = catalog.group(limit.group);
            (group.len(), group.name.clone())
        };
        let new_key = key(&limit);
        let index = self
            .limits
            .iter()
            .position(|other| key(other) > new_key)
            .unwrap_or(self.limits.len());
        self.limits.insert(index, limit);
        true
    }
}
