//! User-editable selection rules.
//!
//! `ConstraintState` is mutated through simple setters by whatever drives
//! the session, and read by the solver once per generate call.

use std::collections::{BTreeMap, BTreeSet};

use crate::cards::{CardId, CardOrGroup, Catalog, GroupId};

use super::limit::Limit;

/// Include/exclude/require sets plus per-group limits.
///
/// A card or group is never both included and excluded: adding to one
/// side removes it from the other. Likewise a card is never both required
/// and excluded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintState {
    included_groups: BTreeSet<GroupId>,
    excluded_groups: BTreeSet<GroupId>,
    included_cards: BTreeSet<CardId>,
    excluded_cards: BTreeSet<CardId>,
    required_cards: BTreeSet<CardId>,
    limits: BTreeMap<GroupId, Limit>,
}

impl ConstraintState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every choice and limit.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // === Groups ===

    pub fn add_included_group(&mut self, group: GroupId) {
        self.excluded_groups.remove(&group);
        self.included_groups.insert(group);
    }

    pub fn remove_included_group(&mut self, group: GroupId) {
        self.included_groups.remove(&group);
    }

    #[must_use]
    pub fn has_included_group(&self, group: GroupId) -> bool {
        self.included_groups.contains(&group)
    }

    pub fn add_excluded_group(&mut self, group: GroupId) {
        self.included_groups.remove(&group);
        self.excluded_groups.insert(group);
    }

    pub fn remove_excluded_group(&mut self, group: GroupId) {
        self.excluded_groups.remove(&group);
    }

    #[must_use]
    pub fn has_excluded_group(&self, group: GroupId) -> bool {
        self.excluded_groups.contains(&group)
    }

    // === Cards ===

    pub fn add_included_card(&mut self, card: CardId) {
        self.excluded_cards.remove(&card);
        self.included_cards.insert(card);
    }

    pub fn remove_included_card(&mut self, card: CardId) {
        self.included_cards.remove(&card);
    }

    #[must_use]
    pub fn has_included_card(&self, card: CardId) -> bool {
        self.included_cards.contains(&card)
    }

    pub fn add_excluded_card(&mut self, card: CardId) {
        self.included_cards.remove(&card);
        self.required_cards.remove(&card);
        self.excluded_cards.insert(card);
    }

    pub fn remove_excluded_card(&mut self, card: CardId) {
        self.excluded_cards.remove(&card);
    }

    #[must_use]
    pub fn has_excluded_card(&self, card: CardId) -> bool {
        self.excluded_cards.contains(&card)
    }

    pub fn add_required_card(&mut self, card: CardId) {
        self.excluded_cards.remove(&card);
        self.required_cards.insert(card);
    }

    pub fn remove_required_card(&mut self, card: CardId) {
        self.required_cards.remove(&card);
    }

    #[must_use]
    pub fn has_required_card(&self, card: CardId) -> bool {
        self.required_cards.contains(&card)
    }

    pub fn add_excluded_cards(&mut self, cards: impl IntoIterator<Item = CardId>) {
        for card in cards {
            self.add_excluded_card(card);
        }
    }

    pub fn remove_excluded_cards(&mut self, cards: impl IntoIterator<Item = CardId>) {
        for card in cards {
            self.remove_excluded_card(card);
        }
    }

    pub fn add_required_cards(&mut self, cards: impl IntoIterator<Item = CardId>) {
        for card in cards {
            self.add_required_card(card);
        }
    }

    pub fn remove_required_cards(&mut self, cards: impl IntoIterator<Item = CardId>) {
        for card in cards {
            self.remove_required_card(card);
        }
    }

    pub fn included_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.included_groups.iter().copied()
    }

    pub fn excluded_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.excluded_groups.iter().copied()
    }

    pub fn included_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.included_cards.iter().copied()
    }

    pub fn excluded_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.excluded_cards.iter().copied()
    }

    pub fn required_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.required_cards.iter().copied()
    }

    // === Tri-state cycles ===

    /// neutral -> included -> excluded -> neutral.
    pub fn cycle_include_exclude(&mut self, item: CardOrGroup) {
        match item {
            CardOrGroup::Card(card) => {
                if self.has_included_card(card) {
                    self.add_excluded_card(card);
                } else if self.has_excluded_card(card) {
                    self.remove_excluded_card(card);
                } else {
                    self.add_included_card(card);
                }
            }
            CardOrGroup::Group(group) => {
                if self.has_included_group(group) {
                    self.add_excluded_group(group);
                } else if self.has_excluded_group(group) {
                    self.remove_excluded_group(group);
                } else {
                    self.add_included_group(group);
                }
            }
        }
    }

    /// neutral -> excluded -> required -> neutral.
    pub fn cycle_require_exclude(&mut self, card: CardId) {
        if self.has_required_card(card) {
            self.remove_required_card(card);
            self.remove_excluded_card(card);
        } else if self.has_excluded_card(card) {
            self.add_required_card(card);
        } else {
            self.add_excluded_card(card);
        }
    }

    // === Limits ===

    #[must_use]
    pub fn limit(&self, group: GroupId) -> Option<&Limit> {
        self.limits.get(&group)
    }

    #[must_use]
    pub fn has_limit(&self, group: GroupId) -> bool {
        self.limits.contains_key(&group)
    }

    pub fn remove_limit(&mut self, group: GroupId) {
        self.limits.remove(&group);
    }

    /// Store a whole limit, dropping it if it constrains nothing.
    pub fn set_limit(&mut self, limit: Limit) {
        self.limits.insert(limit.group, limit);
        self.remove_limit_if_useless(limit.group);
    }

    pub fn limits(&self) -> impl Iterator<Item = &Limit> {
        self.limits.values()
    }

    /// 0 when no limit exists.
    #[must_use]
    pub fn get_limit_minimum(&self, group: GroupId) -> usize {
        self.limit(group).map_or(0, |limit| limit.minimum)
    }

    /// 0 when no limit exists or the maximum is unbounded.
    #[must_use]
    pub fn get_limit_maximum(&self, group: GroupId) -> usize {
        self.limit(group)
            .and_then(|limit| limit.maximum)
            .unwrap_or(0)
    }

    #[must_use]
    pub fn get_condition(&self, group: GroupId) -> Option<CardOrGroup> {
        self.limit(group).and_then(|limit| limit.condition)
    }

    pub fn set_limit_minimum(&mut self, group: GroupId, minimum: usize) {
        if minimum == 0 && !self.has_limit(group) {
            return;
        }
        self.limit_entry(group).minimum = minimum;
        self.remove_limit_if_useless(group);
    }

    /// A maximum of 0 means unbounded.
    pub fn set_limit_maximum(&mut self, group: GroupId, maximum: usize) {
        if maximum == 0 && !self.has_limit(group) {
            return;
        }
        self.limit_entry(group).maximum = (maximum > 0).then_some(maximum);
        self.remove_limit_if_useless(group);
    }

    /// `None` clears the condition.
    pub fn set_condition(&mut self, group: GroupId, condition: Option<CardOrGroup>) {
        if condition.is_none() && !self.has_limit(group) {
            return;
        }
        self.limit_entry(group).condition = condition;
        self.remove_limit_if_useless(group);
    }

    pub fn remove_limit_if_useless(&mut self, group: GroupId) {
        if self.limit(group).is_some_and(Limit::is_useless) {
            self.limits.remove(&group);
        }
    }

    fn limit_entry(&mut self, group: GroupId) -> &mut Limit {
        self.limits.entry(group).or_insert_with(|| Limit::new(group))
    }

    /// Limits ordered tightest first: ascending group size, then group name.
    #[must_use]
    pub fn ordered_limits(&self, catalog: &Catalog) -> Vec<Limit> {
        let mut ordered: Vec<Limit> = self.limits.values().copied().collect();
        ordered.sort_by(|a, b| {
            let (ga, gb) = (catalog.group(a.group), catalog.group(b.group));
            ga.len().cmp(&gb.len()).then_with(|| ga.name.cmp(&gb.name))
        });
        ordered
    }
}
