//! Constraint state in primitive, name-based form.
//!
//! The snapshot stores names rather than IDs so that saved state survives
//! catalog reloads. Names the catalog no longer knows are skipped.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::{CardId, Catalog, GroupId};
use crate::core::PersistError;

use super::constraints::ConstraintState;
use super::limit::Limit;

/// Values at or above this are treated as an unbounded maximum.
const UNBOUNDED_MAXIMUM: usize = i32::MAX as usize;

/// One persisted limit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    pub group: String,
    #[serde(default)]
    pub min: usize,
    /// Absent or 0 means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Persisted form of a `ConstraintState`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstraintSnapshot {
    pub included_cards: Vec<String>,
    pub excluded_cards: Vec<String>,
    pub required_cards: Vec<String>,
    pub included_groups: Vec<String>,
    pub excluded_groups: Vec<String>,
    pub rules: Vec<RuleSnapshot>,
}

fn card_names(catalog: &Catalog, cards: impl Iterator<Item = CardId>) -> Vec<String> {
    cards.map(|card| catalog.card(card).name.clone()).collect()
}

fn group_names(catalog: &Catalog, groups: impl Iterator<Item = GroupId>) -> Vec<String> {
    groups.map(|group| catalog.group(group).name.clone()).collect()
}

fn resolve_cards<'a>(catalog: &'a Catalog, names: &'a [String]) -> impl Iterator<Item = CardId> + 'a {
    names.iter().filter_map(move |name| {
        let card = catalog.card_by_name(name);
        if card.is_none() {
            warn!(card = %name, "skipping unknown card in saved constraints");
        }
        card
    })
}

fn resolve_groups<'a>(catalog: &'a Catalog, names: &'a [String]) -> impl Iterator<Item = GroupId> + 'a {
    names.iter().filter_map(move |name| {
        let group = catalog.group_by_name(name);
        if group.is_none() {
            warn!(group = %name, "skipping unknown group in saved constraints");
        }
        group
    })
}

impl ConstraintState {
    /// Capture this state by name.
    #[must_use]
    pub fn to_snapshot(&self, catalog: &Catalog) -> ConstraintSnapshot {
        let rules = self
            .limits()
            .map(|limit| RuleSnapshot {
                group: catalog.group(limit.group).name.clone(),
                min: limit.minimum,
                max: limit.maximum,
                condition: limit.condition.map(|c| c.name(catalog).to_string()),
            })
            .collect();

        ConstraintSnapshot {
            included_cards: card_names(catalog, self.included_cards()),
            excluded_cards: card_names(catalog, self.excluded_cards()),
            required_cards: card_names(catalog, self.required_cards()),
            included_groups: group_names(catalog, self.included_groups()),
            excluded_groups: group_names(catalog, self.excluded_groups()),
            rules,
        }
    }

    /// Rebuild a state from a snapshot, resolving names against `catalog`.
    #[must_use]
    pub fn from_snapshot(snapshot: &ConstraintSnapshot, catalog: &Catalog) -> Self {
        let mut state = Self::new();

        for card in resolve_cards(catalog, &snapshot.included_cards) {
            state.add_included_card(card);
        }
        for card in resolve_cards(catalog, &snapshot.excluded_cards) {
            state.add_excluded_card(card);
        }
        for card in resolve_cards(catalog, &snapshot.required_cards) {
            state.add_required_card(card);
        }
        for group in resolve_groups(catalog, &snapshot.included_groups) {
            state.add_included_group(group);
        }
        for group in resolve_groups(catalog, &snapshot.excluded_groups) {
            state.add_excluded_group(group);
        }

        for rule in &snapshot.rules {
            let Some(group) = catalog.group_by_name(&rule.group) else {
                warn!(group = %rule.group, "skipping rule for unknown group");
                continue;
            };
            let mut limit = Limit::new(group);
            limit.minimum = rule.min;
            limit.maximum = rule.max.filter(|max| *max > 0 && *max < UNBOUNDED_MAXIMUM);
            if let Some(name) = &rule.condition {
                limit.condition = catalog.resolve(name);
                if limit.condition.is_none() {
                    warn!(condition = %name, "dropping unknown rule condition");
                }
            }
            state.set_limit(limit);
        }

        state
    }

    pub fn to_json(&self, catalog: &Catalog) -> Result<String, PersistError> {
        Ok(serde_json::to_string(&self.to_snapshot(catalog))?)
    }

    pub fn from_json(json: &str, catalog: &Catalog) -> Result<Self, PersistError> {
        let snapshot: ConstraintSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(&snapshot, catalog))
    }
}
