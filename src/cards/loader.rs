//! Catalog loading from the JSON card data format.
//!
//! ```json
//! {
//!   "cards": [{"card": "Village", "set": "Base", "cost": "3", "type": ["Action"]}],
//!   "groups": [{"group": "Base", "cards": ["Village"]}],
//!   "non_kingdom_cards": [{"card": "Colony", "set": "Prosperity", "cost": "11", "type": ["Victory"]}]
//! }
//! ```
//!
//! Non-kingdom cards are registered after the groups and are always
//! basic/non-supply.

use serde::Deserialize;

use crate::core::CatalogError;

use super::definition::{Card, CardId, CardType, Cost};
use super::registry::{Catalog, CatalogBuilder};

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    cards: Vec<CardRecord>,
    #[serde(default)]
    groups: Vec<GroupRecord>,
    #[serde(default)]
    non_kingdom_cards: Vec<CardRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord {
    card: String,
    #[serde(default)]
    set: String,
    cost: String,
    #[serde(rename = "type", default)]
    types: Vec<CardType>,
    #[serde(default)]
    basic: bool,
    #[serde(default)]
    non_supply: bool,
}

#[derive(Debug, Deserialize)]
struct GroupRecord {
    group: String,
    #[serde(default)]
    cards: Vec<String>,
}

impl CardRecord {
    fn into_card(self, force_basic: bool) -> Result<Card, CatalogError> {
        let cost: Cost = self.cost.parse()?;
        let mut card = Card::new(CardId::new(0), self.card, self.set, cost);
        card.types.extend(self.types);
        card.basic_or_non_supply = force_basic || self.basic || self.non_supply;
        Ok(card)
    }
}

impl Catalog {
    /// Build a catalog from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        let mut builder = CatalogBuilder::new();

        for record in document.cards {
            builder.add_card(record.into_card(false)?)?;
        }
        for record in document.groups {
            builder.group_by_names(&record.group, record.cards.iter().map(String::as_str))?;
        }
        for record in document.non_kingdom_cards {
            builder.add_card(record.into_card(true)?)?;
        }

        let catalog = builder.build();
        tracing::debug!(
            cards = catalog.card_count(),
            groups = catalog.group_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
