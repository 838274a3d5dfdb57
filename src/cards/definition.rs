//! Card definitions - static card data.
//!
//! A `Card` is immutable once the catalog is built. Cards are referred to
//! everywhere else by `CardId`, an index into the owning `Catalog`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CatalogError;

/// Identifier of a card within its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Type tag printed on a card.
///
/// The tags the rules look at have their own variants; anything else is
/// kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardType {
    Action,
    Treasure,
    Victory,
    Event,
    Landmark,
    Project,
    Way,
    Ally,
    Liaison,
    Trait,
    Omen,
    Prophecy,
    Other(String),
}

impl CardType {
    /// Landscape and side-pile tags never count toward the draw quota.
    #[must_use]
    pub fn is_uncounted(&self) -> bool {
        matches!(
            self,
            Self::Event
                | Self::Landmark
                | Self::Project
                | Self::Way
                | Self::Ally
                | Self::Trait
                | Self::Prophecy
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Action => "Action",
            Self::Treasure => "Treasure",
            Self::Victory => "Victory",
            Self::Event => "Event",
            Self::Landmark => "Landmark",
            Self::Project => "Project",
            Self::Way => "Way",
            Self::Ally => "Ally",
            Self::Liaison => "Liaison",
            Self::Trait => "Trait",
            Self::Omen => "Omen",
            Self::Prophecy => "Prophecy",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for CardType {
    fn from(tag: &str) -> Self {
        match tag {
            "Action" => Self::Action,
            "Treasure" => Self::Treasure,
            "Victory" => Self::Victory,
            "Event" => Self::Event,
            "Landmark" => Self::Landmark,
            "Project" => Self::Project,
            "Way" => Self::Way,
            "Ally" => Self::Ally,
            "Liaison" => Self::Liaison,
            "Trait" => Self::Trait,
            "Omen" => Self::Omen,
            "Prophecy" => Self::Prophecy,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CardType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<CardType> for String {
    fn from(tag: CardType) -> Self {
        match tag {
            CardType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Printed cost: coins, an optional potion, and an optional debt amount.
///
/// Parsed from strings like `4`, `3P`, `8D` or `4P`. Orders by coins,
/// then potion, then debt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cost {
    pub coins: u8,
    pub potion: bool,
    pub debt: u8,
}

impl Cost {
    /// A plain coin cost.
    #[must_use]
    pub const fn coins(coins: u8) -> Self {
        Self {
            coins,
            potion: false,
            debt: 0,
        }
    }

    /// True if the cost is paid in coins alone and falls in `low..=high`.
    #[must_use]
    pub fn in_coin_tier(&self, low: u8, high: u8) -> bool {
        !self.potion && self.debt == 0 && (low..=high).contains(&self.coins)
    }
}

impl FromStr for Cost {
    type Err = CatalogError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidCost(text.to_string());
        let trimmed = text.trim().trim_start_matches('$');

        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (leading, rest) = trimmed.split_at(digits_end);

        // A bare debt cost such as "8D" puts its digits before the marker.
        if rest.eq_ignore_ascii_case("D") {
            let debt = leading.parse().map_err(|_| invalid())?;
            return Ok(Self {
                coins: 0,
                potion: false,
                debt,
            });
        }

        let coins = if leading.is_empty() {
            0
        } else {
            leading.parse().map_err(|_| invalid())?
        };

        let (potion, rest) = match rest.strip_prefix(['P', 'p']) {
            Some(after) => (true, after),
            None => (false, rest),
        };

        let debt = if rest.is_empty() {
            0
        } else {
            let amount = rest
                .strip_suffix(['D', 'd'])
                .ok_or_else(invalid)?;
            amount.parse().map_err(|_| invalid())?
        };

        if leading.is_empty() && !potion {
            return Err(invalid());
        }

        Ok(Self {
            coins,
            potion,
            debt,
        })
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coins > 0 || (!self.potion && self.debt == 0) {
            write!(f, "{}", self.coins)?;
        }
        if self.potion {
            f.write_str("P")?;
        }
        if self.debt > 0 {
            write!(f, "{}D", self.debt)?;
        }
        Ok(())
    }
}

/// Static card definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier within the catalog.
    pub id: CardId,

    /// Unique card name; the persistence key.
    pub name: String,

    /// Owning set or expansion.
    pub set: String,

    pub cost: Cost,

    /// Type tags in printed order.
    pub types: SmallVec<[CardType; 3]>,

    /// Basic and non-supply cards never count toward the draw quota.
    pub basic_or_non_supply: bool,
}

impl Card {
    /// Create a new card with no type tags.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, set: impl Into<String>, cost: Cost) -> Self {
        Self {
            id,
            name: name.into(),
            set: set.into(),
            cost,
            types: SmallVec::new(),
            basic_or_non_supply: false,
        }
    }

    /// Add a type tag (builder pattern).
    #[must_use]
    pub fn with_type(mut self, tag: impl Into<CardType>) -> Self {
        self.types.push(tag.into());
        self
    }

    /// Mark as basic or non-supply (builder pattern).
    #[must_use]
    pub fn basic(mut self) -> Self {
        self.basic_or_non_supply = true;
        self
    }

    #[must_use]
    pub fn has_type(&self, tag: &CardType) -> bool {
        self.types.contains(tag)
    }

    /// Whether this card counts toward the draw quota on its own merits.
    ///
    /// Bane and extra-pile assignments are excluded separately by the
    /// kingdom, since they depend on the selection.
    #[must_use]
    pub fn is_countable(&self) -> bool {
        !self.basic_or_non_supply && !self.types.iter().any(CardType::is_uncounted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_cost_parsing() {
        assert_eq!("4".parse::<Cost>().unwrap(), Cost::coins(4));
        assert_eq!(
            "3P".parse::<Cost>().unwrap(),
            Cost { coins: 3, potion: true, debt: 0 }
        );
        assert_eq!(
            "8D".parse::<Cost>().unwrap(),
            Cost { coins: 0, potion: false, debt: 8 }
        );
        assert_eq!(
            "4P2D".parse::<Cost>().unwrap(),
            Cost { coins: 4, potion: true, debt: 2 }
        );
        assert_eq!(
            "P".parse::<Cost>().unwrap(),
            Cost { coins: 0, potion: true, debt: 0 }
        );
        assert!("".parse::<Cost>().is_err());
        assert!("x".parse::<Cost>().is_err());
        assert!("4Q".parse::<Cost>().is_err());
    }

    #[test]
    fn test_cost_display_matches_parse() {
        for text in ["0", "4", "3P", "8D", "4P2D", "P"] {
            assert_eq!(text.parse::<Cost>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_cost_ordering() {
        let plain: Cost = "3".parse().unwrap();
        let potion: Cost = "3P".parse().unwrap();
        let four: Cost = "4".parse().unwrap();
        assert!(plain < potion);
        assert!(potion < four);
    }

    #[test]
    fn test_coin_tier() {
        assert!(Cost::coins(2).in_coin_tier(2, 3));
        assert!(!Cost::coins(4).in_coin_tier(2, 3));
        assert!(!"2P".parse::<Cost>().unwrap().in_coin_tier(2, 3));
    }

    #[test]
    fn test_card_type_serde() {
        let json = serde_json::to_string(&vec![CardType::Action, CardType::from("Knight")]).unwrap();
        assert_eq!(json, r#"["Action","Knight"]"#);
        let back: Vec<CardType> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![CardType::Action, CardType::Other("Knight".into())]);
    }

    #[test]
    fn test_countable() {
        let village = Card::new(CardId::new(0), "Village", "Base", Cost::coins(3))
            .with_type(CardType::Action);
        let event = Card::new(CardId::new(1), "Alms", "Adventures", Cost::coins(0))
            .with_type(CardType::Event);
        let copper = Card::new(CardId::new(2), "Copper", "Base", Cost::coins(0))
            .with_type(CardType::Treasure)
            .basic();
        let liaison = Card::new(CardId::new(3), "Bauble", "Allies", Cost::coins(2))
            .with_type(CardType::Treasure)
            .with_type(CardType::Liaison);

        assert!(village.is_countable());
        assert!(!event.is_countable());
        assert!(!copper.is_countable());
        assert!(liaison.is_countable());
    }
}
