//! Shuffle configuration.
//!
//! `ShuffleConfig` carries the draw quota, an optional fixed seed, and the
//! names of the cards and groups that carry special setup rules. The
//! engine never hardcodes card names outside `Designations::default`.

use serde::{Deserialize, Serialize};

/// Default number of kingdom cards to draw.
pub const DEFAULT_CARDS_TO_DRAW: usize = 10;

/// Names of the cards and groups that drive the auxiliary rules.
///
/// A designation that the catalog does not contain disables its rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Designations {
    /// Card that demands a bane pile.
    pub young_witch: String,
    /// Card that demands an extra supply pile.
    pub ferryman: String,
    /// Upper tier currency card.
    pub colony: String,
    /// Companion of `colony`.
    pub platinum: String,
    /// Alternate basic pile.
    pub shelter: String,
    /// Landmark that targets an action card.
    pub obelisk: String,
    /// Group whose share of the draw gates colony/platinum.
    pub prosperity_group: String,
    /// Group whose share of the draw gates shelters.
    pub dark_ages_group: String,
    /// Group the prophecy card is drawn from.
    pub prophecies_group: String,
    /// Cards a liaison needs in the kingdom.
    pub allies_group: String,
    /// Cards an ally needs in the kingdom.
    pub liaisons_group: String,
}

impl Default for Designations {
    fn default() -> Self {
        Self {
            young_witch: "Young_Witch".into(),
            ferryman: "Ferryman".into(),
            colony: "Colony".into(),
            platinum: "Platinum".into(),
            shelter: "Shelter".into(),
            obelisk: "Obelisk".into(),
            prosperity_group: "Prosperity".into(),
            dark_ages_group: "Dark_Ages".into(),
            prophecies_group: "Prophecies".into(),
            allies_group: "Allies".into(),
            liaisons_group: "Liaisons".into(),
        }
    }
}

/// Parameters for one or more generate calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleConfig {
    /// Number of countable cards in a kingdom (default: 10).
    pub cards_to_draw: usize,

    /// Fixed seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Rule-bearing card and group names.
    pub designations: Designations,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            cards_to_draw: DEFAULT_CARDS_TO_DRAW,
            seed: None,
            designations: Designations::default(),
        }
    }
}

impl ShuffleConfig {
    /// Create a new config with a custom draw quota.
    pub fn with_cards_to_draw(mut self, cards: usize) -> Self {
        self.cards_to_draw = cards;
        self
    }

    /// Create a new config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with custom designations.
    pub fn with_designations(mut self, designations: Designations) -> Self {
        self.designations = designations;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
