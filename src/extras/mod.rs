//! Auxiliary setup rules applied once the base kingdom is fixed.
//!
//! Two families, run in this order:
//!
//! - `piles`: bane, extra pile, prophecy. They may fail for lack of
//!   candidates and run inside the search, so a failure just backtracks.
//! - `setup`: colony/platinum pairing, shelters, obelisk target, trait
//!   targets. They never fail and run once, after the search returns.
//!
//! Every rule is keyed on a `SpecialCards` entry; one the catalog does
//! not define turns its rule into a no-op.

pub mod piles;
pub mod setup;

use crate::cards::{CardId, Catalog, GroupId};
use crate::core::Designations;

pub use piles::{assign_bane, assign_extra_pile, assign_prophecy, complete_piles};
pub use setup::{
    apply_setup, assign_landmark_target, assign_trait_targets, draw_colony_platinum, draw_shelter,
};

/// Designations resolved against a catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpecialCards {
    pub young_witch: Option<CardId>,
    pub ferryman: Option<CardId>,
    pub colony: Option<CardId>,
    pub platinum: Option<CardId>,
    pub shelter: Option<CardId>,
    pub obelisk: Option<CardId>,
    pub prosperity: Option<GroupId>,
    pub dark_ages: Option<GroupId>,
    pub prophecies: Option<GroupId>,
    pub allies: Option<GroupId>,
    pub liaisons: Option<GroupId>,
}

impl SpecialCards {
    #[must_use]
    pub fn resolve(catalog: &Catalog, names: &Designations) -> Self {
        let card = |name: &str| catalog.card_by_name(name);
        let group = |name: &str| catalog.group_by_name(name);

        Self {
            young_witch: card(&names.young_witch),
            ferryman: card(&names.ferryman),
            colony: card(&names.colony),
            platinum: card(&names.platinum),
            shelter: card(&names.shelter),
            obelisk: card(&names.obelisk),
            prosperity: group(&names.prosperity_group),
            dark_ages: group(&names.dark_ages_group),
            prophecies: group(&names.prophecies_group),
            allies: group(&names.allies_group),
            liaisons: group(&names.liaisons_group),
        }
    }
}
