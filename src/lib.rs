//! # kingdom-shuffle
//!
//! Random kingdom selection for tableau-building card games.
//!
//! ## Design Principles
//!
//! 1. **Immutable Catalog**: Cards and groups are loaded once and referred
//!    to by ID everywhere else.
//!
//! 2. **Constraints In, Kingdom Out**: A `ConstraintState` plus the catalog
//!    is the whole input to one generate call; the `Kingdom` it returns is
//!    never mutated afterwards.
//!
//! 3. **Explicit Randomness**: One `ShuffleRng` is threaded through the
//!    search and every setup rule, so a seeded call is reproducible.
//!
//! ## Architecture
//!
//! - **Backtracking Search**: Depth-first, tightest unmet minimum first.
//!   Pools and limits are persistent `im` structures so each branch
//!   clones in O(1).
//!
//! - **Setup Rules**: Bane, extra pile and prophecy run at the leaves and
//!   may send the search back; the rest run once the kingdom is fixed.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Card definitions, groups, catalog
//! - `rules`: Limits and constraint state, with persistence
//! - `solver`: Pool construction, search, the produced kingdom
//! - `extras`: Card-specific setup rules

pub mod core;
pub mod cards;
pub mod rules;
pub mod solver;
pub mod extras;

// Re-export commonly used types
pub use crate::core::{
    Designations, ShuffleConfig, DEFAULT_CARDS_TO_DRAW,
    ShuffleRng, ShuffleRngState,
    CatalogError, PersistError, SolveError,
};

pub use crate::cards::{
    Card, CardId, CardType, Cost,
    Group, GroupId, CardOrGroup,
    Catalog, CatalogBuilder, CardOrder,
};

pub use crate::rules::{ConstraintState, Limit, ConstraintSnapshot, RuleSnapshot};

pub use crate::solver::{generate, Kingdom, Shuffler};

pub use crate::extras::SpecialCards;
