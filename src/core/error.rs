//! Error types.
//!
//! `SolveError` is the failure surface of a generate call. Inside the
//! search every variant is an ordinary branch failure; only the error
//! that escapes the root reaches the caller.

use thiserror::Error;

/// Why a kingdom could not be generated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A limit's bounds are violated by the selection.
    #[error("a rule is not satisfied by the selected cards")]
    UnsatisfiedRule,

    /// The pool ran dry while a minimum was still unmet.
    #[error("can not select cards using the given rules, try relaxing them")]
    RulesTooStrict,

    /// An auxiliary rule found no eligible card to assign.
    #[error("not enough cards to select a {pile} card")]
    InsufficientCandidates { pile: &'static str },

    /// Outstanding minimums can no longer fit in the remaining pool.
    #[error("can not select cards using the given rules, try relaxing them")]
    OverconstrainedMinimums {
        group: String,
        needed: usize,
        available: usize,
    },

    /// The required cards alone overflow the draw quota.
    #[error("{countable} required cards exceed the {quota} cards to draw")]
    TooManyCards { countable: usize, quota: usize },
}

impl SolveError {
    /// True for failures the user fixes by relaxing limits.
    #[must_use]
    pub fn is_too_strict(&self) -> bool {
        matches!(
            self,
            Self::RulesTooStrict | Self::OverconstrainedMinimums { .. }
        )
    }
}

/// Problems building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("card '{0}' is defined more than once")]
    DuplicateCard(String),

    #[error("group '{0}' is defined more than once")]
    DuplicateGroup(String),

    #[error("can not find card '{card}' (specified in group '{group}')")]
    UnknownCard { card: String, group: String },

    #[error("invalid cost '{0}'")]
    InvalidCost(String),

    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems reading or writing persisted constraint state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("malformed constraint state: {0}")]
    Json(#[from] serde_json::Error),
}
