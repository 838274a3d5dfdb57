//! Selection rules: per-group limits and the user's constraint state.

pub mod constraints;
pub mod limit;
pub mod persist;

pub use constraints::ConstraintState;
pub use limit::Limit;
pub use persist::{ConstraintSnapshot, RuleSnapshot};
