//! Kingdom generation.
//!
//! - `pool`: builds the available pool and the branch-local limit set
//! - `search`: the backtracking solver and the `generate` entry point
//! - `kingdom`: the produced result

pub mod kingdom;
pub mod pool;
pub mod search;

pub use kingdom::Kingdom;
pub use pool::{build_pool, LimitSet};
pub use search::{generate, Shuffler};
