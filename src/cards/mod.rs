//! Card catalog: definitions, groups, and registry.
//!
//! ## Key Types
//!
//! - `CardId`, `GroupId`: Identifiers issued by a `Catalog`
//! - `Card`: Static card data (set, cost, type tags)
//! - `Group`: Named set of cards, used as a selectable pool and as the
//!   subject of a limit
//! - `CardOrGroup`: Either of the two, for conditions and list entries
//! - `Catalog`: Immutable lookup built once per session

pub mod definition;
pub mod group;
pub mod loader;
pub mod order;
pub mod registry;

pub use definition::{Card, CardId, CardType, Cost};
pub use group::{CardOrGroup, Group, GroupId};
pub use order::CardOrder;
pub use registry::{Catalog, CatalogBuilder};
