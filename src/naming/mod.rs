pub mod collision;
pub mod name;

pub use collision::{resolve, Claim, ClaimedNameSet};
pub use name::{build, CanonicalName, NameOptions};
