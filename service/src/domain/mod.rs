//! Domain definitions.

pub mod listing;
pub mod location;

pub use self::{listing::Listing, location::Locations};
