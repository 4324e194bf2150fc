//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{listing, Listing};
#[cfg(doc)]
use crate::Query;

use super::CatalogQuery;

/// Queries a [`Listing`] by its [`listing::Id`].
pub type ById = CatalogQuery<By<Option<Listing>, listing::Id>>;
