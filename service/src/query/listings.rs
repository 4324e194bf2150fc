//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::By;

use crate::{domain::Listing, read};
#[cfg(doc)]
use crate::Query;

use super::CatalogQuery;

/// Queries a list of [`Listing`]s matching a [`Filter`].
///
/// [`Filter`]: read::listing::list::Filter
pub type List = CatalogQuery<By<Vec<Listing>, read::listing::list::Filter>>;
