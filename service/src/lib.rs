//! Service contains the business logic of the application.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

pub use self::query::Query;

/// Domain service.
///
/// Generic over the [`Catalog`] backing it, so the listing filter stays
/// independent of where listings actually come from: a hardcoded in-memory
/// array here, a storage layer in a bigger deployment.
///
/// [`Catalog`]: infra::Catalog
#[derive(Clone, Copy, Debug)]
pub struct Service<C> {
    /// [`Catalog`] of this [`Service`].
    ///
    /// [`Catalog`]: infra::Catalog
    catalog: C,
}

impl<C> Service<C> {
    /// Creates a new [`Service`] on top of the provided catalog.
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Returns the catalog of this [`Service`].
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}
