//! Infrastructure layer.

pub mod memory;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::InMemory;

/// [`Catalog`] operation.
///
/// A [`Catalog`] is the external collaborator handing read-only [`Listing`]s
/// to the [`Service`]: a fixed in-memory array here, a storage layer in a
/// bigger deployment.
///
/// [`Listing`]: crate::domain::Listing
/// [`Service`]: crate::Service
pub use common::Handler as Catalog;

/// [`Catalog`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`InMemory`] catalog error.
    Memory(memory::Error),
}
