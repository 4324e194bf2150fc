//! [`Listing`]-related read definitions.

#[cfg(doc)]
use crate::domain::Listing;

pub mod list {
    //! [`Listing`] list definitions.

    use std::cmp::Ordering;

    use common::Money;
    use tracing as log;

    use crate::domain::{
        listing::{Area, Kind, NumBedrooms},
        location, Listing,
    };

    /// Criteria narrowing a [`Listing`] list down.
    ///
    /// Owned by the caller and handed in by value: the engine never keeps or
    /// mutates it. [`Default`] criteria constrain nothing, so applying them
    /// returns the whole catalog unchanged.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`location::Division`] to require, if any.
        pub division: Option<location::Division>,

        /// [`location::District`] to require, if any.
        ///
        /// Expected to be consistent with the `division` according to the
        /// reference [`Locations`] tree. Not enforced here: the caller is
        /// responsible for resetting dependent fields whenever an ancestor
        /// changes.
        ///
        /// [`Locations`]: crate::domain::Locations
        pub district: Option<location::District>,

        /// [`location::Upazila`] to require, if any.
        pub upazila: Option<location::Upazila>,

        /// Inclusive monthly rent ceiling, if any.
        pub max_price: Option<Money>,

        /// Inclusive [`Area`] ceiling, if any.
        pub max_area: Option<Area>,

        /// [`Rooms`] constraint on bedrooms.
        pub bedrooms: Rooms,

        /// [`Rooms`] constraint on bathrooms.
        pub bathrooms: Rooms,

        /// [`Kind`]s to allow.
        ///
        /// Empty means any [`Kind`] passes.
        pub kinds: Vec<Kind>,

        /// Indicator whether only furnished [`Listing`]s pass.
        pub furnished_only: bool,

        /// Indicator whether only verified [`Listing`]s pass.
        pub verified_only: bool,
    }

    impl Filter {
        /// Checks whether the provided [`Listing`] satisfies every criterion
        /// of this [`Filter`].
        #[must_use]
        pub fn matches(&self, listing: &Listing) -> bool {
            // Cheap flag and numeric checks go before string comparisons.
            if self.furnished_only && !listing.furnished {
                return false;
            }
            if self.verified_only && !listing.verified {
                return false;
            }
            if !self.bedrooms.matches(listing.num_bedrooms) {
                return false;
            }
            if !self.bathrooms.matches(listing.num_bathrooms) {
                return false;
            }
            if self.max_area.is_some_and(|max| listing.area > max) {
                return false;
            }
            if self.max_price.is_some_and(|max| {
                // Amounts in another currency are incomparable and excluded.
                !matches!(
                    listing.price.partial_cmp(&max),
                    Some(Ordering::Less | Ordering::Equal),
                )
            }) {
                return false;
            }
            if !self.kinds.is_empty() && !self.kinds.contains(&listing.kind) {
                return false;
            }
            if self
                .division
                .as_ref()
                .is_some_and(|d| listing.location.division != *d)
            {
                return false;
            }
            if self
                .district
                .as_ref()
                .is_some_and(|d| listing.location.district != *d)
            {
                return false;
            }
            if self
                .upazila
                .as_ref()
                .is_some_and(|u| listing.location.upazila != *u)
            {
                return false;
            }
            true
        }

        /// Applies this [`Filter`] to the provided catalog.
        ///
        /// Pure and stable: the result is a subsequence of the catalog in its
        /// original relative order. Never fails: over-tight criteria
        /// legitimately produce an empty list.
        #[must_use]
        pub fn apply(&self, catalog: &[Listing]) -> Vec<Listing> {
            catalog.iter().filter(|l| self.matches(l)).cloned().collect()
        }
    }

    /// Constraint on a number of rooms.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum Rooms {
        /// Any number of rooms.
        #[default]
        Any,

        /// Exactly the given number of rooms.
        Exactly(u8),

        /// At least the given number of rooms.
        AtLeast(u8),
    }

    impl Rooms {
        /// Parses a [`Rooms`] constraint out of a UI token: either an exact
        /// number (`"3"`), or an open-ended suffix form (`"3+"`).
        ///
        /// Fails open: an empty, `"Any"` or malformed token constrains
        /// nothing, so a broken widget value can never error out a search.
        #[must_use]
        pub fn from_token(token: impl AsRef<str>) -> Self {
            let token = token.as_ref().trim();
            if token.is_empty() || token.eq_ignore_ascii_case("any") {
                return Self::Any;
            }

            let (num, at_least) = match token.strip_suffix('+') {
                Some(rest) => (rest, true),
                None => (token, false),
            };
            match num.trim().parse::<u8>() {
                Ok(n) if at_least => Self::AtLeast(n),
                Ok(n) => Self::Exactly(n),
                Err(_) => {
                    log::warn!("malformed rooms token `{token}`, ignoring");
                    Self::Any
                }
            }
        }

        /// Checks whether the provided number of rooms satisfies this
        /// constraint.
        #[must_use]
        pub fn matches(self, num: NumBedrooms) -> bool {
            match self {
                Self::Any => true,
                Self::Exactly(n) => num == n,
                Self::AtLeast(n) => num >= n,
            }
        }
    }
}
