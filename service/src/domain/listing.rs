//! [`Listing`] definitions.

use common::Money;
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

use super::location;

/// Rentable property listed in a catalog.
///
/// Immutable member of a fixed in-memory catalog: loaded once, never mutated
/// at runtime.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`location::Path`] this [`Listing`] is located at.
    pub location: location::Path,

    /// Monthly rent of this [`Listing`].
    pub price: Money,

    /// [`Area`] of this [`Listing`].
    pub area: Area,

    /// [`Kind`] of this [`Listing`].
    pub kind: Kind,

    /// Number of bedrooms in this [`Listing`].
    pub num_bedrooms: NumBedrooms,

    /// Number of bathrooms in this [`Listing`].
    pub num_bathrooms: NumBathrooms,

    /// Indicator whether this [`Listing`] is furnished.
    pub furnished: bool,

    /// Indicator whether this [`Listing`] is verified by a moderator.
    pub verified: bool,
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(i64);

/// Title of a [`Listing`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

impl TryFrom<String> for Title {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Title`")
    }
}

/// Area of a [`Listing`] in square feet.
pub type Area = u32;

/// Number of bedrooms in a [`Listing`].
pub type NumBedrooms = u8;

/// Number of bathrooms in a [`Listing`].
pub type NumBathrooms = u8;

/// Kind of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    StrumDisplay,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[repr(u8)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    /// A whole house.
    House = 1,

    /// An apartment in a building.
    Apartment = 2,

    /// An office space.
    Office = 3,

    /// A retail shop.
    Shop = 4,

    /// A shared mess for bachelors.
    BachelorMess = 5,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Kind, Title};

    #[test]
    fn title_validation() {
        assert!(Title::new("Spacious Apartment in Gulshan").is_some());

        assert!(Title::new("").is_none());
        assert!(Title::new(" padded ").is_none());
        assert!(Title::new("a".repeat(513)).is_none());
    }

    #[test]
    fn kind_tokens() {
        assert_eq!(Kind::from_str("APARTMENT").unwrap(), Kind::Apartment);
        assert_eq!(Kind::from_str("apartment").unwrap(), Kind::Apartment);
        assert_eq!(
            Kind::from_str("BACHELOR_MESS").unwrap(),
            Kind::BachelorMess,
        );
        assert!(Kind::from_str("CASTLE").is_err());

        assert_eq!(Kind::Shop.to_string(), "SHOP");
    }

    #[test]
    fn kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&Kind::BachelorMess).unwrap(),
            r#""BACHELOR_MESS""#,
        );
        assert_eq!(
            serde_json::from_str::<Kind>(r#""HOUSE""#).unwrap(),
            Kind::House,
        );
    }
}
