//! In-memory [`Catalog`] implementation.

use common::{
    operations::{By, Select},
    Money,
};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Kind},
        location, Listing,
    },
    read::listing::list,
};

use super::Catalog;

/// [`Catalog`] backed by a fixed in-memory list of [`Listing`]s.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct InMemory(Vec<Listing>);

impl InMemory {
    /// Creates a new [`InMemory`] catalog from the provided [`Listing`]s.
    #[must_use]
    pub fn new(listings: Vec<Listing>) -> Self {
        Self(listings)
    }

    /// Parses a new [`InMemory`] catalog from the provided JSON array.
    ///
    /// # Errors
    ///
    /// Errors if the provided JSON is malformed or contains an invalid
    /// [`Listing`].
    pub fn from_json(json: &str) -> Result<Self, Traced<Error>> {
        serde_json::from_str(json)
            .map(Self)
            .map_err(|e| tracerr::new!(Error::Parse(e)))
    }

    /// Returns the [`Listing`]s of this catalog.
    #[must_use]
    pub fn listings(&self) -> &[Listing] {
        &self.0
    }
}

/// [`InMemory`] catalog error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to parse the catalog out of JSON.
    #[display("failed to parse catalog: {_0}")]
    Parse(serde_json::Error),
}

impl Catalog<Select<By<Vec<Listing>, list::Filter>>> for InMemory {
    type Ok = Vec<Listing>;
    type Err = Traced<super::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(by.into_inner().apply(&self.0))
    }
}

impl Catalog<Select<By<Option<Listing>, listing::Id>>> for InMemory {
    type Ok = Option<Listing>;
    type Err = Traced<super::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.0.iter().find(|l| l.id == id).cloned())
    }
}

/// Returns the seed catalog of the marketing site: eight [`Listing`]s spread
/// over the country.
#[must_use]
pub fn sample() -> Vec<Listing> {
    vec![
        seed(
            1,
            "Spacious Apartment in Gulshan",
            ("Dhaka", "Dhaka", "Gulshan"),
            45_000,
            1_200,
            Kind::Apartment,
            (3, 2),
            true,
            true,
        ),
        seed(
            2,
            "Modern Office in Chittagong",
            ("Chittagong", "Chittagong", "Panchlaish"),
            80_000,
            2_000,
            Kind::Office,
            (0, 2),
            false,
            true,
        ),
        seed(
            3,
            "Cozy House in Sylhet",
            ("Sylhet", "Sylhet", "Sylhet Sadar"),
            30_000,
            1_500,
            Kind::House,
            (4, 3),
            true,
            false,
        ),
        seed(
            4,
            "Retail Shop in Barisal",
            ("Barisal", "Barisal", "Barisal Sadar"),
            25_000,
            800,
            Kind::Shop,
            (0, 1),
            false,
            true,
        ),
        seed(
            5,
            "Luxury Apartment in Dhanmondi",
            ("Dhaka", "Dhaka", "Dhanmondi"),
            120_000,
            2_500,
            Kind::Apartment,
            (5, 4),
            true,
            true,
        ),
        seed(
            6,
            "Quiet House in Rajshahi",
            ("Rajshahi", "Rajshahi", "Rajshahi Sadar"),
            28_000,
            1_300,
            Kind::House,
            (3, 2),
            false,
            false,
        ),
        seed(
            7,
            "Commercial Space in Cumilla",
            ("Chittagong", "Cumilla", "Cumilla Sadar"),
            60_000,
            1_800,
            Kind::Office,
            (0, 1),
            true,
            true,
        ),
        seed(
            8,
            "Top Floor Apt in Mirpur",
            ("Dhaka", "Dhaka", "Mirpur"),
            55_000,
            1_100,
            Kind::Apartment,
            (2, 2),
            true,
            true,
        ),
    ]
}

/// Builds a seed [`Listing`] out of literal parts.
#[expect(clippy::too_many_arguments, reason = "still readable")]
#[expect(unsafe_code, reason = "bypass")]
fn seed(
    id: i64,
    title: &str,
    (division, district, upazila): (&str, &str, &str),
    price: i64,
    area: listing::Area,
    kind: Kind,
    (num_bedrooms, num_bathrooms): (
        listing::NumBedrooms,
        listing::NumBathrooms,
    ),
    furnished: bool,
    verified: bool,
) -> Listing {
    // SAFETY: Every seed literal satisfies its value format.
    unsafe {
        Listing {
            id: id.into(),
            title: listing::Title::new_unchecked(title),
            location: location::Path {
                division: location::Division::new_unchecked(division),
                district: location::District::new_unchecked(district),
                upazila: location::Upazila::new_unchecked(upazila),
            },
            price: Money::bdt(price),
            area,
            kind,
            num_bedrooms,
            num_bathrooms,
            furnished,
            verified,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Handler as _, Money,
    };

    use crate::domain::listing::{Id, Kind};

    use super::{sample, InMemory};

    #[test]
    fn sample_catalog_shape() {
        let catalog = sample();

        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.iter().map(|l| i64::from(l.id)).collect::<Vec<_>>(),
            (1..=8).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn selects_listing_by_id() {
        let catalog = InMemory::new(sample());

        let found = catalog
            .execute(Select(By::<Option<_>, _>::new(Id::from(5))))
            .unwrap()
            .unwrap();
        assert_eq!(
            AsRef::<str>::as_ref(&found.title),
            "Luxury Apartment in Dhanmondi",
        );

        let missing = catalog
            .execute(Select(By::<Option<_>, _>::new(Id::from(404))))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn parses_catalog_from_json() {
        let json = r#"[{
            "id": 1,
            "title": "Spacious Apartment in Gulshan",
            "location": {
                "division": "Dhaka",
                "district": "Dhaka",
                "upazila": "Gulshan"
            },
            "price": "45000BDT",
            "area": 1200,
            "kind": "APARTMENT",
            "num_bedrooms": 3,
            "num_bathrooms": 2,
            "furnished": true,
            "verified": true
        }]"#;

        let catalog = InMemory::from_json(json).unwrap();

        assert_eq!(catalog.listings().len(), 1);
        assert_eq!(catalog.listings()[0].kind, Kind::Apartment);
        assert_eq!(catalog.listings()[0].price, Money::bdt(45_000));
    }

    #[test]
    fn rejects_malformed_catalog_json() {
        assert!(InMemory::from_json("not json").is_err());
        assert!(InMemory::from_json(r#"[{"id": 1}]"#).is_err());
        // Value formats are enforced on the way in.
        assert!(InMemory::from_json(
            r#"[{
                "id": 1,
                "title": "",
                "location": {
                    "division": "Dhaka",
                    "district": "Dhaka",
                    "upazila": "Gulshan"
                },
                "price": "45000BDT",
                "area": 1200,
                "kind": "APARTMENT",
                "num_bedrooms": 3,
                "num_bathrooms": 2,
                "furnished": true,
                "verified": true
            }]"#,
        )
        .is_err());
    }
}
