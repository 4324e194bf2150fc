//! Location definitions: Bangladesh's three-tier administrative hierarchy.

use std::collections::{BTreeMap, HashMap};

use derive_more::{AsRef, Display, Into};
use serde::{Deserialize, Serialize};
use tracing as log;

#[cfg(doc)]
use super::Listing;

/// Administrative division a [`Listing`] is located in.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Division(String);

impl Division {
    /// Creates a new [`Division`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `division` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(division: impl Into<String>) -> Self {
        Self(division.into())
    }

    /// Creates a new [`Division`] if the given `division` is valid.
    #[must_use]
    pub fn new(division: impl Into<String>) -> Option<Self> {
        let division = division.into();
        Self::check(&division).then_some(Self(division))
    }

    /// Checks whether the given `division` is a valid [`Division`].
    fn check(division: impl AsRef<str>) -> bool {
        let division = division.as_ref();
        division.trim() == division
            && !division.is_empty()
            && division.len() <= 512
    }
}

impl std::str::FromStr for Division {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Division`")
    }
}

impl TryFrom<String> for Division {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Division`")
    }
}

/// Administrative district a [`Listing`] is located in.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct District(String);

impl District {
    /// Creates a new [`District`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `district` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(district: impl Into<String>) -> Self {
        Self(district.into())
    }

    /// Creates a new [`District`] if the given `district` is valid.
    #[must_use]
    pub fn new(district: impl Into<String>) -> Option<Self> {
        let district = district.into();
        Self::check(&district).then_some(Self(district))
    }

    /// Checks whether the given `district` is a valid [`District`].
    fn check(district: impl AsRef<str>) -> bool {
        let district = district.as_ref();
        district.trim() == district
            && !district.is_empty()
            && district.len() <= 512
    }
}

impl std::str::FromStr for District {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `District`")
    }
}

impl TryFrom<String> for District {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `District`")
    }
}

/// Administrative upazila a [`Listing`] is located in.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Upazila(String);

impl Upazila {
    /// Creates a new [`Upazila`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `upazila` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(upazila: impl Into<String>) -> Self {
        Self(upazila.into())
    }

    /// Creates a new [`Upazila`] if the given `upazila` is valid.
    #[must_use]
    pub fn new(upazila: impl Into<String>) -> Option<Self> {
        let upazila = upazila.into();
        Self::check(&upazila).then_some(Self(upazila))
    }

    /// Checks whether the given `upazila` is a valid [`Upazila`].
    fn check(upazila: impl AsRef<str>) -> bool {
        let upazila = upazila.as_ref();
        upazila.trim() == upazila
            && !upazila.is_empty()
            && upazila.len() <= 512
    }
}

impl std::str::FromStr for Upazila {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Upazila`")
    }
}

impl TryFrom<String> for Upazila {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Upazila`")
    }
}

/// Full administrative path of a [`Listing`]:
/// [`Division`] → [`District`] → [`Upazila`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Path {
    /// [`Division`] of this [`Path`].
    pub division: Division,

    /// [`District`] of this [`Path`].
    pub district: District,

    /// [`Upazila`] of this [`Path`].
    pub upazila: Upazila,
}

/// Reference hierarchy of administrative areas.
///
/// Strict tree: every [`District`] belongs to exactly one [`Division`], and
/// every [`Upazila`] to exactly one [`District`]. Built once from the flat
/// reference [`table`]s and never mutated afterwards.
///
/// Serializes as the nested `{division: {district: [upazila]}}` JSON object.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Locations(BTreeMap<Division, BTreeMap<District, Vec<Upazila>>>);

impl Locations {
    /// Returns all the [`Division`]s of this tree.
    pub fn divisions(&self) -> impl Iterator<Item = &Division> {
        self.0.keys()
    }

    /// Returns the [`District`]s of the given [`Division`].
    ///
    /// Empty whenever the [`Division`] is not present in this tree.
    pub fn districts<'a>(
        &'a self,
        division: &Division,
    ) -> impl Iterator<Item = &'a District> + 'a {
        self.0.get(division).into_iter().flat_map(BTreeMap::keys)
    }

    /// Returns the [`Upazila`]s of the given [`District`].
    ///
    /// Empty whenever the [`Division`] or the [`District`] is not present in
    /// this tree.
    #[must_use]
    pub fn upazilas(
        &self,
        division: &Division,
        district: &District,
    ) -> &[Upazila] {
        self.0
            .get(division)
            .and_then(|districts| districts.get(district))
            .map_or(&[], Vec::as_slice)
    }

    /// Checks whether the given [`Path`] exists in this tree.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.upazilas(&path.division, &path.district)
            .contains(&path.upazila)
    }

    /// Builds a new [`Locations`] tree out of the three flat reference
    /// [`table`]s.
    ///
    /// Deterministic: the same tables always produce the same tree. Every
    /// district lands under exactly the division its `division_id` points at,
    /// and every upazila under exactly the district its `district_id` points
    /// at. Rows with a dangling reference or a malformed name are skipped
    /// with a warning, so a re-run over patched tables heals the tree.
    #[must_use]
    pub fn from_tables(
        divisions: &[table::Division],
        districts: &[table::District],
        upazilas: &[table::Upazila],
    ) -> Self {
        let mut tree = BTreeMap::new();

        let mut division_names = HashMap::new();
        for row in divisions {
            let Some(division) = Division::new(&row.name) else {
                log::warn!(
                    "skipping division `{}`: malformed name",
                    row.name,
                );
                continue;
            };
            _ = division_names.insert(row.id.as_str(), division.clone());
            _ = tree.entry(division).or_insert_with(BTreeMap::new);
        }

        let mut district_parents = HashMap::new();
        for row in districts {
            let Some(division) = division_names.get(row.division_id.as_str())
            else {
                log::warn!(
                    "skipping district `{}`: \
                     unknown division id `{}`",
                    row.name,
                    row.division_id,
                );
                continue;
            };
            let Some(district) = District::new(&row.name) else {
                log::warn!(
                    "skipping district `{}`: malformed name",
                    row.name,
                );
                continue;
            };
            let Some(subtree) = tree.get_mut(division) else {
                continue;
            };
            _ = subtree.insert(district.clone(), Vec::new());
            _ = district_parents
                .insert(row.id.as_str(), (division.clone(), district));
        }

        for row in upazilas {
            let Some((division, district)) =
                district_parents.get(row.district_id.as_str())
            else {
                log::warn!(
                    "skipping upazila `{}`: \
                     unknown district id `{}`",
                    row.name,
                    row.district_id,
                );
                continue;
            };
            let Some(upazila) = Upazila::new(&row.name) else {
                log::warn!(
                    "skipping upazila `{}`: malformed name",
                    row.name,
                );
                continue;
            };
            if let Some(list) = tree
                .get_mut(division)
                .and_then(|districts| districts.get_mut(district))
            {
                list.push(upazila);
            }
        }

        // Upazila lists follow the tables' order otherwise, so sort them for
        // output stability.
        for districts in tree.values_mut() {
            for upazilas in districts.values_mut() {
                upazilas.sort();
            }
        }

        Self(tree)
    }
}

pub mod table {
    //! Flat reference tables the [`Locations`] tree is built from.
    //!
    //! Mirrors the upstream `bd-divisions.json`, `bd-districts.json` and
    //! `bd-upazilas.json` datasets: string IDs, foreign keys by ID, and
    //! either a bare array of rows or an object wrapping it.

    use serde::Deserialize;

    #[cfg(doc)]
    use super::Locations;

    /// Row of the divisions reference table.
    #[derive(Clone, Debug, Deserialize)]
    pub struct Division {
        /// ID of the division.
        pub id: String,

        /// Name of the division.
        pub name: String,
    }

    /// Row of the districts reference table.
    #[derive(Clone, Debug, Deserialize)]
    pub struct District {
        /// ID of the district.
        pub id: String,

        /// ID of the division this district belongs to.
        pub division_id: String,

        /// Name of the district.
        pub name: String,
    }

    /// Row of the upazilas reference table.
    #[derive(Clone, Debug, Deserialize)]
    pub struct Upazila {
        /// ID of the upazila.
        pub id: String,

        /// ID of the district this upazila belongs to.
        pub district_id: String,

        /// Name of the upazila.
        pub name: String,
    }

    /// Divisions table file: either a bare array, or wrapped into a
    /// `divisions` key.
    #[derive(Clone, Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Divisions {
        /// Table wrapped into an object.
        Wrapped {
            /// Rows of the table.
            divisions: Vec<Division>,
        },

        /// Bare array of rows.
        Bare(Vec<Division>),
    }

    impl Divisions {
        /// Returns the rows of this table.
        #[must_use]
        pub fn into_rows(self) -> Vec<Division> {
            match self {
                Self::Wrapped { divisions } => divisions,
                Self::Bare(rows) => rows,
            }
        }
    }

    /// Districts table file: either a bare array, or wrapped into a
    /// `districts` key.
    #[derive(Clone, Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Districts {
        /// Table wrapped into an object.
        Wrapped {
            /// Rows of the table.
            districts: Vec<District>,
        },

        /// Bare array of rows.
        Bare(Vec<District>),
    }

    impl Districts {
        /// Returns the rows of this table.
        #[must_use]
        pub fn into_rows(self) -> Vec<District> {
            match self {
                Self::Wrapped { districts } => districts,
                Self::Bare(rows) => rows,
            }
        }
    }

    /// Upazilas table file: either a bare array, or wrapped into an
    /// `upazilas` key.
    #[derive(Clone, Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Upazilas {
        /// Table wrapped into an object.
        Wrapped {
            /// Rows of the table.
            upazilas: Vec<Upazila>,
        },

        /// Bare array of rows.
        Bare(Vec<Upazila>),
    }

    impl Upazilas {
        /// Returns the rows of this table.
        #[must_use]
        pub fn into_rows(self) -> Vec<Upazila> {
            match self {
                Self::Wrapped { upazilas } => upazilas,
                Self::Bare(rows) => rows,
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{table, Division, District, Locations, Path, Upazila};

    fn division(name: &str) -> Division {
        Division::new(name).unwrap()
    }

    fn district(name: &str) -> District {
        District::new(name).unwrap()
    }

    fn upazila(name: &str) -> Upazila {
        Upazila::new(name).unwrap()
    }

    fn tables() -> (
        Vec<table::Division>,
        Vec<table::District>,
        Vec<table::Upazila>,
    ) {
        let divisions = vec![
            table::Division {
                id: "3".into(),
                name: "Dhaka".into(),
            },
            table::Division {
                id: "6".into(),
                name: "Sylhet".into(),
            },
        ];
        let districts = vec![
            table::District {
                id: "1".into(),
                division_id: "3".into(),
                name: "Dhaka".into(),
            },
            table::District {
                id: "2".into(),
                division_id: "3".into(),
                name: "Gazipur".into(),
            },
            table::District {
                id: "60".into(),
                division_id: "6".into(),
                name: "Sylhet".into(),
            },
        ];
        let upazilas = vec![
            table::Upazila {
                id: "10".into(),
                district_id: "1".into(),
                name: "Savar".into(),
            },
            table::Upazila {
                id: "11".into(),
                district_id: "1".into(),
                name: "Dhamrai".into(),
            },
            table::Upazila {
                id: "12".into(),
                district_id: "60".into(),
                name: "Sylhet Sadar".into(),
            },
        ];
        (divisions, districts, upazilas)
    }

    #[test]
    fn builds_nested_tree() {
        let (divisions, districts, upazilas) = tables();
        let locations =
            Locations::from_tables(&divisions, &districts, &upazilas);

        assert_eq!(
            locations.divisions().collect::<Vec<_>>(),
            vec![&division("Dhaka"), &division("Sylhet")],
        );
        assert_eq!(
            locations.districts(&division("Dhaka")).collect::<Vec<_>>(),
            vec![&district("Dhaka"), &district("Gazipur")],
        );
        // Sorted, not table order.
        assert_eq!(
            locations.upazilas(&division("Dhaka"), &district("Dhaka")),
            &[upazila("Dhamrai"), upazila("Savar")],
        );
        assert_eq!(
            locations.upazilas(&division("Dhaka"), &district("Gazipur")),
            &[],
        );
    }

    #[test]
    fn is_deterministic() {
        let (divisions, districts, upazilas) = tables();

        assert_eq!(
            Locations::from_tables(&divisions, &districts, &upazilas),
            Locations::from_tables(&divisions, &districts, &upazilas),
        );
    }

    #[test]
    fn skips_orphaned_rows() {
        let (divisions, mut districts, mut upazilas) = tables();
        districts.push(table::District {
            id: "99".into(),
            division_id: "404".into(),
            name: "Nowhere".into(),
        });
        upazilas.push(table::Upazila {
            id: "99".into(),
            district_id: "404".into(),
            name: "Nowhere Sadar".into(),
        });

        let locations =
            Locations::from_tables(&divisions, &districts, &upazilas);

        assert!(locations
            .divisions()
            .all(|d| locations.districts(d).all(|x| *x != district("Nowhere"))));
    }

    #[test]
    fn missing_ancestors_yield_empty_lookups() {
        let (divisions, districts, upazilas) = tables();
        let locations =
            Locations::from_tables(&divisions, &districts, &upazilas);

        assert_eq!(locations.districts(&division("Mars")).count(), 0);
        assert_eq!(
            locations.upazilas(&division("Dhaka"), &district("Mars")),
            &[],
        );
        assert_eq!(
            locations.upazilas(&division("Mars"), &district("Dhaka")),
            &[],
        );
    }

    #[test]
    fn contains_full_paths_only() {
        let (divisions, districts, upazilas) = tables();
        let locations =
            Locations::from_tables(&divisions, &districts, &upazilas);

        assert!(locations.contains(&Path {
            division: division("Dhaka"),
            district: district("Dhaka"),
            upazila: upazila("Savar"),
        }));
        assert!(!locations.contains(&Path {
            division: division("Sylhet"),
            district: district("Dhaka"),
            upazila: upazila("Savar"),
        }));
    }

    #[test]
    fn round_trips_as_nested_json() {
        let (divisions, districts, upazilas) = tables();
        let locations =
            Locations::from_tables(&divisions, &districts, &upazilas);

        let json = serde_json::to_string(&locations).unwrap();
        assert!(json.starts_with(r#"{"Dhaka":{"#));
        assert_eq!(
            serde_json::from_str::<Locations>(&json).unwrap(),
            locations,
        );
    }

    #[test]
    fn accepts_wrapped_and_bare_tables() {
        let wrapped: table::Divisions = serde_json::from_str(
            r#"{"divisions": [{"id": "1", "name": "Barisal"}]}"#,
        )
        .unwrap();
        let bare: table::Divisions =
            serde_json::from_str(r#"[{"id": "1", "name": "Barisal"}]"#)
                .unwrap();

        assert_eq!(wrapped.into_rows().len(), 1);
        assert_eq!(bare.into_rows().len(), 1);
    }
}
