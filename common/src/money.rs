//! [`Money`]-related definitions.

use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount in [`Currency::Bdt`].
    #[must_use]
    pub fn bdt(amount: impl Into<Decimal>) -> Self {
        Self {
            amount: amount.into(),
            currency: Currency::Bdt,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

impl PartialOrd for Money {
    /// Amounts of different [`Currency`]s are not comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.currency == other.currency)
            .then(|| self.amount.cmp(&other.amount))
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Bangladeshi Taka."]
        Bdt = 1,
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::Money;

    impl Serialize for Money {
        /// Money in `{major}.{minor}{currency}` format, where:
        /// - `major` is an integer;
        /// - `minor` is an optional integer;
        /// - `currency` is a three-letter currency code.
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::from_str(&s).map_err(|e| {
                de::Error::custom(format!("cannot parse `Money`: {e}"))
            })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("45000BDT").unwrap(),
            Money {
                amount: decimal("45000"),
                currency: Currency::Bdt,
            },
        );

        assert_eq!(
            Money::from_str("123.45BDT").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Bdt,
            },
        );

        assert!(Money::from_str("45000").is_err());
        assert!(Money::from_str("45000Bd").is_err());
        assert!(Money::from_str("45000Bdtaka").is_err());
        assert!(Money::from_str("৳45000").is_err());

        assert!(Money::from_str("123.00BDT").is_ok());
        assert!(Money::from_str("123.0BDT").is_ok());
        assert!(Money::from_str("123BDT").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Bdt,
            }
            .to_string(),
            "123.45BDT",
        );

        assert_eq!(
            Money {
                amount: decimal("45000.00"),
                currency: Currency::Bdt,
            }
            .to_string(),
            "45000BDT",
        );

        assert_eq!(Money::bdt(45_000).to_string(), "45000BDT");
    }

    #[test]
    fn ordering() {
        use std::cmp::Ordering;

        assert!(Money::bdt(45_000) <= Money::bdt(50_000));
        assert!(Money::bdt(50_000) <= Money::bdt(50_000));
        assert_eq!(
            Money::bdt(55_000).partial_cmp(&Money::bdt(50_000)),
            Some(Ordering::Greater),
        );
    }
}
