//! Value objects for the product domain.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest accepted price, in cents (999,999.99).
const MAX_CENTS: i64 = 99_999_999;

/// Positive product price, held in whole cents.
///
/// On the wire a price is a JSON number with at most two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Largest accepted price.
    pub const MAX: Price = Price { cents: MAX_CENTS };

    /// Creates a price from cents. Returns `None` outside `1..=MAX`.
    pub fn from_cents(cents: i64) -> Option<Self> {
        (1..=MAX_CENTS).contains(&cents).then_some(Self { cents })
    }

    /// Rounds a decimal amount to the nearest cent.
    ///
    /// Returns `None` for non-finite input, for amounts that round to zero
    /// or below, and for amounts above [`Price::MAX`].
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents < 1.0 || cents > MAX_CENTS as f64 {
            return None;
        }
        Some(Self {
            cents: cents as i64,
        })
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as a decimal number.
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {amount}")))
    }
}

/// Closed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::Home,
        Category::Sports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Books => "books",
            Category::Home => "home",
            Category::Sports => "sports",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rounds_to_cents() {
        assert_eq!(Price::from_decimal(19.999).unwrap().cents(), 2000);
        assert_eq!(Price::from_decimal(0.005).unwrap().cents(), 1);
        assert_eq!(Price::from_decimal(12.34).unwrap().to_string(), "12.34");
        assert_eq!(Price::from_decimal(5.0).unwrap().to_string(), "5.00");
    }

    #[test]
    fn test_price_bounds() {
        assert!(Price::from_decimal(0.0).is_none());
        assert!(Price::from_decimal(0.004).is_none());
        assert!(Price::from_decimal(-3.0).is_none());
        assert!(Price::from_decimal(f64::NAN).is_none());
        assert!(Price::from_decimal(f64::INFINITY).is_none());
        assert_eq!(Price::from_decimal(999_999.99), Some(Price::MAX));
        assert!(Price::from_decimal(1_000_000.0).is_none());

        assert!(Price::from_cents(0).is_none());
        assert!(Price::from_cents(MAX_CENTS + 1).is_none());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::from_cents(1999).unwrap();
        assert_eq!(serde_json::to_value(price).unwrap(), serde_json::json!(19.99));

        let parsed: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(parsed, price);
        assert!(serde_json::from_str::<Price>("-1").is_err());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("books".parse::<Category>(), Ok(Category::Books));
        assert_eq!(" Sports ".parse::<Category>(), Ok(Category::Sports));
        assert!("toys".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_wire_names_match_display() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, serde_json::json!(category.to_string()));
        }
    }
}
