use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;

/// A car price.
///
/// Always finite, strictly greater than zero, and within the magnitude a
/// DynamoDB number can hold. The only way to build one from untrusted input
/// is [`Price::parse`] (or deserialization, which runs the same checks).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Largest accepted price. DynamoDB numbers top out just below 1e126.
    pub const MAX: f64 = 1e125;

    /// Smallest accepted price. DynamoDB numbers bottom out at 1e-130.
    pub const MIN_POSITIVE: f64 = 1e-130;

    /// Parse a price from form text.
    ///
    /// Surrounding whitespace is ignored. Non-numeric and non-finite input is
    /// rejected with [`TypeError::InvalidPrice`], zero and negative values
    /// with [`TypeError::NonPositivePrice`], and values beyond
    /// [`Price::MIN_POSITIVE`]..=[`Price::MAX`] with
    /// [`TypeError::PriceOutOfRange`].
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| TypeError::InvalidPrice(raw.to_string()))?;
        Self::new(value).map_err(|e| match e {
            TypeError::InvalidPrice(_) => TypeError::InvalidPrice(raw.to_string()),
            other => other,
        })
    }

    /// Wrap an already numeric value.
    pub fn new(value: f64) -> Result<Self, TypeError> {
        if !value.is_finite() {
            return Err(TypeError::InvalidPrice(value.to_string()));
        }
        if value <= 0.0 {
            return Err(TypeError::NonPositivePrice(value.to_string()));
        }
        if !(Self::MIN_POSITIVE..=Self::MAX).contains(&value) {
            return Err(TypeError::PriceOutOfRange(value.to_string()));
        }
        Ok(Self(value))
    }

    /// The numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Price::new(value).map_err(serde::de::Error::custom)
    }
}
