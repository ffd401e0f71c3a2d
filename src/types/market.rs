//! Market context supplied by the caller before an optimization run.
//!
//! Category spellings matter: the serde representation of each enum is the
//! exact string the demand model was trained on, so these values round-trip
//! between API payloads, model artifacts, and feature rows without any
//! translation table. The CLI accepts the kebab-case form (`price-sensitive`,
//! `impulse-buyer`, ...) via clap's `ValueEnum`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Customer segment the simulated demand applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum CustomerSegment {
    #[serde(rename = "Price-sensitive")]
    PriceSensitive,
    #[serde(rename = "Brand-loyal")]
    BrandLoyal,
    #[serde(rename = "Impulse Buyer")]
    ImpulseBuyer,
    #[serde(rename = "Average")]
    Average,
}

impl CustomerSegment {
    /// All segments, in training-data order.
    pub const ALL: [Self; 4] = [
        Self::PriceSensitive,
        Self::BrandLoyal,
        Self::ImpulseBuyer,
        Self::Average,
    ];

    /// The exact category spelling used in the training data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceSensitive => "Price-sensitive",
            Self::BrandLoyal => "Brand-loyal",
            Self::ImpulseBuyer => "Impulse Buyer",
            Self::Average => "Average",
        }
    }
}

impl std::fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weather condition on the simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
}

impl Weather {
    /// All conditions, in training-data order.
    pub const ALL: [Self; 4] = [Self::Sunny, Self::Rainy, Self::Cloudy, Self::Snowy];

    /// The exact category spelling used in the training data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Rainy => "Rainy",
            Self::Cloudy => "Cloudy",
            Self::Snowy => "Snowy",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week for the simulated sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// The exact category spelling used in the training data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable market conditions for one optimization run.
///
/// Built once by the caller (CLI flags or API payload) and never mutated
/// while the grid search runs. The candidate base price is NOT part of the
/// context; the optimizer combines the two into a feature row per grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Competitor price for the same product ($, positive)
    pub competitor_price: f64,
    /// Units currently in stock
    pub inventory: u32,
    /// Customer segment being simulated
    pub customer_segment: CustomerSegment,
    /// Weather condition
    pub weather: Weather,
    /// Day of the week
    pub day_of_week: DayOfWeek,
}

impl MarketContext {
    /// Check the caller-supplied fields for values the demand model was
    /// never trained on. Returns a list of human-readable problems.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if !self.competitor_price.is_finite() || self.competitor_price <= 0.0 {
            errors.push(format!(
                "competitor_price must be a positive finite number, got {}",
                self.competitor_price
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_spellings_match_training_data() {
        let json = serde_json::to_string(&CustomerSegment::ImpulseBuyer).unwrap();
        assert_eq!(json, "\"Impulse Buyer\"");
        let back: CustomerSegment = serde_json::from_str("\"Price-sensitive\"").unwrap();
        assert_eq!(back, CustomerSegment::PriceSensitive);
    }

    #[test]
    fn weather_and_day_serialize_as_variant_names() {
        assert_eq!(serde_json::to_string(&Weather::Snowy).unwrap(), "\"Snowy\"");
        assert_eq!(
            serde_json::to_string(&DayOfWeek::Wednesday).unwrap(),
            "\"Wednesday\""
        );
    }

    #[test]
    fn cli_spellings_are_kebab_case() {
        let seg = CustomerSegment::from_str("impulse-buyer", false).unwrap();
        assert_eq!(seg, CustomerSegment::ImpulseBuyer);
        let day = DayOfWeek::from_str("saturday", false).unwrap();
        assert_eq!(day, DayOfWeek::Saturday);
    }

    #[test]
    fn context_rejects_non_positive_competitor_price() {
        let ctx = MarketContext {
            competitor_price: 0.0,
            inventory: 100,
            customer_segment: CustomerSegment::Average,
            weather: Weather::Sunny,
            day_of_week: DayOfWeek::Monday,
        };
        assert!(ctx.validate().is_err());
    }

    #[test]
    fn context_accepts_sensible_values() {
        let ctx = MarketContext {
            competitor_price: 250.0,
            inventory: 0,
            customer_segment: CustomerSegment::BrandLoyal,
            weather: Weather::Rainy,
            day_of_week: DayOfWeek::Saturday,
        };
        assert!(ctx.validate().is_ok());
    }
}
