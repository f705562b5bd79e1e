//! Issue, severity and traveler-type enums as the single source of truth for
//! their string forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for unrecognized enum strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownKind {
    kind: &'static str,
    value: String,
}

/// Generates `Display`, `FromStr` and string-based serde impls for a
/// fieldless enum.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Canonical string form.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownKind {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_enum!(
    /// Category of a detected itinerary defect.
    IssueType, "issue type" {
        TimeConflict => "time_conflict",
        MealGap => "meal_gap",
        NoAccommodation => "no_accommodation",
        BudgetOverrun => "budget_overrun",
        /// Reserved. No detection rule emits it.
        WeatherConflict => "weather_conflict",
    }
);

string_enum!(
    /// How urgently an issue should be addressed.
    Severity, "severity" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

string_enum!(
    /// Travel party composition derived from the traveler list.
    TravelerType, "traveler type" {
        Solo => "solo",
        Couple => "couple",
        Family => "family",
        Friends => "friends",
        Group => "group",
    }
);
