// ABOUTME: Weight unit enumeration with kilogram conversion
// ABOUTME: Kilograms are canonical; every display unit converts to and from kg
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use crate::constants::units::KG_TO_LB;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display unit for body mass
///
/// Storage is always kilograms; a unit only governs presentation and the
/// value recorded as "display value at entry".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WeightUnit {
    /// Kilograms
    #[serde(rename = "kg")]
    #[default]
    Kilograms,
    /// Pounds
    #[serde(rename = "lb")]
    Pounds,
}

impl WeightUnit {
    /// Convert a kilogram value into this unit
    #[must_use]
    pub fn from_kg(self, kg: f64) -> f64 {
        match self {
            Self::Kilograms => kg,
            Self::Pounds => kg * KG_TO_LB,
        }
    }

    /// Convert a value in this unit into kilograms
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kilograms => value,
            Self::Pounds => value / KG_TO_LB,
        }
    }

    /// Short unit symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilograms" | "kilogram" => Ok(Self::Kilograms),
            "lb" | "lbs" | "pounds" | "pound" => Ok(Self::Pounds),
            other => Err(format!("unknown weight unit: {other}")),
        }
    }
}
