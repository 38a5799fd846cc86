//! Amount units for raw chemical fields.
//!
//! Raw records label each amount with a free-text unit ("gram",
//! "milliliter"). Unrecognized text is preserved as [`AmountUnit::Other`]
//! rather than rejected at parse time: the volume models treat an unknown
//! unit as a data-quality signal (zero contribution plus a warning), not
//! as a hard failure.

use rf_core::units::{Mass, Volume, g, ml};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit tag attached to one raw amount field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountUnit {
    Gram,
    Milliliter,
    /// Unit text the pipeline does not understand, kept verbatim.
    Other(String),
}

impl AmountUnit {
    /// Parse a raw unit label. Never fails; unknown labels map to `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gram" | "grams" | "g" => AmountUnit::Gram,
            "milliliter" | "milliliters" | "ml" => AmountUnit::Milliliter,
            _ => AmountUnit::Other(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for AmountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountUnit::Gram => write!(f, "gram"),
            AmountUnit::Milliliter => write!(f, "milliliter"),
            AmountUnit::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// A raw amount scalar paired with its unit, dimensioned where possible.
///
/// Chemicals within one ingredient may mix units freely (some weighed,
/// some measured by volume); every consumer handles each entry's unit
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Mass(Mass),
    Volume(Volume),
    /// Amount whose unit was not recognized; the scalar is kept for
    /// diagnostics but contributes nothing to volume or concentration.
    Other { value: f64, unit: String },
}

impl Amount {
    pub fn new(value: f64, unit: &AmountUnit) -> Self {
        match unit {
            AmountUnit::Gram => Amount::Mass(g(value)),
            AmountUnit::Milliliter => Amount::Volume(ml(value)),
            AmountUnit::Other(raw) => Amount::Other {
                value,
                unit: raw.clone(),
            },
        }
    }

    /// Human-readable unit label, for event messages.
    pub fn unit_label(&self) -> AmountUnit {
        match self {
            Amount::Mass(_) => AmountUnit::Gram,
            Amount::Volume(_) => AmountUnit::Milliliter,
            Amount::Other { unit, .. } => AmountUnit::Other(unit.clone()),
        }
    }
}
