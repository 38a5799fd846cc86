//! Solution-volume estimation models.
//!
//! Two competing approximations of the total solution volume, both fed
//! by the same record and both computed for every ingredient:
//!
//! - **Full volume**: every chemical contributes its estimated volume.
//! - **Solvent volume**: only the solvating liquid counts, with a tiered
//!   fallback when the labeling is imperfect.
//!
//! Non-ideal mixing is ignored throughout; per-chemical volumes are
//! treated as additive.

use crate::events::{EventSink, Severity};
use crate::record::{ChemicalEntry, IngredientRecord};
use crate::units::Amount;
use rf_core::units::{Volume, as_ml, ml};
use serde::{Deserialize, Serialize};

/// Versioned tag of the full-volume model.
pub const FULL_VOLUME_MODEL: &str = "full_volume_v1";
/// Versioned tag of the solvent-volume model.
pub const SOLVENT_VOLUME_MODEL: &str = "solvent_volume_v0";

/// One estimated solution volume, tagged with the model that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub model: String,
    pub milliliters: f64,
}

impl VolumeEstimate {
    fn new(model: &str, total: Volume) -> Self {
        Self {
            model: model.to_string(),
            milliliters: as_ml(total),
        }
    }
}

/// Full-volume model: sum the estimated volume of every entry.
///
/// Entries with an unrecognized unit contribute zero; that is surfaced as
/// a warning, not an error, matching the historical behavior of the
/// concentration pipeline.
pub fn full_volume(record: &IngredientRecord, sink: &dyn EventSink) -> VolumeEstimate {
    let mut total = ml(0.0);
    for entry in record.iter() {
        match entry.volume_contribution() {
            Some(v) => total += v,
            None => sink.record(
                Severity::Warning,
                &format!(
                    "ingredient '{}': chemical {} has unrecognized unit '{}' and contributes no volume",
                    record.uid(),
                    entry.inchikey,
                    entry.amount.unit_label()
                ),
            ),
        }
    }
    VolumeEstimate::new(FULL_VOLUME_MODEL, total)
}

/// Fallback tiers of the solvent-volume model, tried in order. The single
/// transition rule: advance only if the current tier's total is exactly
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SolventTier {
    /// Entries whose category names a solvent.
    CategorizedSolvent,
    /// Any volume-unit entry, regardless of category.
    AnyLiquid,
    /// Mass-unit entries converted via density; nothing liquid exists.
    SolidsOnly,
}

impl SolventTier {
    fn next(self) -> Option<Self> {
        match self {
            SolventTier::CategorizedSolvent => Some(SolventTier::AnyLiquid),
            SolventTier::AnyLiquid => Some(SolventTier::SolidsOnly),
            SolventTier::SolidsOnly => None,
        }
    }
}

/// Solvent-volume model: the volume of whichever chemicals best
/// approximate the solvating liquid.
///
/// Tier 1 sums the categorized solvents (a solvent weighed in grams is
/// converted via density and flagged). If no solvent volume exists,
/// tier 2 falls back to all liquids; if nothing liquid exists either,
/// tier 3 falls back to the solids' displaced volume. Each degradation
/// is recorded through the sink for data-quality review.
pub fn solvent_volume(record: &IngredientRecord, sink: &dyn EventSink) -> VolumeEstimate {
    let mut tier = SolventTier::CategorizedSolvent;
    loop {
        let total = tier_total(record, tier, sink);
        if as_ml(total) != 0.0 {
            return VolumeEstimate::new(SOLVENT_VOLUME_MODEL, total);
        }
        match tier.next() {
            Some(next) => {
                announce_fallback(next, record, sink);
                tier = next;
            }
            None => return VolumeEstimate::new(SOLVENT_VOLUME_MODEL, total),
        }
    }
}

fn tier_total(record: &IngredientRecord, tier: SolventTier, sink: &dyn EventSink) -> Volume {
    let mut total = ml(0.0);
    for entry in record.iter() {
        match tier {
            SolventTier::CategorizedSolvent if entry.is_solvent() => {
                total += solvent_entry_volume(record.uid(), entry, sink);
            }
            SolventTier::CategorizedSolvent => {}
            SolventTier::AnyLiquid => {
                if let Amount::Volume(v) = &entry.amount {
                    total += *v;
                }
            }
            SolventTier::SolidsOnly => {
                if let Amount::Mass(m) = &entry.amount {
                    total += *m / entry.density;
                }
            }
        }
    }
    total
}

fn solvent_entry_volume(uid: &str, entry: &ChemicalEntry, sink: &dyn EventSink) -> Volume {
    match &entry.amount {
        Amount::Volume(v) => *v,
        Amount::Mass(m) => {
            sink.record(
                Severity::Warning,
                &format!(
                    "ingredient '{uid}': solvent {} is specified in grams, verify this is the desired unit",
                    entry.inchikey
                ),
            );
            *m / entry.density
        }
        Amount::Other { .. } => ml(0.0),
    }
}

fn announce_fallback(tier: SolventTier, record: &IngredientRecord, sink: &dyn EventSink) {
    match tier {
        SolventTier::CategorizedSolvent => {}
        SolventTier::AnyLiquid => sink.record(
            Severity::Info,
            &format!(
                "ingredient '{}' has no specified solvent, using the sum of liquids for the solvent-volume model",
                record.uid()
            ),
        ),
        SolventTier::SolidsOnly => sink.record(
            Severity::Warning,
            &format!(
                "ingredient '{}' has no liquids at all, estimating solvent volume from solids",
                record.uid()
            ),
        ),
    }
}
