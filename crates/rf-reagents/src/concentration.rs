//! Per-chemical molar concentration.
//!
//! Converts each entry's amount to moles (mass directly via molar mass,
//! volume via density then molar mass) and divides by the estimated total
//! solution volume. Density values are required for every chemical,
//! liquids included, because the volume models convert between unit
//! types. Non-ideal mixing is ignored.

use crate::error::{ReagentError, ReagentResult};
use crate::events::{EventSink, Severity};
use crate::record::IngredientRecord;
use crate::units::Amount;
use crate::volume::VolumeEstimate;
use rf_core::numeric::ensure_finite;
use rf_core::units::{Moles, as_liters, as_moles, ml};
use serde::{Deserialize, Serialize};

/// Molar concentrations (mol/L), index-aligned with the source record and
/// tagged with the versioned model name that produced the volume, so
/// future formula revisions can coexist with historical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationVector {
    pub model: String,
    pub values: Vec<f64>,
}

impl ConcentrationVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }
}

/// Compute the concentration of every chemical in the record against one
/// estimated total volume.
///
/// The output is always index-aligned with the record: entries with an
/// unrecognized unit yield 0.0 mol/L and a warning, never a shorter
/// vector. A non-positive total volume leaves concentration undefined
/// and fails with [`ReagentError::Computation`].
pub fn calculate_concentrations(
    record: &IngredientRecord,
    volume: &VolumeEstimate,
    model: &str,
    sink: &dyn EventSink,
) -> ReagentResult<ConcentrationVector> {
    if volume.milliliters <= 0.0 {
        return Err(ReagentError::Computation {
            model: model.to_string(),
            reason: format!(
                "total volume {} mL for ingredient '{}' is not positive",
                volume.milliliters,
                record.uid()
            ),
        });
    }
    let liters = as_liters(ml(volume.milliliters));

    let mut values = Vec::with_capacity(record.len());
    for entry in record.iter() {
        let moles: Option<Moles> = match &entry.amount {
            // g -> mol
            Amount::Mass(m) => Some(*m / entry.molar_mass),
            // mL -> g -> mol
            Amount::Volume(v) => Some(*v * entry.density / entry.molar_mass),
            Amount::Other { .. } => None,
        };
        let value = match moles {
            Some(n) => ensure_finite(as_moles(n) / liters, "molar concentration")?,
            None => {
                sink.record(
                    Severity::Warning,
                    &format!(
                        "ingredient '{}': chemical {} has unrecognized unit '{}', recording 0 mol/L",
                        record.uid(),
                        entry.inchikey,
                        entry.amount.unit_label()
                    ),
                );
                0.0
            }
        };
        values.push(value);
    }

    Ok(ConcentrationVector {
        model: model.to_string(),
        values,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::events::MemorySink;
    use crate::record::ChemicalEntry;
    use crate::units::AmountUnit;
    use crate::volume::FULL_VOLUME_MODEL;
    use proptest::prelude::*;
    use rf_core::numeric::{Tolerances, nearly_equal};
    use rf_core::units::{g_per_ml, g_per_mol};

    proptest! {
        // Doubling the total volume exactly halves a mass entry's
        // concentration, holding amount, density, and molar mass fixed.
        #[test]
        fn mass_concentration_inversely_proportional_to_volume(
            amount in 0.1_f64..50.0,
            molar_mass in 10.0_f64..500.0,
            volume_ml in 1.0_f64..500.0,
        ) {
            let make_record = || IngredientRecord::from_parts(
                "prop",
                vec![ChemicalEntry {
                    inchikey: "KEY-P".to_string(),
                    amount: Amount::new(amount, &AmountUnit::Gram),
                    molar_mass: g_per_mol(molar_mass),
                    density: g_per_ml(1.3),
                    category: "organic".to_string(),
                    name: "chem".to_string(),
                    smiles: "C".to_string(),
                }],
            );
            let sink = MemorySink::new();
            let base = VolumeEstimate { model: FULL_VOLUME_MODEL.to_string(), milliliters: volume_ml };
            let doubled = VolumeEstimate { model: FULL_VOLUME_MODEL.to_string(), milliliters: 2.0 * volume_ml };

            let c1 = calculate_concentrations(&make_record(), &base, FULL_VOLUME_MODEL, &sink).unwrap();
            let c2 = calculate_concentrations(&make_record(), &doubled, FULL_VOLUME_MODEL, &sink).unwrap();
            let tol = Tolerances { abs: 1e-12, rel: 1e-9 };
            prop_assert!(nearly_equal(c1.values[0], 2.0 * c2.values[0], tol));
        }
    }
}
