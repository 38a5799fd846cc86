//! Compound-ingredient orchestration.
//!
//! Wires the pipeline together for one ingredient: build the record,
//! estimate both volumes, derive one concentration vector per volume.
//! The result is immutable and safe to share read-only; processing many
//! ingredients concurrently needs no coordination.

use crate::concentration::{ConcentrationVector, calculate_concentrations};
use crate::error::ReagentResult;
use crate::events::{EventSink, TracingSink};
use crate::inventory::ChemicalInventory;
use crate::record::IngredientRecord;
use crate::volume::{self, FULL_VOLUME_MODEL, SOLVENT_VOLUME_MODEL, VolumeEstimate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One fully processed ingredient (reagent/precursor) of an experiment.
///
/// Everything is computed once at construction; there is no mutation API.
#[derive(Debug, Clone)]
pub struct CompoundIngredient {
    record: IngredientRecord,
    full_volume: VolumeEstimate,
    solvent_volume: VolumeEstimate,
    full_volume_conc: ConcentrationVector,
    solvent_volume_conc: ConcentrationVector,
}

impl CompoundIngredient {
    /// Process one ingredient, logging data-quality events via `tracing`.
    pub fn new(
        series: &BTreeMap<String, String>,
        uid: &str,
        inventory: &ChemicalInventory,
    ) -> ReagentResult<Self> {
        Self::with_sink(series, uid, inventory, &TracingSink)
    }

    /// Process one ingredient with an injected event sink.
    pub fn with_sink(
        series: &BTreeMap<String, String>,
        uid: &str,
        inventory: &ChemicalInventory,
        sink: &dyn EventSink,
    ) -> ReagentResult<Self> {
        let record = IngredientRecord::build(series, uid, inventory)?;

        // Both models run unconditionally; each concentration vector is
        // tagged with the model whose volume it divides by.
        let full_volume = volume::full_volume(&record, sink);
        let solvent_volume = volume::solvent_volume(&record, sink);
        let full_volume_conc =
            calculate_concentrations(&record, &full_volume, FULL_VOLUME_MODEL, sink)?;
        let solvent_volume_conc =
            calculate_concentrations(&record, &solvent_volume, SOLVENT_VOLUME_MODEL, sink)?;

        Ok(Self {
            record,
            full_volume,
            solvent_volume,
            full_volume_conc,
            solvent_volume_conc,
        })
    }

    pub fn uid(&self) -> &str {
        self.record.uid()
    }

    pub fn record(&self) -> &IngredientRecord {
        &self.record
    }

    /// InChIKeys in slot order.
    pub fn inchikeys(&self) -> Vec<String> {
        self.record.inchikeys()
    }

    /// Canonical SMILES strings in slot order.
    pub fn smiles(&self) -> Vec<String> {
        self.record.smiles()
    }

    pub fn full_volume(&self) -> &VolumeEstimate {
        &self.full_volume
    }

    pub fn solvent_volume(&self) -> &VolumeEstimate {
        &self.solvent_volume
    }

    /// The total solution volume used by downstream dataset assembly;
    /// currently the full-volume model's estimate.
    pub fn total_volume_ml(&self) -> f64 {
        self.full_volume.milliliters
    }

    pub fn full_volume_concentrations(&self) -> &ConcentrationVector {
        &self.full_volume_conc
    }

    pub fn solvent_volume_concentrations(&self) -> &ConcentrationVector {
        &self.solvent_volume_conc
    }

    /// The designated default concentration vector (the full-volume
    /// model's).
    pub fn default_concentrations(&self) -> &ConcentrationVector {
        &self.full_volume_conc
    }

    /// Serializable snapshot for downstream dataset assembly.
    pub fn summary(&self) -> IngredientSummary {
        IngredientSummary {
            uid: self.uid().to_string(),
            inchikeys: self.inchikeys(),
            smiles: self.smiles(),
            full_volume_ml: self.full_volume.milliliters,
            solvent_volume_ml: self.solvent_volume.milliliters,
            full_volume_conc: self.full_volume_conc.clone(),
            solvent_volume_conc: self.solvent_volume_conc.clone(),
            default_model: FULL_VOLUME_MODEL.to_string(),
        }
    }
}

/// Flat, serializable view of one processed ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSummary {
    pub uid: String,
    pub inchikeys: Vec<String>,
    pub smiles: Vec<String>,
    pub full_volume_ml: f64,
    pub solvent_volume_ml: f64,
    pub full_volume_conc: ConcentrationVector,
    pub solvent_volume_conc: ConcentrationVector,
    pub default_model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;
    use crate::inventory::InventoryEntry;
    use rf_core::numeric::{Tolerances, nearly_equal};

    fn series(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn inventory() -> ChemicalInventory {
        let mut inv = ChemicalInventory::new();
        inv.insert(
            "KEY-WATER",
            InventoryEntry::new(18.0, 1.0, "solvent", "water", "O").unwrap(),
        );
        inv.insert(
            "KEY-SOLUTE",
            InventoryEntry::new(100.0, 1.5, "organic", "solute", "CCO").unwrap(),
        );
        inv
    }

    #[test]
    fn orchestrates_both_models() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-WATER"),
            ("_r_chemicals_0_actual_amount", "18"),
            ("_r_chemicals_0_actual_amount_units", "milliliter"),
            ("_r_chemicals_1_inchikey", "KEY-SOLUTE"),
            ("_r_chemicals_1_actual_amount", "5"),
            ("_r_chemicals_1_actual_amount_units", "gram"),
        ]);
        let sink = MemorySink::new();

        let ingredient =
            CompoundIngredient::with_sink(&series, "run_reagent_0", &inventory(), &sink).unwrap();

        let tol = Tolerances::default();
        assert!(nearly_equal(ingredient.total_volume_ml(), 18.0 + 5.0 / 1.5, tol));
        assert!(nearly_equal(ingredient.solvent_volume().milliliters, 18.0, tol));
        assert_eq!(ingredient.inchikeys(), vec!["KEY-WATER", "KEY-SOLUTE"]);
        assert_eq!(ingredient.smiles(), vec!["O", "CCO"]);

        // Same slot count everywhere.
        assert_eq!(ingredient.full_volume_concentrations().len(), 2);
        assert_eq!(ingredient.solvent_volume_concentrations().len(), 2);

        // Default is the full-volume model's vector.
        assert_eq!(
            ingredient.default_concentrations(),
            ingredient.full_volume_concentrations()
        );
        assert!(nearly_equal(
            ingredient.default_concentrations().values[1],
            2.34375,
            tol
        ));
        // Solvent model divides by 18 mL instead.
        assert!(nearly_equal(
            ingredient.solvent_volume_concentrations().values[1],
            5.0 / 100.0 / 0.018,
            tol
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn summary_is_serializable() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-WATER"),
            ("_r_chemicals_0_actual_amount", "18"),
            ("_r_chemicals_0_actual_amount_units", "milliliter"),
        ]);
        let ingredient = CompoundIngredient::new(&series, "run_reagent_1", &inventory()).unwrap();

        let summary = ingredient.summary();
        let json = serde_json::to_string(&summary).unwrap();
        let back: IngredientSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
        assert_eq!(back.default_model, FULL_VOLUME_MODEL);
        assert_eq!(back.uid, "run_reagent_1");
    }

    #[test]
    fn validation_failure_yields_no_result() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-UNKNOWN"),
            ("_r_chemicals_0_actual_amount", "1"),
            ("_r_chemicals_0_actual_amount_units", "gram"),
        ]);
        let result = CompoundIngredient::new(&series, "run_reagent_2", &inventory());
        assert!(result.is_err());
    }
}
