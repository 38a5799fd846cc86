//! Slot-ordered ingredient records.
//!
//! An [`IngredientRecord`] is the validated, enriched per-chemical table
//! for one ingredient: every raw slot joined with its inventory row, in
//! slot order. It is built once and never mutated; every derived output
//! (volume estimates, concentration vectors) stays index-aligned with it.

use crate::error::{ReagentError, ReagentResult};
use crate::fields::extract_slots;
use crate::inventory::ChemicalInventory;
use crate::units::Amount;
use rf_core::units::{Density, MolarMass, Volume};
use std::collections::BTreeMap;

/// One chemical of an ingredient, joined with its inventory row.
#[derive(Debug, Clone)]
pub struct ChemicalEntry {
    pub inchikey: String,
    pub amount: Amount,
    pub molar_mass: MolarMass,
    pub density: Density,
    pub category: String,
    pub name: String,
    pub smiles: String,
}

impl ChemicalEntry {
    /// Category check used by the solvent-volume model. The inventory
    /// category is free text, so this is a substring match ("solvent",
    /// "Solvent mixture", ...).
    pub fn is_solvent(&self) -> bool {
        self.category.to_ascii_lowercase().contains("solvent")
    }

    /// Estimated volume this entry adds to the solution: volume amounts
    /// pass through, mass amounts convert via density. `None` for
    /// unrecognized units.
    pub fn volume_contribution(&self) -> Option<Volume> {
        match &self.amount {
            Amount::Volume(v) => Some(*v),
            Amount::Mass(m) => Some(*m / self.density),
            Amount::Other { .. } => None,
        }
    }
}

/// The ordered per-chemical table of one ingredient. Immutable once built.
#[derive(Debug, Clone)]
pub struct IngredientRecord {
    uid: String,
    entries: Vec<ChemicalEntry>,
}

impl IngredientRecord {
    /// Build the record for one ingredient: extract the chemical slots
    /// from the raw field map, then join each slot against the inventory.
    ///
    /// Fails with [`ReagentError::Validation`] on misaligned slot fields
    /// or an InChIKey absent from the inventory. No partial record is
    /// produced; a concentration computed from a misaligned table would
    /// be silently wrong.
    pub fn build(
        series: &BTreeMap<String, String>,
        uid: &str,
        inventory: &ChemicalInventory,
    ) -> ReagentResult<Self> {
        let raw = extract_slots(series, uid)?;
        let mut entries = Vec::with_capacity(raw.len());
        for chem in raw {
            let row = inventory
                .get(&chem.inchikey)
                .ok_or_else(|| ReagentError::Validation {
                    ingredient: uid.to_string(),
                    reason: format!(
                        "inchikey '{}' (slot {}) is not in the chemical inventory",
                        chem.inchikey, chem.slot
                    ),
                })?;
            entries.push(ChemicalEntry {
                amount: Amount::new(chem.amount, &chem.unit),
                inchikey: chem.inchikey,
                molar_mass: row.molar_mass,
                density: row.density,
                category: row.category.clone(),
                name: row.name.clone(),
                smiles: row.smiles.clone(),
            });
        }
        Ok(Self::from_parts(uid, entries))
    }

    pub(crate) fn from_parts(uid: &str, entries: Vec<ChemicalEntry>) -> Self {
        Self {
            uid: uid.to_string(),
            entries,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn entries(&self) -> &[ChemicalEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChemicalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// InChIKeys in slot order.
    pub fn inchikeys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.inchikey.clone()).collect()
    }

    /// Canonical SMILES strings in slot order.
    pub fn smiles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.smiles.clone()).collect()
    }
}
