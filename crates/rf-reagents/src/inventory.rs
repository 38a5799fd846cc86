//! In-memory chemical-property inventory.
//!
//! One row per chemical, keyed by InChIKey. How the rows get here
//! (lab inventory sheets, database exports) is the caller's problem;
//! this crate only consumes the assembled table.

use rf_core::RfResult;
use rf_core::numeric::ensure_positive;
use rf_core::units::{Density, MolarMass, g_per_ml, g_per_mol};
use std::collections::HashMap;

/// Properties of one chemical, as recorded in a lab inventory.
#[derive(Debug, Clone)]
pub struct InventoryEntry {
    pub molar_mass: MolarMass,
    pub density: Density,
    /// Free-text classification, e.g. "solvent", "organic", "inorganic".
    pub category: String,
    pub name: String,
    /// Canonical SMILES string for the structure.
    pub smiles: String,
}

impl InventoryEntry {
    /// Build an entry from inventory-sheet scalars (g/mol and g/mL).
    ///
    /// Density is required even for liquids: the volume-model fallbacks
    /// convert between mass and volume for any category of chemical.
    pub fn new(
        molar_mass_g_mol: f64,
        density_g_ml: f64,
        category: impl Into<String>,
        name: impl Into<String>,
        smiles: impl Into<String>,
    ) -> RfResult<Self> {
        Ok(Self {
            molar_mass: g_per_mol(ensure_positive(molar_mass_g_mol, "molecular weight")?),
            density: g_per_ml(ensure_positive(density_g_ml, "density")?),
            category: category.into(),
            name: name.into(),
            smiles: smiles.into(),
        })
    }
}

/// Chemical inventory of one dataset, keyed by InChIKey.
#[derive(Debug, Clone, Default)]
pub struct ChemicalInventory {
    entries: HashMap<String, InventoryEntry>,
}

impl ChemicalInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the row for one chemical.
    pub fn insert(&mut self, inchikey: impl Into<String>, entry: InventoryEntry) {
        self.entries.insert(inchikey.into(), entry);
    }

    /// Look up one chemical by InChIKey.
    pub fn get(&self, inchikey: &str) -> Option<&InventoryEntry> {
        self.entries.get(inchikey)
    }

    pub fn contains(&self, inchikey: &str) -> bool {
        self.entries.contains_key(inchikey)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
