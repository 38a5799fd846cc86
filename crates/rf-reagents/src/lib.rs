//! rf-reagents: per-ingredient concentration calculations for reagentflow.
//!
//! Provides:
//! - Chemical-slot field extraction from loosely-keyed raw records
//! - In-memory chemical-property inventory (keyed by InChIKey)
//! - Slot-ordered ingredient records joined against the inventory
//! - Two solution-volume models (full volume, solvent volume with fallback)
//! - Molar concentration vectors per volume model
//! - `CompoundIngredient`, the immutable per-ingredient result object
//!
//! # Architecture
//!
//! The pipeline is a pure, single-pass transformation: raw fields are
//! grouped into integer-indexed chemical slots, joined against the
//! inventory into an `IngredientRecord`, reduced to two volume estimates,
//! and expanded into one concentration vector per estimate. Nothing is
//! mutated after construction, so many ingredients can be processed
//! concurrently by the caller without coordination.
//!
//! Data-quality observations (unusual units, missing solvents) are not
//! errors; they flow through an injected [`EventSink`] so callers can log,
//! collect, or ignore them.
//!
//! # Example
//!
//! ```
//! use rf_reagents::{ChemicalInventory, CompoundIngredient, InventoryEntry};
//! use std::collections::BTreeMap;
//!
//! let mut inventory = ChemicalInventory::new();
//! inventory.insert(
//!     "XLYOFNOQVPJJNP-UHFFFAOYSA-N",
//!     InventoryEntry::new(18.015, 1.0, "solvent", "water", "O").unwrap(),
//! );
//!
//! let mut series = BTreeMap::new();
//! series.insert("_raw_reagent_0_chemicals_0_inchikey".into(), "XLYOFNOQVPJJNP-UHFFFAOYSA-N".into());
//! series.insert("_raw_reagent_0_chemicals_0_actual_amount".into(), "18".into());
//! series.insert("_raw_reagent_0_chemicals_0_actual_amount_units".into(), "milliliter".into());
//!
//! let ingredient = CompoundIngredient::new(&series, "run_x_reagent_0", &inventory).unwrap();
//! assert!((ingredient.full_volume().milliliters - 18.0).abs() < 1e-9);
//! ```

pub mod concentration;
pub mod error;
pub mod events;
pub mod fields;
pub mod ingredient;
pub mod inventory;
pub mod record;
pub mod units;
pub mod volume;

// Re-exports for ergonomics
pub use concentration::{ConcentrationVector, calculate_concentrations};
pub use error::{ReagentError, ReagentResult};
pub use events::{DataQualityEvent, EventSink, MemorySink, Severity, TracingSink};
pub use fields::{RawChemical, extract_slots};
pub use ingredient::{CompoundIngredient, IngredientSummary};
pub use inventory::{ChemicalInventory, InventoryEntry};
pub use record::{ChemicalEntry, IngredientRecord};
pub use units::{Amount, AmountUnit};
pub use volume::{
    FULL_VOLUME_MODEL, SOLVENT_VOLUME_MODEL, VolumeEstimate, full_volume, solvent_volume,
};
