//! Chemical-slot field extraction.
//!
//! Raw experiment records arrive as a flat map of loosely-keyed fields:
//!
//! ```text
//! _raw_reagent_2_chemicals_0_inchikey             VAWHFUNJDMQUSB-UHFFFAOYSA-N
//! _raw_reagent_2_chemicals_0_actual_amount        2.16
//! _raw_reagent_2_chemicals_0_actual_amount_units  gram
//! _raw_reagent_2_chemicals_1_inchikey             ...
//! ```
//!
//! Fields are grouped by the integer slot ordinal embedded in the key and
//! zipped per slot, never by string sort order. String-sorted alignment
//! silently breaks once slot 10 exists ("..._10_..." sorts before
//! "..._2_..."); grouping by parsed ordinal removes that failure mode.

use crate::error::{ReagentError, ReagentResult};
use crate::units::AmountUnit;
use std::collections::BTreeMap;

const CHEMICALS_MARKER: &str = "_chemicals_";
const IDENTIFIER_SUFFIX: &str = "_inchikey";
const AMOUNT_SUFFIX: &str = "_amount";
const AMOUNT_UNITS_SUFFIX: &str = "_amount_units";

/// Raw fields of one chemical slot, before the inventory join.
#[derive(Debug, Clone)]
pub struct RawChemical {
    pub slot: u32,
    pub inchikey: String,
    pub amount: f64,
    pub unit: AmountUnit,
}

#[derive(Debug, Clone, Default)]
struct SlotFields {
    inchikey: Option<String>,
    amount: Option<f64>,
    unit: Option<AmountUnit>,
}

enum FieldRole {
    Identifier,
    Amount,
    AmountUnits,
}

/// Extract the chemical slots of one ingredient from its raw field map.
///
/// Keys without the `_chemicals_` marker are ignored (instruction fields,
/// run metadata). Per-chemical keys with an unrecognized suffix are also
/// ignored; only identifier, amount, and amount-unit fields participate.
///
/// Fails with [`ReagentError::Validation`] when a slot ordinal is not an
/// integer, a role appears twice in one slot, a slot is missing a role,
/// an amount does not parse to a finite positive number, or no chemical
/// slots exist at all.
pub fn extract_slots(
    series: &BTreeMap<String, String>,
    ingredient: &str,
) -> ReagentResult<Vec<RawChemical>> {
    let mut slots: BTreeMap<u32, SlotFields> = BTreeMap::new();

    for (key, value) in series {
        let Some(marker_pos) = key.find(CHEMICALS_MARKER) else {
            continue;
        };
        let tail = &key[marker_pos + CHEMICALS_MARKER.len()..];
        let ordinal_text = tail.split('_').next().unwrap_or_default();
        let slot: u32 = ordinal_text.parse().map_err(|_| validation(
            ingredient,
            format!("field '{key}' has no integer slot ordinal after '{CHEMICALS_MARKER}'"),
        ))?;

        // Suffix order matters: "_amount_units" also ends with "_amount"'s
        // sibling patterns, so test the longer suffix first.
        let role = if key.ends_with(AMOUNT_UNITS_SUFFIX) {
            FieldRole::AmountUnits
        } else if key.ends_with(AMOUNT_SUFFIX) {
            FieldRole::Amount
        } else if key.ends_with(IDENTIFIER_SUFFIX) {
            FieldRole::Identifier
        } else {
            continue;
        };

        let fields = slots.entry(slot).or_default();
        match role {
            FieldRole::Identifier => {
                if fields.inchikey.replace(value.trim().to_string()).is_some() {
                    return Err(validation(
                        ingredient,
                        format!("slot {slot} has more than one identifier field"),
                    ));
                }
            }
            FieldRole::Amount => {
                let amount = parse_amount(value, slot, key, ingredient)?;
                if fields.amount.replace(amount).is_some() {
                    return Err(validation(
                        ingredient,
                        format!("slot {slot} has more than one amount field"),
                    ));
                }
            }
            FieldRole::AmountUnits => {
                if fields.unit.replace(AmountUnit::parse(value)).is_some() {
                    return Err(validation(
                        ingredient,
                        format!("slot {slot} has more than one amount-unit field"),
                    ));
                }
            }
        }
    }

    if slots.is_empty() {
        return Err(validation(
            ingredient,
            "no chemical-slot fields present".to_string(),
        ));
    }

    // BTreeMap iteration gives ascending slot order for free.
    let mut chemicals = Vec::with_capacity(slots.len());
    for (slot, fields) in slots {
        let have = (
            fields.inchikey.is_some(),
            fields.amount.is_some(),
            fields.unit.is_some(),
        );
        match (fields.inchikey, fields.amount, fields.unit) {
            (Some(inchikey), Some(amount), Some(unit)) => chemicals.push(RawChemical {
                slot,
                inchikey,
                amount,
                unit,
            }),
            _ => {
                return Err(validation(
                    ingredient,
                    format!(
                        "slot {slot} is incomplete: identifier={}, amount={}, unit={}",
                        have.0, have.1, have.2
                    ),
                ));
            }
        }
    }
    Ok(chemicals)
}

fn parse_amount(value: &str, slot: u32, key: &str, ingredient: &str) -> ReagentResult<f64> {
    let amount: f64 = value.trim().parse().map_err(|_| {
        validation(
            ingredient,
            format!("slot {slot} amount '{value}' in field '{key}' is not a number"),
        )
    })?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(validation(
            ingredient,
            format!("slot {slot} amount {amount} must be a finite positive number"),
        ));
    }
    Ok(amount)
}

fn validation(ingredient: &str, reason: String) -> ReagentError {
    ReagentError::Validation {
        ingredient: ingredient.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn extracts_slots_in_ordinal_order() {
        let series = series(&[
            ("_raw_reagent_2_chemicals_1_inchikey", "KEY-B"),
            ("_raw_reagent_2_chemicals_1_actual_amount", "3.5"),
            ("_raw_reagent_2_chemicals_1_actual_amount_units", "milliliter"),
            ("_raw_reagent_2_chemicals_0_inchikey", "KEY-A"),
            ("_raw_reagent_2_chemicals_0_actual_amount", "2.16"),
            ("_raw_reagent_2_chemicals_0_actual_amount_units", "gram"),
            ("_raw_reagent_2_instructions_2_volume", "5.4"),
            ("name", "2020-01-23_LBL_C9"),
        ]);

        let chems = extract_slots(&series, "r2").unwrap();
        assert_eq!(chems.len(), 2);
        assert_eq!(chems[0].slot, 0);
        assert_eq!(chems[0].inchikey, "KEY-A");
        assert_eq!(chems[0].unit, AmountUnit::Gram);
        assert_eq!(chems[1].slot, 1);
        assert_eq!(chems[1].inchikey, "KEY-B");
        assert_eq!(chems[1].unit, AmountUnit::Milliliter);
    }

    #[test]
    fn double_digit_slots_sort_numerically() {
        let mut pairs = Vec::new();
        for slot in [0, 2, 10] {
            pairs.push((format!("_r_chemicals_{slot}_inchikey"), format!("KEY-{slot}")));
            pairs.push((format!("_r_chemicals_{slot}_actual_amount"), "1.0".to_string()));
            pairs.push((
                format!("_r_chemicals_{slot}_actual_amount_units"),
                "gram".to_string(),
            ));
        }
        let series: BTreeMap<String, String> = pairs.into_iter().collect();

        // String-sorted keys would yield 0, 10, 2.
        let chems = extract_slots(&series, "r").unwrap();
        let slots: Vec<u32> = chems.iter().map(|c| c.slot).collect();
        assert_eq!(slots, vec![0, 2, 10]);
        assert_eq!(chems[2].inchikey, "KEY-10");
    }

    #[test]
    fn missing_unit_field_is_fatal() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-A"),
            ("_r_chemicals_0_actual_amount", "2.0"),
        ]);
        let err = extract_slots(&series, "r9").unwrap_err();
        assert!(matches!(err, ReagentError::Validation { .. }));
        assert!(err.to_string().contains("r9"));
        assert!(err.to_string().contains("slot 0"));
    }

    #[test]
    fn duplicate_role_is_fatal() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-A"),
            ("_r_chemicals_0_nominal_amount", "2.0"),
            ("_r_chemicals_0_actual_amount", "2.1"),
            ("_r_chemicals_0_actual_amount_units", "gram"),
        ]);
        let err = extract_slots(&series, "r").unwrap_err();
        assert!(err.to_string().contains("more than one amount field"));
    }

    #[test]
    fn non_numeric_amount_is_fatal() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-A"),
            ("_r_chemicals_0_actual_amount", "plenty"),
            ("_r_chemicals_0_actual_amount_units", "gram"),
        ]);
        let err = extract_slots(&series, "r").unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn non_positive_amount_is_fatal() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-A"),
            ("_r_chemicals_0_actual_amount", "-3"),
            ("_r_chemicals_0_actual_amount_units", "gram"),
        ]);
        assert!(extract_slots(&series, "r").is_err());
    }

    #[test]
    fn non_integer_slot_ordinal_is_fatal() {
        let series = series(&[
            ("_r_chemicals_first_inchikey", "KEY-A"),
        ]);
        assert!(extract_slots(&series, "r").is_err());
    }

    #[test]
    fn no_chemical_fields_is_fatal() {
        let series = series(&[("_r_instructions_0_volume", "5.4"), ("name", "run")]);
        let err = extract_slots(&series, "r").unwrap_err();
        assert!(err.to_string().contains("no chemical-slot fields"));
    }

    #[test]
    fn unknown_unit_text_is_not_fatal() {
        let series = series(&[
            ("_r_chemicals_0_inchikey", "KEY-A"),
            ("_r_chemicals_0_actual_amount", "2.0"),
            ("_r_chemicals_0_actual_amount_units", "pinch"),
        ]);
        let chems = extract_slots(&series, "r").unwrap();
        assert_eq!(chems[0].unit, AmountUnit::Other("pinch".into()));
    }
}
