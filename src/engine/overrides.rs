use crate::Amount;
use crate::engine::statutory::CalculatedValues;
use crate::model::{Deductions, ManualOverrides};

/// A manual value, when present, wins over the calculated one.
pub fn resolve(calculated: Amount, manual: Option<Amount>) -> Amount {
    manual.unwrap_or(calculated)
}

/// Effective value of every deduction-side field.
pub fn resolve_all(calculated: &CalculatedValues, overrides: &ManualOverrides) -> Deductions<Amount> {
    Deductions::from_fn(|key| resolve(calculated.get(key), overrides.get(key)))
}
