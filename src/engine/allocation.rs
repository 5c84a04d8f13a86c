//! Splits gross pay into earning components.

use crate::Amount;
use crate::model::{ComponentConfig, ComponentKey, Components, InputMode, PayStructure};

/// Allocate `gross` (current period) across the earning components.
///
/// - Hourly: everything is Basic.
/// - Percentage: proportional to each weight over the sum of all weights,
///   so weights need not add up to 100. A zero sum allocates nothing.
/// - Amount: each component takes its fixed amount and `gross` is ignored.
pub fn allocate(
    gross: Amount,
    structure: &PayStructure,
    config: &ComponentConfig,
) -> Components<Amount> {
    match structure {
        PayStructure::Hourly { .. } => Components::from_fn(|key| match key {
            ComponentKey::Basic => gross,
            _ => Amount::ZERO,
        }),
        PayStructure::Salaried {
            input_mode: InputMode::Percentage,
        } => {
            let total_pct: f64 = config.values().map(|share| share.percentage).sum();
            if total_pct > 0.0 {
                Components::from_fn(|key| gross.mul_ratio(config[key].percentage, total_pct))
            } else {
                Components::default()
            }
        }
        PayStructure::Salaried {
            input_mode: InputMode::Amount,
        } => Components::from_fn(|key| config[key].fixed_amount),
    }
}
