pub mod amount;
pub mod csv;
pub mod directory;
pub mod engine;
pub mod model;
pub mod persist;

pub use amount::Amount;
pub use engine::{CompensationBreakdown, Engine, compute_breakdown};
pub use model::{CompensationInput, Edit, EmployeeId};
