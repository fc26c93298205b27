mod engine;
mod types;

pub use engine::{WITHDRAWAL_RATE, project_series, project_year};
pub use types::{Assumptions, YearSnapshot};
