pub mod chapter;
pub mod severity;
pub mod trend;

pub use chapter::{compliance_by_chapter, distribution_order, progress_order};
pub use severity::severity_matrix;
pub use trend::{monthly_by_chapter, monthly_by_status};
