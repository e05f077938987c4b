pub mod chart;
pub mod compare;
pub mod error;
pub mod metrics;
pub mod regression;
pub mod report;
pub mod table;
pub mod thresholds;

pub use error::BenchError;
pub use metrics::{MetricsRow, Protocol};
pub use table::ComparisonTable;
