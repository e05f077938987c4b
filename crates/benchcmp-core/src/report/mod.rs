pub mod io;
pub mod model;

pub use io::read_report;
pub use model::{AggregateReport, ArtilleryReport, MetricSummary};
