//! One sequential pass over the call list.
mod report;
mod runner;

pub use report::CycleReport;
pub use runner::CycleRunner;
