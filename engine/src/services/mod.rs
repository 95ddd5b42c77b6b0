// Orchestration of a single load-transform-write run
pub mod etl_service;

pub use etl_service::{EtlService, RunSummary};
