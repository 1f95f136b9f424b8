//! Batch execution of the detectors over a contract graph.

pub mod engine;

pub use engine::{AnalysisConfig, AnalysisEngine, BatchReport, ContractFailure};
