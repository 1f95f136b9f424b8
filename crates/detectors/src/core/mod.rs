//! Core model and graph infrastructure for the detectors.
//!
//! The contract graph is the single input to every detector: an arena of
//! contracts with their declared inheritance edges, variables, functions and
//! modifiers, built once by the front end and treated as read-only here.

pub mod error;
pub mod graph;
pub mod inheritance;

pub use error::AnalysisError;
pub use graph::{
    Contract, ContractGraph, ContractId, Function, Implementable, InheritanceEdge, Modifier,
    SourceSpan, Variable,
};
pub use inheritance::InheritanceResolver;
