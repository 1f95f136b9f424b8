//! Kagemi Detectors - State-Variable Shadowing Analysis
//!
//! This crate takes a fully parsed, immutable contract graph and finds state
//! variables that shadow a declaration in a live ancestor: the derived
//! contract gets its own storage slot while the ancestor's logic keeps using
//! the original one, so checks like `require(owner == msg.sender)` silently
//! stop guarding anything.
//!
//! Parsing, detector registration, severity classification and report
//! rendering live outside this crate; it consumes a [`core::ContractGraph`]
//! and emits [`diagnostics::ShadowDiagnostic`] records only.

pub mod core;
pub mod diagnostics;
pub mod runner;
pub mod shadowing;

pub use crate::core::{
    AnalysisError, Contract, ContractGraph, ContractId, Function, Implementable, InheritanceEdge,
    InheritanceResolver, Modifier, SourceSpan, Variable,
};
pub use crate::diagnostics::{ShadowDiagnostic, ShadowedVariable};
pub use crate::runner::{AnalysisConfig, AnalysisEngine, BatchReport, ContractFailure};
pub use crate::shadowing::{ShadowAnalyzer, ShadowGroup, VariableRef};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
