use thiserror::Error;

/// Invariant violations that abort analysis of a single contract. Malformed
/// but recoverable data (unresolved bases, dangling owner references) is
/// skipped instead and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("contract `{contract}` appears in its own inheritance chain")]
    InheritanceCycle { contract: String },

    #[error("variable `{variable}` reachable from contract `{contract}` has no owning contract")]
    UnownedVariable { contract: String, variable: String },
}
