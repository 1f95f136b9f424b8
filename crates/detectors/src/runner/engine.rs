use crate::core::{AnalysisError, Contract, ContractGraph};
use crate::diagnostics::ShadowDiagnostic;
use crate::shadowing::ShadowAnalyzer;
use rayon::prelude::*;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub parallel_execution: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel_execution: true,
        }
    }
}

/// A contract whose analysis was aborted by an invariant violation. Kept
/// separate from "no shadowing found" so the reporting layer can surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFailure {
    pub contract: String,
    pub error: AnalysisError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    diagnostics: Vec<ShadowDiagnostic>,
    failures: Vec<ContractFailure>,
}

impl BatchReport {
    /// Diagnostics in contract-processing order.
    pub fn diagnostics(&self) -> &[ShadowDiagnostic] {
        &self.diagnostics
    }

    pub fn failures(&self) -> &[ContractFailure] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failures.is_empty()
    }
}

/// Runs shadowing detection over every contract of a graph. Per-contract
/// analyses are independent reads of the immutable graph, so the engine can
/// fan them out with rayon; results are folded back in input order either
/// way, so both modes produce identical reports.
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, graph: &ContractGraph) -> BatchReport {
        let outcomes: Vec<Result<Vec<ShadowDiagnostic>, ContractFailure>> =
            if self.config.parallel_execution {
                graph
                    .contracts()
                    .par_iter()
                    .map(|contract| Self::analyze_contract(graph, contract))
                    .collect()
            } else {
                graph
                    .contracts()
                    .iter()
                    .map(|contract| Self::analyze_contract(graph, contract))
                    .collect()
            };

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(diagnostics) => report.diagnostics.extend(diagnostics),
                Err(failure) => {
                    warn!(
                        contract = %failure.contract,
                        error = %failure.error,
                        "contract analysis aborted"
                    );
                    report.failures.push(failure);
                }
            }
        }
        report
    }

    fn analyze_contract(
        graph: &ContractGraph,
        contract: &Contract,
    ) -> Result<Vec<ShadowDiagnostic>, ContractFailure> {
        let analyzer = ShadowAnalyzer::new(graph);
        match analyzer.detect_shadowing(contract.id) {
            Ok(groups) => Ok(groups.iter().map(ShadowDiagnostic::from_group).collect()),
            Err(error) => Err(ContractFailure {
                contract: contract.name.clone(),
                error,
            }),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
