//! Ancestor resolution over the inheritance edges.
//!
//! Solidity linearizes `contract C is B` (with `B is A`) so that the
//! base-most contract comes first; the resolver reproduces that order with a
//! post-order depth-first walk over the declared edges. A diamond-shaped
//! ancestor is reported once, at its first-reached position.

use crate::core::error::AnalysisError;
use crate::core::graph::{ContractGraph, ContractId};
use std::collections::HashSet;
use tracing::debug;

pub struct InheritanceResolver<'g> {
    graph: &'g ContractGraph,
}

impl<'g> InheritanceResolver<'g> {
    pub fn new(graph: &'g ContractGraph) -> Self {
        Self { graph }
    }

    /// All distinct ancestors of `id`, base-most first, excluding `id`
    /// itself. Unresolved and dangling edges are skipped; reaching `id`
    /// again means the upstream graph broke the acyclicity invariant.
    pub fn ancestors(&self, id: ContractId) -> Result<Vec<ContractId>, AnalysisError> {
        if self.graph.contract(id).is_none() {
            return Ok(Vec::new());
        }
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        self.visit(id, id, &mut seen, &mut order)?;
        Ok(order)
    }

    fn visit(
        &self,
        current: ContractId,
        root: ContractId,
        seen: &mut HashSet<ContractId>,
        order: &mut Vec<ContractId>,
    ) -> Result<(), AnalysisError> {
        let Some(contract) = self.graph.contract(current) else {
            return Ok(());
        };
        for edge in &contract.inheritance {
            let Some(target) = edge.target else {
                debug!(
                    contract = %contract.name,
                    parent = %edge.parent_name,
                    "skipping unresolved inheritance edge"
                );
                continue;
            };
            if self.graph.contract(target).is_none() {
                debug!(
                    contract = %contract.name,
                    parent = %edge.parent_name,
                    "skipping dangling inheritance edge"
                );
                continue;
            }
            if target == root {
                let name = self
                    .graph
                    .contract(root)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                return Err(AnalysisError::InheritanceCycle { contract: name });
            }
            if seen.insert(target) {
                self.visit(target, root, seen, order)?;
                order.push(target);
            }
        }
        Ok(())
    }
}
