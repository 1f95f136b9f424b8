//! State-variable shadowing detection.
//!
//! A derived contract that redeclares a state variable already declared in an
//! ancestor creates a second storage slot under the same name; every ancestor
//! function or modifier keeps reading the original slot, so assignments made
//! through the derived declaration never reach it. Only "live" ancestors are
//! considered: if no ancestor function or modifier has an implemented body,
//! there is no runtime behavior the shadowing could break.
//!
//! Matching is exact, case-sensitive name equality with no type, visibility
//! or mutability check. That deliberately trades precision for recall.

use crate::core::{AnalysisError, Contract, ContractGraph, ContractId, InheritanceResolver, Variable};
use std::collections::HashMap;
use tracing::debug;

/// A variable together with the contract that directly declares it.
#[derive(Debug, Clone, Copy)]
pub struct VariableRef<'g> {
    pub contract: &'g Contract,
    pub variable: &'g Variable,
}

/// One shadowing variable of the analyzed contract plus every same-named
/// variable in its live ancestors, in ancestor-traversal order. Borrows from
/// the graph; build diagnostics from it before the borrow ends.
#[derive(Debug, Clone)]
pub struct ShadowGroup<'g> {
    pub shadow: VariableRef<'g>,
    pub shadowed: Vec<VariableRef<'g>>,
}

pub struct ShadowAnalyzer<'g> {
    graph: &'g ContractGraph,
    resolver: InheritanceResolver<'g>,
}

impl<'g> ShadowAnalyzer<'g> {
    pub fn new(graph: &'g ContractGraph) -> Self {
        Self {
            graph,
            resolver: InheritanceResolver::new(graph),
        }
    }

    /// Finds every state variable of `id` that shadows a live ancestor's
    /// variable. Groups come back in the contract's own declaration order;
    /// the shadowed entries inside a group in ancestor-traversal order.
    pub fn detect_shadowing(&self, id: ContractId) -> Result<Vec<ShadowGroup<'g>>, AnalysisError> {
        let Some(contract) = self.graph.contract(id) else {
            return Ok(Vec::new());
        };

        let ancestors = self.resolver.ancestors(id)?;

        // The index has to be complete before matching starts: a group lists
        // every live ancestor's occurrence of the name, not just the first.
        let mut index: HashMap<&'g str, Vec<VariableRef<'g>>> = HashMap::new();
        for ancestor_id in ancestors {
            let Some(ancestor) = self.graph.contract(ancestor_id) else {
                continue;
            };
            if !ancestor.has_executable_logic() {
                continue;
            }
            for variable in &ancestor.variables {
                match variable.owner {
                    None => {
                        return Err(AnalysisError::UnownedVariable {
                            contract: contract.name.clone(),
                            variable: variable.name.clone(),
                        });
                    }
                    Some(owner) if self.graph.contract(owner).is_none() => {
                        debug!(
                            contract = %ancestor.name,
                            variable = %variable.name,
                            "skipping variable with dangling owner reference"
                        );
                    }
                    // Only variables the ancestor declares itself; inherited
                    // copies are attributed to their declaring contract and
                    // would be indexed twice otherwise.
                    Some(owner) if owner == ancestor.id => {
                        index.entry(variable.name.as_str()).or_default().push(VariableRef {
                            contract: ancestor,
                            variable,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let mut groups = Vec::new();
        for variable in &contract.variables {
            match variable.owner {
                None => {
                    return Err(AnalysisError::UnownedVariable {
                        contract: contract.name.clone(),
                        variable: variable.name.clone(),
                    });
                }
                Some(owner) if self.graph.contract(owner).is_none() => {
                    debug!(
                        contract = %contract.name,
                        variable = %variable.name,
                        "skipping variable with dangling owner reference"
                    );
                }
                Some(owner) if owner == id => {
                    if let Some(shadowed) = index.get(variable.name.as_str()) {
                        groups.push(ShadowGroup {
                            shadow: VariableRef {
                                contract,
                                variable,
                            },
                            shadowed: shadowed.clone(),
                        });
                    }
                }
                Some(_) => {}
            }
        }

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceSpan;

    fn span(line: usize) -> SourceSpan {
        SourceSpan::new("test.sol", line, 5)
    }

    #[test]
    fn test_redeclared_variable_is_flagged() {
        let mut graph = ContractGraph::new();
        let base = graph.add_contract("BaseContract");
        graph.add_variable(base, "owner", span(2));
        graph.add_modifier(base, "isOwner", true);
        let derived = graph.add_contract("DerivedContract");
        graph.add_inheritance(derived, base);
        graph.add_variable(derived, "owner", span(10));

        let analyzer = ShadowAnalyzer::new(&graph);
        let groups = analyzer.detect_shadowing(derived).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].shadow.contract.name, "DerivedContract");
        assert_eq!(groups[0].shadow.variable.name, "owner");
        assert_eq!(groups[0].shadowed.len(), 1);
        assert_eq!(groups[0].shadowed[0].contract.name, "BaseContract");
    }

    #[test]
    fn test_dead_ancestor_is_ignored() {
        let mut graph = ContractGraph::new();
        let base = graph.add_contract("BaseContract");
        graph.add_variable(base, "owner", span(2));
        graph.add_function(base, "transfer", false);
        let derived = graph.add_contract("DerivedContract");
        graph.add_inheritance(derived, base);
        graph.add_variable(derived, "owner", span(10));

        let analyzer = ShadowAnalyzer::new(&graph);
        assert!(analyzer.detect_shadowing(derived).unwrap().is_empty());
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let mut graph = ContractGraph::new();
        let base = graph.add_contract("Base");
        graph.add_variable(base, "Owner", span(2));
        graph.add_modifier(base, "isOwner", true);
        let derived = graph.add_contract("Derived");
        graph.add_inheritance(derived, base);
        graph.add_variable(derived, "owner", span(10));

        let analyzer = ShadowAnalyzer::new(&graph);
        assert!(analyzer.detect_shadowing(derived).unwrap().is_empty());
    }

    #[test]
    fn test_inherited_copies_are_not_indexed_twice() {
        // B's variable list carries an inherited copy of A.x; the index for
        // C must still attribute x to A exactly once.
        let mut graph = ContractGraph::new();
        let a = graph.add_contract("A");
        graph.add_variable(a, "x", span(2));
        graph.add_modifier(a, "guard", true);
        let b = graph.add_contract("B");
        graph.add_inheritance(b, a);
        graph.add_function(b, "poke", true);
        graph.add_inherited_variable(b, "x", span(2), Some(a));
        let c = graph.add_contract("C");
        graph.add_inheritance(c, b);
        graph.add_variable(c, "x", span(20));

        let analyzer = ShadowAnalyzer::new(&graph);
        let groups = analyzer.detect_shadowing(c).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].shadowed.len(), 1);
        assert_eq!(groups[0].shadowed[0].contract.name, "A");
    }

    #[test]
    fn test_no_own_variables_yields_nothing() {
        let mut graph = ContractGraph::new();
        let base = graph.add_contract("Base");
        graph.add_variable(base, "owner", span(2));
        graph.add_modifier(base, "isOwner", true);
        let derived = graph.add_contract("Derived");
        graph.add_inheritance(derived, base);
        graph.add_inherited_variable(derived, "owner", span(2), Some(base));

        let analyzer = ShadowAnalyzer::new(&graph);
        assert!(analyzer.detect_shadowing(derived).unwrap().is_empty());
    }

    #[test]
    fn test_unowned_variable_aborts_the_contract() {
        let mut graph = ContractGraph::new();
        let base = graph.add_contract("Base");
        graph.add_modifier(base, "isOwner", true);
        graph.add_inherited_variable(base, "ghost", span(2), None);
        let derived = graph.add_contract("Derived");
        graph.add_inheritance(derived, base);
        graph.add_variable(derived, "owner", span(10));

        let analyzer = ShadowAnalyzer::new(&graph);
        let err = analyzer.detect_shadowing(derived).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::UnownedVariable {
                contract: "Derived".to_string(),
                variable: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_dangling_owner_is_skipped() {
        let mut graph = ContractGraph::new();
        let base = graph.add_contract("Base");
        graph.add_variable(base, "owner", span(2));
        graph.add_modifier(base, "isOwner", true);
        graph.add_inherited_variable(base, "owner", span(3), Some(ContractId(99)));
        let derived = graph.add_contract("Derived");
        graph.add_inheritance(derived, base);
        graph.add_variable(derived, "owner", span(10));

        let analyzer = ShadowAnalyzer::new(&graph);
        let groups = analyzer.detect_shadowing(derived).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].shadowed.len(), 1);
    }
}
