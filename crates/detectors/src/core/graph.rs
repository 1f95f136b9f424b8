//! Immutable contract graph consumed by the detectors.
//!
//! The graph is an arena of contracts addressed by index. The front end builds
//! it once; analysis only ever takes `&ContractGraph`, so a batch of contracts
//! can be scanned in parallel without coordination.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a contract inside a [`ContractGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub usize);

/// Source position carried through to diagnostics untouched. The core never
/// interprets it; rendering belongs to the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl SourceSpan {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One declared base of a contract, in source order. `target` is `None` when
/// the base could not be resolved to a known definition (e.g. an interface
/// from an unavailable import); such edges are skipped during traversal.
#[derive(Debug, Clone)]
pub struct InheritanceEdge {
    pub parent_name: String,
    pub target: Option<ContractId>,
}

/// A state variable as the front end saw it. A contract's variable list may
/// contain inherited copies; `owner` always points at the contract that
/// directly declares the variable, so attribution stays unique across any
/// number of descendants. `owner == None` only occurs on malformed input.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub owner: Option<ContractId>,
    pub location: SourceSpan,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub is_implemented: bool,
}

#[derive(Debug, Clone)]
pub struct Modifier {
    pub name: String,
    pub is_implemented: bool,
}

/// Uniform view over the heterogeneous function/modifier collections: the
/// only capability the detectors care about is whether a body exists.
pub trait Implementable {
    fn is_implemented(&self) -> bool;
}

impl Implementable for Function {
    fn is_implemented(&self) -> bool {
        self.is_implemented
    }
}

impl Implementable for Modifier {
    fn is_implemented(&self) -> bool {
        self.is_implemented
    }
}

#[derive(Debug, Clone)]
pub struct Contract {
    pub id: ContractId,
    pub name: String,
    pub inheritance: Vec<InheritanceEdge>,
    pub variables: Vec<Variable>,
    pub functions: Vec<Function>,
    pub modifiers: Vec<Modifier>,
}

impl Contract {
    /// True when at least one function or modifier has an implemented body.
    /// A contract that is pure declarations has no runtime behavior that
    /// shadowing could break.
    pub fn has_executable_logic(&self) -> bool {
        self.functions
            .iter()
            .map(|f| f as &dyn Implementable)
            .chain(self.modifiers.iter().map(|m| m as &dyn Implementable))
            .any(Implementable::is_implemented)
    }

    /// Variables this contract declares itself, skipping inherited copies.
    pub fn owned_variables(&self) -> impl Iterator<Item = &Variable> {
        let id = self.id;
        self.variables.iter().filter(move |v| v.owner == Some(id))
    }
}

/// Arena of contracts. Mutators are for graph construction only; ids passed
/// to them must come from `add_contract` on the same graph.
#[derive(Debug, Clone, Default)]
pub struct ContractGraph {
    contracts: Vec<Contract>,
}

impl ContractGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contract(&mut self, name: impl Into<String>) -> ContractId {
        let id = ContractId(self.contracts.len());
        self.contracts.push(Contract {
            id,
            name: name.into(),
            inheritance: Vec::new(),
            variables: Vec::new(),
            functions: Vec::new(),
            modifiers: Vec::new(),
        });
        id
    }

    pub fn add_inheritance(&mut self, child: ContractId, parent: ContractId) {
        let parent_name = self.contracts[parent.0].name.clone();
        self.contracts[child.0].inheritance.push(InheritanceEdge {
            parent_name,
            target: Some(parent),
        });
    }

    /// Records a base that has no known definition. Kept by name so the
    /// reporting layer can still mention it; traversal skips it.
    pub fn add_unresolved_inheritance(&mut self, child: ContractId, parent_name: impl Into<String>) {
        self.contracts[child.0].inheritance.push(InheritanceEdge {
            parent_name: parent_name.into(),
            target: None,
        });
    }

    /// Adds a variable directly declared by `contract`.
    pub fn add_variable(
        &mut self,
        contract: ContractId,
        name: impl Into<String>,
        location: SourceSpan,
    ) {
        self.contracts[contract.0].variables.push(Variable {
            name: name.into(),
            owner: Some(contract),
            location,
        });
    }

    /// Adds an inherited copy of a variable to `contract`'s list, attributed
    /// to `owner` (the declaring ancestor, or whatever the front end produced
    /// for malformed input).
    pub fn add_inherited_variable(
        &mut self,
        contract: ContractId,
        name: impl Into<String>,
        location: SourceSpan,
        owner: Option<ContractId>,
    ) {
        self.contracts[contract.0].variables.push(Variable {
            name: name.into(),
            owner,
            location,
        });
    }

    pub fn add_function(
        &mut self,
        contract: ContractId,
        name: impl Into<String>,
        is_implemented: bool,
    ) {
        self.contracts[contract.0].functions.push(Function {
            name: name.into(),
            is_implemented,
        });
    }

    pub fn add_modifier(
        &mut self,
        contract: ContractId,
        name: impl Into<String>,
        is_implemented: bool,
    ) {
        self.contracts[contract.0].modifiers.push(Modifier {
            name: name.into(),
            is_implemented,
        });
    }

    /// Looks a contract up by id, returning `None` for dangling references.
    pub fn contract(&self, id: ContractId) -> Option<&Contract> {
        self.contracts.get(id.0)
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_logic_requires_a_body() {
        let mut graph = ContractGraph::new();
        let c = graph.add_contract("Abstract");
        graph.add_function(c, "transfer", false);
        graph.add_modifier(c, "onlyOwner", false);
        assert!(!graph.contract(c).unwrap().has_executable_logic());

        graph.add_modifier(c, "whenNotPaused", true);
        assert!(graph.contract(c).unwrap().has_executable_logic());
    }

    #[test]
    fn test_owned_variables_skip_inherited_copies() {
        let mut graph = ContractGraph::new();
        let base = graph.add_contract("Base");
        let derived = graph.add_contract("Derived");
        graph.add_variable(derived, "total", SourceSpan::new("d.sol", 3, 5));
        graph.add_inherited_variable(derived, "owner", SourceSpan::new("b.sol", 2, 5), Some(base));

        let derived = graph.contract(derived).unwrap();
        let owned: Vec<_> = derived.owned_variables().map(|v| v.name.as_str()).collect();
        assert_eq!(owned, vec!["total"]);
    }
}
