//! Structured diagnostic records handed to the reporting layer.
//!
//! These carry names and source spans only. Severity, confidence and
//! human-readable rendering are the reporting layer's job, so nothing here
//! formats text or ranks findings.

use crate::core::SourceSpan;
use crate::shadowing::ShadowGroup;
use serde::{Deserialize, Serialize};

/// One occurrence of the shadowed name in a live ancestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowedVariable {
    pub ancestor_contract: String,
    pub ancestor_variable: String,
    pub ancestor_location: SourceSpan,
}

/// A shadowing variable and everything it shadows, in ancestor-traversal
/// order. Field layout is stable for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowDiagnostic {
    pub shadow_contract: String,
    pub shadow_variable: String,
    pub shadow_location: SourceSpan,
    pub shadowed: Vec<ShadowedVariable>,
}

impl ShadowDiagnostic {
    pub fn from_group(group: &ShadowGroup<'_>) -> Self {
        Self {
            shadow_contract: group.shadow.contract.name.clone(),
            shadow_variable: group.shadow.variable.name.clone(),
            shadow_location: group.shadow.variable.location.clone(),
            shadowed: group
                .shadowed
                .iter()
                .map(|entry| ShadowedVariable {
                    ancestor_contract: entry.contract.name.clone(),
                    ancestor_variable: entry.variable.name.clone(),
                    ancestor_location: entry.variable.location.clone(),
                })
                .collect(),
        }
    }
}
