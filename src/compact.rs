//! Label-free edge lists
//!
//! [`compact`] reduces a parsed chart to `(name, num)` pairs and
//! [`increment`] shifts every index by one. Both return new vectors.

use std::fmt;

use serde::Serialize;

use crate::parser::ast::{FlowStep, Flowchart};

/// One endpoint of a compact edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompactStep {
    pub name: String,
    pub num: u64,
}

impl CompactStep {
    pub fn new(name: impl Into<String>, num: u64) -> Self {
        Self {
            name: name.into(),
            num,
        }
    }

    /// Same name, index plus one (saturating at `u64::MAX`)
    pub fn incremented(&self) -> Self {
        Self {
            name: self.name.clone(),
            num: self.num.saturating_add(1),
        }
    }
}

impl From<&FlowStep> for CompactStep {
    fn from(step: &FlowStep) -> Self {
        Self::new(step.var.node.as_str(), step.num.node)
    }
}

impl fmt::Display for CompactStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.num)
    }
}

/// A flow statement with its labels dropped
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompactEdge {
    pub src: CompactStep,
    pub dst: CompactStep,
}

impl CompactEdge {
    pub fn new(src: CompactStep, dst: CompactStep) -> Self {
        Self { src, dst }
    }

    pub fn incremented(&self) -> Self {
        Self {
            src: self.src.incremented(),
            dst: self.dst.incremented(),
        }
    }

    /// Largest index on either end
    pub fn max_num(&self) -> u64 {
        self.src.num.max(self.dst.num)
    }
}

impl<S: Into<String>, D: Into<String>> From<((S, u64), (D, u64))> for CompactEdge {
    fn from(((src, src_num), (dst, dst_num)): ((S, u64), (D, u64))) -> Self {
        Self::new(CompactStep::new(src, src_num), CompactStep::new(dst, dst_num))
    }
}

impl fmt::Display for CompactEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// One edge per statement, in source order
pub fn compact(chart: &Flowchart) -> Vec<CompactEdge> {
    chart
        .flow_statements
        .iter()
        .map(|s| CompactEdge::new(CompactStep::from(&s.src), CompactStep::from(&s.dst)))
        .collect()
}

/// Every index plus one; names and order unchanged
pub fn increment(edges: &[CompactEdge]) -> Vec<CompactEdge> {
    edges.iter().map(CompactEdge::incremented).collect()
}
