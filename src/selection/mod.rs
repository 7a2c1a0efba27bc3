pub mod engine;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The three tiers of the forest a selection can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Plan,
    Suite,
    Case,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Suite => write!(f, "suite"),
            Self::Case => write!(f, "case"),
        }
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan" | "testplan" => Ok(Self::Plan),
            "suite" | "testsuite" => Ok(Self::Suite),
            "case" | "testcase" => Ok(Self::Case),
            other => Err(Error::UnknownNodeKind(other.to_owned())),
        }
    }
}

/// A node addressed by kind and id, written `KIND:ID` on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub kind: NodeKind,
    pub id: String,
}

impl NodeRef {
    pub fn new(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn plan(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Plan, id)
    }

    pub fn suite(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Suite, id)
    }

    pub fn case(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Case, id)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for NodeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidNodeRef(s.to_owned()))?;
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidNodeRef(s.to_owned()));
        }
        Ok(Self::new(kind.trim().parse()?, id))
    }
}

/// Ids currently selected in each tier.
///
/// Replaced wholesale on every transition; the engine never edits one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(rename = "selectedTestPlans")]
    pub plans: BTreeSet<String>,
    #[serde(rename = "selectedTestSuites")]
    pub suites: BTreeSet<String>,
    #[serde(rename = "selectedTestCases")]
    pub cases: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self, kind: NodeKind) -> &BTreeSet<String> {
        match kind {
            NodeKind::Plan => &self.plans,
            NodeKind::Suite => &self.suites,
            NodeKind::Case => &self.cases,
        }
    }

    pub(crate) fn ids_mut(&mut self, kind: NodeKind) -> &mut BTreeSet<String> {
        match kind {
            NodeKind::Plan => &mut self.plans,
            NodeKind::Suite => &mut self.suites,
            NodeKind::Case => &mut self.cases,
        }
    }

    pub fn is_selected(&self, node: &NodeRef) -> bool {
        self.ids(node.kind).contains(&node.id)
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty() && self.suites.is_empty() && self.cases.is_empty()
    }

    /// Export is only offered when something is selected.
    pub fn has_selection(&self) -> bool {
        !self.is_empty()
    }
}
