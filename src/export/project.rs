use serde::{Deserialize, Serialize};

use crate::export::settings::FieldFlags;
use crate::model::{
    AutomationStatus, LifecycleState, Outcome, SuiteKind, TestCase, TestPlan, TestSuite,
};

/// A case as it appears in an export: identity always, the rest on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedCase {
    pub id: String,
    pub name: String,
    pub state: LifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_status: Option<AutomationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_executed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

/// Keep `value` only when its flag is on; absent values stay absent.
fn pick<T: Clone>(enabled: bool, value: &Option<T>) -> Option<T> {
    if enabled { value.clone() } else { None }
}

/// Project a case down to the enabled fields.
pub fn project_fields(case: &TestCase, fields: &FieldFlags) -> ProjectedCase {
    ProjectedCase {
        id: case.id.clone(),
        name: case.name.clone(),
        state: case.state,
        description: pick(fields.description, &case.description),
        preconditions: pick(fields.preconditions, &case.preconditions),
        steps: pick(fields.steps, &case.steps),
        expected_result: pick(fields.expected_result, &case.expected_result),
        variables: pick(fields.variables, &case.variables),
        tags: pick(fields.tags, &case.tags),
        priority: fields.priority.then_some(case.priority),
        automation_status: pick(fields.automation_status, &case.automation_status),
        last_executed: pick(fields.last_executed, &case.last_executed),
        outcome: pick(fields.outcome, &case.outcome),
    }
}

/// A plan's own attributes, without its suites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPlan {
    pub id: String,
    pub name: String,
    pub state: LifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl From<&TestPlan> for ProjectedPlan {
    fn from(plan: &TestPlan) -> Self {
        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            state: plan.state,
            description: plan.description.clone(),
            start_date: plan.start_date.clone(),
            end_date: plan.end_date.clone(),
        }
    }
}

/// A suite's own attributes, without cases or child suites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSuite {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SuiteKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&TestSuite> for ProjectedSuite {
    fn from(suite: &TestSuite) -> Self {
        Self {
            id: suite.id.clone(),
            name: suite.name.clone(),
            kind: suite.kind,
            description: suite.description.clone(),
        }
    }
}
