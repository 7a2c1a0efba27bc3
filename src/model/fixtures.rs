use crate::model::{
    AutomationStatus, LifecycleState, Outcome, SuiteKind, TestCase, TestPlan, TestSuite,
};

pub fn case(id: &str, name: &str, priority: u32, outcome: Option<Outcome>) -> TestCase {
    TestCase {
        id: id.into(),
        name: name.into(),
        state: LifecycleState::Active,
        priority,
        description: Some(format!("Verify {}", name.to_lowercase())),
        preconditions: None,
        steps: Some("1. Open the page\n2. Act".into()),
        expected_result: Some("It works".into()),
        variables: None,
        tags: None,
        automation_status: Some(AutomationStatus::Automated),
        last_executed: Some("2024-01-10".into()),
        outcome,
    }
}

pub fn bare_case(id: &str, name: &str, priority: u32) -> TestCase {
    TestCase {
        id: id.into(),
        name: name.into(),
        state: LifecycleState::Active,
        priority,
        description: None,
        preconditions: None,
        steps: None,
        expected_result: None,
        variables: None,
        tags: None,
        automation_status: None,
        last_executed: None,
        outcome: None,
    }
}

pub fn suite(id: &str, name: &str, cases: Vec<TestCase>, children: Vec<TestSuite>) -> TestSuite {
    TestSuite {
        id: id.into(),
        name: name.into(),
        kind: SuiteKind::StaticTestSuite,
        description: None,
        test_cases: cases,
        child_suites: children,
    }
}

pub fn plan(id: &str, name: &str, suites: Vec<TestSuite>) -> TestPlan {
    TestPlan {
        id: id.into(),
        name: name.into(),
        state: LifecycleState::Active,
        description: None,
        start_date: None,
        end_date: None,
        test_suites: suites,
    }
}

/// One plan, two flat suites, three cases.
pub fn small_forest() -> Vec<TestPlan> {
    vec![plan(
        "tp-1",
        "Web Application",
        vec![
            suite(
                "ts-1",
                "Authentication",
                vec![
                    case("tc-1", "Login with valid credentials", 1, Some(Outcome::Passed)),
                    case("tc-2", "Login with invalid credentials", 2, Some(Outcome::Failed)),
                ],
                vec![],
            ),
            suite(
                "ts-2",
                "UI",
                vec![case("tc-3", "Navigation menu", 2, Some(Outcome::Passed))],
                vec![],
            ),
        ],
    )]
}

pub fn sample_forest() -> Vec<TestPlan> {
    let mut web = plan(
        "tp-1",
        "Web Application Test Plan",
        vec![
            suite(
                "ts-1",
                "Authentication Tests",
                vec![
                    case("tc-1", "Login with valid credentials", 1, Some(Outcome::Passed)),
                    case("tc-2", "Login with invalid credentials", 2, Some(Outcome::Passed)),
                    case("tc-3", "Password reset functionality", 2, Some(Outcome::NotExecuted)),
                ],
                vec![],
            ),
            suite(
                "ts-2",
                "UI Tests",
                vec![
                    case("tc-4", "Navigation menu functionality", 2, Some(Outcome::Failed)),
                    case("tc-5", "Form validation", 1, Some(Outcome::Passed)),
                ],
                vec![suite(
                    "ts-3",
                    "Mobile UI Tests",
                    vec![case("tc-6", "Responsive design validation", 2, Some(Outcome::Blocked))],
                    vec![],
                )],
            ),
        ],
    );
    web.description = Some("Comprehensive testing plan for the web application".into());
    web.start_date = Some("2024-01-15".into());

    let api = plan(
        "tp-2",
        "API Test Plan",
        vec![suite(
            "ts-4",
            "REST API Tests",
            vec![
                case("tc-7", "GET endpoint validation", 1, Some(Outcome::Passed)),
                case("tc-8", "POST endpoint validation", 1, Some(Outcome::Passed)),
                case("tc-9", "Authentication headers", 2, Some(Outcome::NotExecuted)),
            ],
            vec![],
        )],
    );

    let mut perf = plan(
        "tp-3",
        "Performance Test Plan",
        vec![suite(
            "ts-5",
            "Load Tests",
            vec![case("tc-10", "Concurrent user load test", 1, Some(Outcome::NotExecuted))],
            vec![],
        )],
    );
    perf.state = LifecycleState::Inactive;

    vec![web, api, perf]
}
