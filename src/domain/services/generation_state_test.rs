use anyhow::Result;

use super::GenerationPhase;
use super::GenerationState;
use crate::domain::models::Event;
use crate::domain::models::SourceRequest;
use crate::domain::models::TestCase;

fn state() -> GenerationState {
    let request: SourceRequest =
        serde_yaml::from_str(test_utils::source_request_fixture()).unwrap();
    return GenerationState::new(request);
}

fn case(uuid: &str) -> TestCase {
    return TestCase {
        uuid: uuid.to_string(),
        ..TestCase::default()
    };
}

#[test]
fn it_starts_idle() {
    let state = state();

    assert!(!state.generating);
    assert_eq!(state.phase(), GenerationPhase::Idle);
}

#[test]
fn it_walks_through_a_successful_run() {
    let mut state = state();

    state.handle_event(&Event::FolderCreating());
    assert!(state.generating);
    assert_eq!(state.phase(), GenerationPhase::CreatingFolder);

    state.handle_event(&Event::FolderReady("fld_1".to_string()));
    assert_eq!(state.phase(), GenerationPhase::Generating);
    assert_eq!(state.folder_id, Some("fld_1".to_string()));

    state.handle_event(&Event::TestCaseArrived(case("a")));
    state.handle_event(&Event::TestCaseStored("req_1".to_string()));
    state.handle_event(&Event::TestCaseArrived(case("b")));
    state.handle_event(&Event::TestCaseStored("req_2".to_string()));

    state.handle_event(&Event::GenerationDone(2));
    assert!(!state.generating);
    assert_eq!(state.phase(), GenerationPhase::Success);
    assert_eq!(state.stored_count, 2);
}

#[test]
fn it_keeps_test_cases_in_arrival_order() {
    let mut state = state();
    state.handle_event(&Event::FolderCreating());

    for uuid in ["a", "b", "c", "a"] {
        state.handle_event(&Event::TestCaseArrived(case(uuid)));
    }

    let order = state
        .test_cases
        .iter()
        .map(|test_case| {
            return test_case.uuid.as_str();
        })
        .collect::<Vec<&str>>();

    // Never reordered or deduplicated.
    assert_eq!(order, vec!["a", "b", "c", "a"]);
}

#[test]
fn it_resets_the_run_on_a_new_invocation() {
    let mut state = state();
    state.handle_event(&Event::FolderCreating());
    state.handle_event(&Event::FolderReady("fld_1".to_string()));
    state.handle_event(&Event::TestCaseArrived(case("a")));
    state.handle_event(&Event::GenerationError("boom".to_string()));

    state.handle_event(&Event::FolderCreating());

    assert!(state.generating);
    assert!(state.error.is_none());
    assert!(state.test_cases.is_empty());
    assert!(state.folder_id.is_none());
    assert_eq!(state.stored_count, 0);
}

#[test]
fn it_surfaces_errors_and_clears_the_generating_flag() {
    let mut state = state();
    state.handle_event(&Event::FolderCreating());
    state.handle_event(&Event::GenerationError("Folder creation timed out".to_string()));

    assert!(!state.generating);
    assert_eq!(state.phase(), GenerationPhase::Failed);
    assert_eq!(state.error, Some("Folder creation timed out".to_string()));
}

#[test]
fn it_keeps_run_state_on_rejection() {
    let mut state = state();
    state.handle_event(&Event::FolderCreating());
    state.handle_event(&Event::TestCaseArrived(case("a")));

    state.handle_event(&Event::GenerationRejected(
        "Please wait for the current test generation to complete.".to_string(),
    ));

    assert!(state.generating);
    assert!(state.error.is_none());
    assert_eq!(state.test_cases.len(), 1);
    assert!(state.alert.is_some());
}

#[test]
fn it_cancels_without_dropping_accumulated_cases() -> Result<()> {
    let mut state = state();
    state.handle_event(&Event::FolderCreating());
    state.handle_event(&Event::FolderReady("fld_1".to_string()));
    state.handle_event(&Event::TestCaseArrived(case("a")));
    state.handle_event(&Event::TestCaseStored("req_1".to_string()));

    state.cancel();

    assert!(!state.generating);
    assert_eq!(state.test_cases.len(), 1);
    assert_eq!(state.stored_count, 1);

    return Ok(());
}

#[test]
fn it_dismisses_notices() {
    let mut state = state();
    state.handle_event(&Event::GenerationError("boom".to_string()));
    state.handle_event(&Event::GenerationRejected("busy".to_string()));

    state.dismiss_notices();

    assert!(state.error.is_none());
    assert!(state.alert.is_none());
    assert_eq!(state.phase(), GenerationPhase::Idle);
}
