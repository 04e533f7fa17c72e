#[cfg(test)]
#[path = "generation_state_test.rs"]
mod tests;

use crate::domain::models::Event;
use crate::domain::models::SourceRequest;
use crate::domain::models::TestCase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    CreatingFolder,
    Generating,
    Success,
    Failed,
}

/// State of one generation run, owned by the UI loop and mutated only through
/// orchestrator events. Reset on every new invocation.
pub struct GenerationState {
    pub request: SourceRequest,
    pub generating: bool,
    pub error: Option<String>,
    // Rejection notices that must not disturb the run itself.
    pub alert: Option<String>,
    pub test_cases: Vec<TestCase>,
    pub stored_count: usize,
    pub folder_id: Option<String>,
}

impl GenerationState {
    pub fn new(request: SourceRequest) -> GenerationState {
        return GenerationState {
            request,
            generating: false,
            error: None,
            alert: None,
            test_cases: vec![],
            stored_count: 0,
            folder_id: None,
        };
    }

    fn begin(&mut self) {
        self.generating = true;
        self.error = None;
        self.test_cases = vec![];
        self.stored_count = 0;
        self.folder_id = None;
    }

    pub fn phase(&self) -> GenerationPhase {
        if self.error.is_some() {
            return GenerationPhase::Failed;
        }
        if self.generating {
            if self.folder_id.is_none() {
                return GenerationPhase::CreatingFolder;
            }
            return GenerationPhase::Generating;
        }
        if !self.test_cases.is_empty() {
            return GenerationPhase::Success;
        }
        return GenerationPhase::Idle;
    }

    pub fn dismiss_notices(&mut self) {
        self.error = None;
        self.alert = None;
    }

    pub fn cancel(&mut self) {
        self.generating = false;
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::FolderCreating() => {
                self.begin();
            }
            Event::FolderReady(folder_id) => {
                self.folder_id = Some(folder_id.to_string());
            }
            Event::TestCaseArrived(test_case) => {
                self.test_cases.push(test_case.clone());
            }
            Event::TestCaseStored(_) => {
                self.stored_count += 1;
            }
            Event::GenerationDone(_) => {
                self.generating = false;
            }
            Event::GenerationError(message) => {
                self.error = Some(message.to_string());
                self.generating = false;
            }
            Event::GenerationRejected(message) => {
                self.alert = Some(message.to_string());
            }
            _ => (),
        }
    }
}
