pub mod events;
mod generation_panel;
mod generation_state;
pub mod materializer;
pub mod orchestrator;

pub use events::EventsService;
pub use generation_panel::GenerationPanel;
pub use generation_state::GenerationPhase;
pub use generation_state::GenerationState;
pub use orchestrator::OrchestratorService;
