pub mod screening_flow;
pub mod state;

pub use screening_flow::ScreeningFlow;
pub use state::{ScreeningOutcome, WorkflowState};
