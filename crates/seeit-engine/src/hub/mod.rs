pub mod controller;
pub mod state;

pub use controller::{FlowController, FlowEvent};
pub use state::{AppFlow, HubState};
