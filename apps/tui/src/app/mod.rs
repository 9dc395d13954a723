// App module for taxi_dashboard
// Holds the state store, load orchestration and input handling

#[cfg(test)]
pub(crate) mod fixtures;
pub mod input;
pub mod loader;
pub mod state;
pub mod store;

pub use input::{handle_input, handle_mouse};
pub use loader::{load_dashboard, spawn_load, LoadResult};
pub use state::{App, LoadFailure, LoadPhase, Page, Panel};
pub use store::{DashboardData, DashboardState};
