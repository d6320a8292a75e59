//! Process-wide state.

mod state;

pub use state::{set_watching, setup_shutdown_handler};
