// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod decoration;
pub mod error;
pub mod guard;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod util;

pub use controller::{SessionController, Submission};
pub use session::{BorderState, Outcome, SessionConfig, SessionState};
