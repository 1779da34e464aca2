// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds CLI parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod roster;
pub mod rotation;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;

pub use error::{Result, TurnclockError};
