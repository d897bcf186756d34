pub mod commands;
pub mod state;

pub use commands::{BuiltinDispatcher, CommandError, Outcome};
pub use state::ShellState;
