pub mod error;
pub mod flags;
pub mod logger;
pub mod shell;

pub mod core;
pub mod input;
pub mod path;
pub mod process;
pub mod prompt;
