use super::{Builtin, CommandError, Outcome};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for ExitCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> Result<Outcome, CommandError> {
        match args.first() {
            None => Ok(Outcome::Exit(0)),
            Some(code) => {
                let status = code.parse::<i32>().map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "exit: {}: numeric argument required",
                        code
                    ))
                })?;
                // The OS keeps only the low byte of an exit status.
                if !(0..=255).contains(&status) {
                    return Err(CommandError::InvalidArguments(format!(
                        "exit: {}: status out of range",
                        code
                    )));
                }
                Ok(Outcome::Exit(status))
            }
        }
    }
}
