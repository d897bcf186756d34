use crate::core::{BuiltinDispatcher, Outcome, ShellState};
use crate::error::ShellError;
use crate::process::ProcessExecutor;

use super::pipeline::Pipeline;
use super::tokenizer::tokenize;

/// The execution engine: one input line in, one [`Outcome`] out.
pub struct Interpreter {
    state: ShellState,
    builtins: BuiltinDispatcher,
    processes: ProcessExecutor,
}

impl Interpreter {
    pub fn new(state: ShellState) -> Self {
        Self {
            state,
            builtins: BuiltinDispatcher::new(),
            processes: ProcessExecutor::new(),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Outcome, ShellError> {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            return Ok(Outcome::Continue);
        }

        match Pipeline::parse(tokens) {
            Pipeline::Single(stage) => {
                if let Some(result) = self.builtins.dispatch(stage.argv(), &mut self.state) {
                    return Ok(result?);
                }
                self.processes.run_single(&stage)?;
            }
            Pipeline::Piped(producer, consumer) => {
                self.processes.run_pipeline(&producer, &consumer)?;
            }
        }
        Ok(Outcome::Continue)
    }
}
