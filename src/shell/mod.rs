pub mod executor;
pub mod pipeline;
pub mod tokenizer;

use crate::{
    core::{Outcome, ShellState},
    error::ShellError,
    flags::Flags,
    input::LineSource,
    process::SignalBridge,
    prompt::PromptRenderer,
};

pub use executor::Interpreter;

/// Exit status when the line source fails instead of reaching end of input.
pub const READ_ERROR_STATUS: i32 = 1;

/// The read loop: prompt, read, execute, repeat until `exit` or EOF.
pub struct Shell {
    interpreter: Interpreter,
    input: LineSource,
    prompt: Option<PromptRenderer>,
    signals: SignalBridge,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let signals = SignalBridge::install().map_err(ShellError::Signal)?;
        let input = LineSource::from_stdin()?;

        let prompt = if input.is_interactive() {
            signals.guard_interrupts().map_err(ShellError::Signal)?;
            Some(PromptRenderer::new())
        } else {
            None
        };

        let state = ShellState::new()?;
        log::debug!(
            "starting in {} ({} mode)",
            state.current_dir().display(),
            if prompt.is_some() { "interactive" } else { "batch" }
        );

        Ok(Shell {
            interpreter: Interpreter::new(state),
            input,
            prompt,
            signals,
            flags,
        })
    }

    /// Returns the status the process should exit with.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        loop {
            let prompt = match &self.prompt {
                Some(renderer) => renderer.render(self.interpreter.state().current_dir()),
                None => String::new(),
            };

            let line = self.input.read_line(&prompt);
            self.report_signals();

            let line = match line {
                Ok(Some(line)) => line,
                Ok(None) => {
                    log::debug!("end of input");
                    return Ok(0);
                }
                Err(e) => {
                    self.report(&e);
                    return Ok(READ_ERROR_STATUS);
                }
            };

            let result = self.interpreter.execute_line(&line);
            self.report_signals();

            match result {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Exit(code)) => return Ok(code),
                Err(e) => self.report(&e),
            }
        }
    }

    fn report(&self, error: &ShellError) {
        if self.flags.is_set("quiet") {
            return;
        }
        let message = format!("vena: {}", error);
        match &self.prompt {
            Some(renderer) => eprintln!("{}", renderer.highlight_error(&message)),
            None => eprintln!("{}", message),
        }
    }

    fn report_signals(&self) {
        let quiet = self.flags.is_set("quiet");
        if self.signals.take_stop() && !quiet {
            println!("\n{}", SignalBridge::stop_notice());
        }
        if self.signals.take_interrupt() && !quiet {
            println!("\nUse 'exit' to exit the shell");
        }
    }
}
