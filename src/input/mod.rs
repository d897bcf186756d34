use std::io::{self, BufRead, IsTerminal};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ShellError;

/// Where input lines come from.
pub enum LineSource {
    /// Line editing on a terminal; the prompt is shown by rustyline.
    Interactive(DefaultEditor),
    /// Piped or redirected stdin, read without a prompt.
    Batch(Box<dyn BufRead>),
}

impl LineSource {
    pub fn from_stdin() -> Result<Self, ShellError> {
        if io::stdin().is_terminal() {
            Ok(LineSource::Interactive(DefaultEditor::new()?))
        } else {
            Ok(LineSource::batch(io::stdin().lock()))
        }
    }

    pub fn batch(reader: impl BufRead + 'static) -> Self {
        LineSource::Batch(Box::new(reader))
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, LineSource::Interactive(_))
    }

    /// Next line, or `None` at end of input.
    ///
    /// Ctrl-C at the prompt abandons the current line and yields an
    /// empty one.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self {
            LineSource::Interactive(editor) => match editor.readline(prompt) {
                Ok(line) => Ok(Some(line)),
                Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
                Err(ReadlineError::Eof) => Ok(None),
                Err(e) => Err(e.into()),
            },
            LineSource::Batch(reader) => {
                let mut line = String::new();
                loop {
                    match reader.read_line(&mut line) {
                        Ok(0) => return Ok(None),
                        Ok(_) => return Ok(Some(line)),
                        // A stop signal landing during the read
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }
    }
}
