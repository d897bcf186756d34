/// The token that separates the two stages of a pipeline.
pub const PIPE_TOKEN: &str = "|";

/// One program invocation: the program name followed by its arguments.
///
/// A stage is only empty when the line had nothing on one side of the
/// pipe; the process executor refuses to run such a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStage {
    argv: Vec<String>,
}

impl PipelineStage {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pipeline {
    Single(PipelineStage),
    Piped(PipelineStage, PipelineStage),
}

impl Pipeline {
    /// Splits at the first `|`. Any later `|` stays in the second stage
    /// as an ordinary argument.
    pub fn parse(mut tokens: Vec<String>) -> Self {
        match tokens.iter().position(|t| t == PIPE_TOKEN) {
            None => Pipeline::Single(PipelineStage::new(tokens)),
            Some(index) => {
                let consumer = tokens.split_off(index + 1);
                tokens.truncate(index);
                Pipeline::Piped(PipelineStage::new(tokens), PipelineStage::new(consumer))
            }
        }
    }
}
