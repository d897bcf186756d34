use std::process::{Child, Command, ExitStatus, Stdio};

use super::pipe::Pipe;
use super::wait::{wait_for_all, wait_for_exit};
use super::ProcessError;
use crate::shell::pipeline::PipelineStage;

/// Runs external programs, alone or as a two-stage pipe.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    pub fn run_single(&self, stage: &PipelineStage) -> Result<ExitStatus, ProcessError> {
        let program = stage.program().ok_or(ProcessError::EmptyCommand)?;
        let child = spawn(program, stage.args(), Stdio::inherit(), Stdio::inherit())?;
        wait(program, child)
    }

    /// Runs `producer | consumer` and returns both exit statuses.
    ///
    /// The parent keeps no pipe descriptor once both children exist:
    /// each end is moved into the `Command` that uses it, and that
    /// `Command` is dropped right after spawning.
    pub fn run_pipeline(
        &self,
        producer: &PipelineStage,
        consumer: &PipelineStage,
    ) -> Result<(ExitStatus, ExitStatus), ProcessError> {
        let (first, second) = match (producer.program(), consumer.program()) {
            (Some(first), Some(second)) => (first, second),
            _ => return Err(ProcessError::EmptyCommand),
        };

        let (read_end, write_end) = Pipe::new().map_err(ProcessError::Pipe)?.into_stdio();

        // A producer that cannot start fails the whole line; the consumer
        // is never spawned.
        let producer_child = spawn(first, producer.args(), Stdio::inherit(), write_end)?;
        let consumer_child = match spawn(second, consumer.args(), read_end, Stdio::inherit()) {
            Ok(child) => child,
            Err(e) => {
                // With the read end gone the producer finishes on SIGPIPE
                // or EOF; reap it before reporting.
                wait(first, producer_child)?;
                return Err(e);
            }
        };

        // Both children are watched at once so that a stop in either
        // one is seen while the other is blocked on the pipe.
        let statuses =
            wait_for_all(vec![producer_child, consumer_child]).map_err(ProcessError::Wait)?;
        match statuses.as_slice() {
            &[producer_status, consumer_status] => {
                log_status(first, producer_status);
                log_status(second, consumer_status);
                Ok((producer_status, consumer_status))
            }
            _ => Err(ProcessError::Wait(std::io::Error::new(
                std::io::ErrorKind::Other,
                "pipeline reported an unexpected number of statuses",
            ))),
        }
    }
}

fn spawn(program: &str, args: &[String], stdin: Stdio, stdout: Stdio) -> Result<Child, ProcessError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::inherit());

    let child = command
        .spawn()
        .map_err(|e| ProcessError::spawn(program, e))?;
    log::debug!("spawned {} (pid {})", program, child.id());
    Ok(child)
}

fn wait(program: &str, child: Child) -> Result<ExitStatus, ProcessError> {
    let status = wait_for_exit(child).map_err(ProcessError::Wait)?;
    log_status(program, status);
    Ok(status)
}

fn log_status(program: &str, status: ExitStatus) {
    if !status.success() {
        log::debug!("{} exited with {}", program, status);
    }
}
