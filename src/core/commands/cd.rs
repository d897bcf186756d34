use super::{Builtin, CommandError, Outcome};
use crate::core::state::ShellState;
use crate::path::PathExpander;
use std::env;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: Option<PathExpander>,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    /// Reads `HOME` each time the command runs.
    pub fn new() -> Self {
        Self { path_expander: None }
    }

    pub fn with_expander(path_expander: PathExpander) -> Self {
        Self {
            path_expander: Some(path_expander),
        }
    }
}

impl Builtin for CdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Outcome, CommandError> {
        let expander = match &self.path_expander {
            Some(expander) => expander.clone(),
            None => PathExpander::from_env(),
        };
        let target = expander.resolve(args.first().map(String::as_str), state.previous_dir())?;

        env::set_current_dir(&target).map_err(|source| CommandError::ChangeDirectory {
            path: target.clone(),
            source,
        })?;

        let new_dir = env::current_dir().unwrap_or_else(|_| state.current_dir().join(&target));
        log::debug!(
            "cd: {} -> {}",
            state.current_dir().display(),
            new_dir.display()
        );
        state.moved_to(new_dir);
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // The working directory is process-wide; these tests take turns.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    fn scratch_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn arg(path: &std::path::Path) -> Vec<String> {
        vec![path.to_str().unwrap().to_string()]
    }

    #[test]
    fn test_cd_updates_state() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = scratch_dir();
        let target = dir.path().canonicalize().unwrap();
        let start = env::current_dir().unwrap();
        let mut state = ShellState::with_dir(start.clone());

        let outcome = CdCommand::new().execute(&arg(&target), &mut state).unwrap();

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(state.current_dir(), target.as_path());
        assert_eq!(state.previous_dir(), Some(start.as_path()));
        assert_eq!(env::current_dir().unwrap(), target);
        env::set_current_dir(&start).unwrap();
    }

    #[test]
    fn test_cd_dash_round_trip() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = scratch_dir();
        let target = dir.path().canonicalize().unwrap();
        let start = env::current_dir().unwrap();
        let mut state = ShellState::with_dir(start.clone());
        let cmd = CdCommand::new();

        cmd.execute(&arg(&target), &mut state).unwrap();
        cmd.execute(&["-".to_string()], &mut state).unwrap();

        assert_eq!(state.current_dir(), start.as_path());
        assert_eq!(state.previous_dir(), Some(target.as_path()));
        assert_eq!(env::current_dir().unwrap(), start);
    }

    #[test]
    fn test_cd_without_argument_uses_home() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let home = scratch_dir();
        let home_path = home.path().canonicalize().unwrap();
        let start = env::current_dir().unwrap();
        let mut state = ShellState::with_dir(start.clone());
        let cmd = CdCommand::with_expander(PathExpander::with_home(home_path.to_str()));

        cmd.execute(&[], &mut state).unwrap();

        assert_eq!(state.current_dir(), home_path.as_path());
        assert_eq!(state.previous_dir(), Some(start.as_path()));
        env::set_current_dir(&start).unwrap();
    }

    #[test]
    fn test_cd_missing_directory_leaves_state() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let start = env::current_dir().unwrap();
        let mut state = ShellState::with_dir(start.clone());
        let before = state.clone();

        let result = CdCommand::new().execute(&["/path/that/does/not/exist".to_string()], &mut state);

        match result {
            Err(CommandError::ChangeDirectory { path, source }) => {
                assert_eq!(path, PathBuf::from("/path/that/does/not/exist"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(state, before);
        assert_eq!(env::current_dir().unwrap(), start);
    }

    #[test]
    fn test_cd_into_file_fails() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut state = ShellState::with_dir(env::current_dir().unwrap());
        let before = state.clone();

        let result = CdCommand::new().execute(&arg(file.path()), &mut state);

        assert!(matches!(result, Err(CommandError::ChangeDirectory { .. })));
        assert_eq!(state, before);
    }
}
