use std::env;
use std::path::{Path, PathBuf};

use crate::core::commands::CommandError;

/// Turns a `cd` argument into the directory to switch to.
///
/// Kept free of any OS calls so the precedence rules can be checked
/// without touching the real working directory.
#[derive(Debug, Clone, Default)]
pub struct PathExpander {
    home: Option<String>,
}

impl PathExpander {
    /// Uses `HOME` from the environment, falling back to the passwd entry.
    pub fn from_env() -> Self {
        let home = env::var("HOME")
            .ok()
            .filter(|h| !h.is_empty())
            .or_else(|| dirs::home_dir().map(|p| p.to_string_lossy().into_owned()));
        Self { home }
    }

    pub fn with_home(home: Option<&str>) -> Self {
        Self {
            home: home.map(str::to_owned),
        }
    }

    pub fn resolve(&self, arg: Option<&str>, previous: Option<&Path>) -> Result<PathBuf, CommandError> {
        match arg {
            None => self.home_dir(),
            Some("-") => previous
                .map(Path::to_path_buf)
                .ok_or(CommandError::NoPreviousDirectory),
            Some(path) => match path.strip_prefix('~') {
                // "~foo" becomes "$HOMEfoo", no separator is inserted
                Some(rest) => {
                    let home = self.home.as_deref().ok_or(CommandError::HomeNotSet)?;
                    Ok(PathBuf::from(format!("{}{}", home, rest)))
                }
                None => Ok(PathBuf::from(path)),
            },
        }
    }

    fn home_dir(&self) -> Result<PathBuf, CommandError> {
        self.home
            .as_deref()
            .map(PathBuf::from)
            .ok_or(CommandError::HomeNotSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander() -> PathExpander {
        PathExpander::with_home(Some("/home/test"))
    }

    #[test]
    fn test_no_argument_goes_home() {
        let target = expander().resolve(None, None).unwrap();
        assert_eq!(target, PathBuf::from("/home/test"));
    }

    #[test]
    fn test_dash_uses_previous() {
        let target = expander()
            .resolve(Some("-"), Some(Path::new("/var/tmp")))
            .unwrap();
        assert_eq!(target, PathBuf::from("/var/tmp"));
    }

    #[test]
    fn test_dash_without_previous_fails() {
        let result = expander().resolve(Some("-"), None);
        assert!(matches!(result, Err(CommandError::NoPreviousDirectory)));
    }

    #[test]
    fn test_tilde_is_concatenated() {
        let exp = expander();
        assert_eq!(exp.resolve(Some("~"), None).unwrap(), PathBuf::from("/home/test"));
        assert_eq!(
            exp.resolve(Some("~/src/vena"), None).unwrap(),
            PathBuf::from("/home/test/src/vena")
        );
        assert_eq!(
            exp.resolve(Some("~backup"), None).unwrap(),
            PathBuf::from("/home/testbackup")
        );
    }

    #[test]
    fn test_plain_argument_is_verbatim() {
        let target = expander().resolve(Some("../a/./b"), None).unwrap();
        assert_eq!(target, PathBuf::from("../a/./b"));
    }

    #[test]
    fn test_missing_home() {
        let exp = PathExpander::with_home(None);
        assert!(matches!(exp.resolve(None, None), Err(CommandError::HomeNotSet)));
        assert!(matches!(exp.resolve(Some("~/x"), None), Err(CommandError::HomeNotSet)));
        assert_eq!(exp.resolve(Some("/tmp"), None).unwrap(), PathBuf::from("/tmp"));
    }
}
