use std::ffi::CStr;
use std::path::Path;

use inksac::prelude::*;

/// Renders `user@host:cwd$ ` and colors error reports for the terminal.
#[derive(Debug, Clone)]
pub struct PromptRenderer {
    color_support: ColorSupport,
    identity: String,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_identity(support, format!("{}@{}", username(), hostname()))
    }

    pub fn with_identity(color_support: ColorSupport, identity: String) -> Self {
        Self {
            color_support,
            identity,
        }
    }

    pub fn render(&self, current_dir: &Path) -> String {
        let identity = if matches!(self.color_support, ColorSupport::NoColor) {
            self.identity.clone()
        } else {
            let style = Style::builder().foreground(Color::Green).build();
            self.identity.as_str().style(style).to_string()
        };
        format!("{}:{}$ ", identity, current_dir.display())
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }
}

fn username() -> String {
    if let Ok(user) = std::env::var("USER") {
        if !user.is_empty() {
            return user;
        }
    }
    let login = unsafe { libc::getlogin() };
    if login.is_null() {
        return "?".to_string();
    }
    unsafe { CStr::from_ptr(login) }.to_string_lossy().into_owned()
}

fn hostname() -> String {
    let mut buf = [0 as libc::c_char; 256];
    if unsafe { libc::gethostname(buf.as_mut_ptr(), buf.len() - 1) } != 0 {
        return "localhost".to_string();
    }
    unsafe { CStr::from_ptr(buf.as_ptr()) }.to_string_lossy().into_owned()
}
