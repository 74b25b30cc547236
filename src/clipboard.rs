/*!
 * Clipboard support for ctxcat
 *
 * Hands the output to an external clipboard command chosen from the
 * session type (Wayland or X11) and platform. Failures are reported to the
 * caller and never abort a run.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Graphical session kind, detected from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    Wayland,
    X11,
}

impl SessionType {
    /// Detect the session type from an environment lookup
    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let wayland_display = lookup("WAYLAND_DISPLAY").is_some_and(|v| !v.is_empty());
        let session_is_wayland = lookup("XDG_SESSION_TYPE")
            .is_some_and(|v| v.eq_ignore_ascii_case("wayland"));

        if wayland_display || session_is_wayland {
            Self::Wayland
        } else {
            Self::X11
        }
    }

    /// Detect the session type of the running process
    pub fn current() -> Self {
        Self::detect(|key| env::var(key).ok())
    }
}

/// Available clipboard providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    /// Wayland clipboard
    Wayland,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (also reachable from WSL)
    Windows,
}

impl ClipboardProvider {
    /// Command and arguments that read the clipboard text from stdin
    pub fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Wayland => ("wl-copy", &[]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
        }
    }

    /// Copy text through this provider
    pub fn copy(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        execute_clipboard_command(cmd, args, text)
    }
}

//--------------------------------------------------------------------
// Public API
//--------------------------------------------------------------------

/// Copy text to the clipboard using the first available provider
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = candidate_providers(SessionType::current())
        .into_iter()
        .find(|p| command_exists(p.command().0))
        .ok_or(ClipboardError::NoClipboardFound)?;

    log::debug!("Copying {} bytes with {:?}", text.len(), provider);
    provider.copy(text)
}

/// Providers worth trying on this platform, in order of preference
pub fn candidate_providers(session: SessionType) -> Vec<ClipboardProvider> {
    if cfg!(target_os = "macos") {
        return vec![ClipboardProvider::MacOS];
    }
    if cfg!(target_os = "windows") || env::var("WSL_DISTRO_NAME").is_ok() {
        return vec![ClipboardProvider::Windows];
    }

    match session {
        SessionType::Wayland => vec![ClipboardProvider::Wayland],
        SessionType::X11 => vec![ClipboardProvider::Xclip, ClipboardProvider::Xsel],
    }
}

/// Check if a command exists somewhere on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

//--------------------------------------------------------------------
// Internal Implementation
//--------------------------------------------------------------------

/// Spawn the command, write all of `text` to its stdin, close stdin, then wait
fn execute_clipboard_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    {
        let mut stdin = child.stdin.take().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin.write_all(text.as_bytes()).map_err(|e| {
            ClipboardError::CommandFailed(format!("Failed to write to {}: {}", cmd, e))
        })?;
        // stdin dropped here so the command sees EOF
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_session_detection() {
        assert_eq!(
            SessionType::detect(env_of(&[("WAYLAND_DISPLAY", "wayland-0")])),
            SessionType::Wayland
        );
        assert_eq!(
            SessionType::detect(env_of(&[("XDG_SESSION_TYPE", "Wayland")])),
            SessionType::Wayland
        );
        assert_eq!(
            SessionType::detect(env_of(&[("XDG_SESSION_TYPE", "x11"), ("DISPLAY", ":0")])),
            SessionType::X11
        );
        assert_eq!(SessionType::detect(env_of(&[])), SessionType::X11);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_linux_providers_follow_session() {
        if env::var("WSL_DISTRO_NAME").is_ok() {
            return;
        }
        assert_eq!(
            candidate_providers(SessionType::Wayland),
            vec![ClipboardProvider::Wayland]
        );
        assert_eq!(
            candidate_providers(SessionType::X11),
            vec![ClipboardProvider::Xclip, ClipboardProvider::Xsel]
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    #[cfg(unix)]
    fn test_command_receives_all_input() {
        // `cat` exits once stdin is closed; a non-zero exit is reported
        assert!(execute_clipboard_command("cat", &[], "hello").is_ok());
        let err = execute_clipboard_command("sh", &["-c", "cat >/dev/null; exit 3"], "x");
        assert!(matches!(err, Err(ClipboardError::CommandFailed(_))));
        assert!(execute_clipboard_command("nonexistentcommandxyz", &[], "x").is_err());
    }
}
