use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::model::directory_name;

pub const PROFILE_DIRECTORY_FLAG: &str = "--profile-directory";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("empty profile directory")]
    EmptyProfileDirectory,
    #[error("failed to spawn '{program}': {message}")]
    SpawnFailed { program: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl LaunchCommand {
    /// `<browser> --profile-directory=<base name of profile_folder>`.
    pub fn for_profile(browser_path: &Path, profile_folder: &Path) -> Result<Self, LaunchError> {
        let directory = directory_name(profile_folder);
        if directory.is_empty() {
            return Err(LaunchError::EmptyProfileDirectory);
        }

        Ok(Self {
            program: browser_path.to_path_buf(),
            args: vec![format!("{PROFILE_DIRECTORY_FLAG}={directory}")],
        })
    }
}

pub trait ProcessSpawner {
    fn spawn(&self, command: &LaunchCommand) -> Result<(), LaunchError>;
}

/// Starts the process with null stdio and drops the child handle without waiting on it.
#[derive(Debug, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|error| LaunchError::SpawnFailed {
                program: command.program.to_string_lossy().into_owned(),
                message: error.to_string(),
            })
    }
}

/// Records commands instead of running them.
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    launched: RefCell<Vec<LaunchCommand>>,
}

impl RecordingSpawner {
    pub fn launched(&self) -> Vec<LaunchCommand> {
        self.launched.borrow().clone()
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        self.launched.borrow_mut().push(command.clone());
        Ok(())
    }
}

/// Looks the browser up on `PATH` with `which`. Any failure resolves to an empty path.
pub fn resolve_browser_path(browser_command: &str) -> PathBuf {
    let output = match Command::new("which")
        .arg(browser_command)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(error) => {
            log::warn!("browser lookup for '{browser_command}' failed: {error}");
            return PathBuf::new();
        }
    };

    let resolved = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if resolved.is_empty() {
        log::warn!("browser '{browser_command}' not found on PATH; launches will fail");
    }
    PathBuf::from(resolved)
}

pub fn launch_profile(
    spawner: &dyn ProcessSpawner,
    browser_path: &Path,
    profile_folder: &Path,
) -> Result<LaunchCommand, LaunchError> {
    let command = LaunchCommand::for_profile(browser_path, profile_folder)?;
    spawner.spawn(&command)?;
    Ok(command)
}
