use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Captured result of an external command that is allowed to exit with failure.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
}

impl CommandOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Runs a command and returns its standard output, failing on a non-zero exit.
pub async fn run(command: &str, args: &[&str]) -> Result<Vec<u8>, ProcessError> {
    let output = output(command, args).await?;
    if !output.success {
        log::debug!("Command {} {:?} exited with failure", command, args);
        return Err(ProcessError::ExternalCommand);
    }
    Ok(output.stdout)
}

/// Runs a command and captures its standard output regardless of the exit status.
///
/// Only failing to start or to collect the child process is an error. The child is
/// killed when the returned future is dropped, so callers may race it against a timer.
pub async fn output(command: &str, args: &[&str]) -> Result<CommandOutput, ProcessError> {
    let process = Command::new(command)
        .args(args)
        .env("NO_COLOR", "1")
        .env("LC_ALL", "C")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    let output = process.wait_with_output().await?;
    Ok(CommandOutput {
        success: output.status.success(),
        stdout: output.stdout,
    })
}

pub async fn probe(command: &str, args: &[&str]) -> bool {
    let mut process = if let Ok(p) = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        p
    } else {
        log::debug!("Failed to spawn process of command {}", command);
        return false;
    };

    let status = if let Ok(s) = process.wait().await {
        s
    } else {
        log::debug!("Failed to wait for process of command {}", command);
        return false;
    };

    if status.success() {
        true
    } else {
        log::debug!("Command {} exited with failure", command);
        false
    }
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed in create a child process")]
    ChildProcessCreation(#[from] std::io::Error),

    #[error("External command failed")]
    ExternalCommand,
}
