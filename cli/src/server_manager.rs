//! Detects the local API server and starts it on demand

use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::api_client::ApiClient;

pub const SERVER_BINARY: &str = "carfuel-server";
const START_ATTEMPTS: u32 = 30;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(
        "Server executable 'carfuel-server' not found next to the CLI, in ./target/release, \
         ./target/debug or on PATH"
    )]
    ExecutableNotFound,
    #[error("Server is required. Exiting.")]
    Declined,
    #[error("Failed to start server: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Server failed to start within {0} seconds")]
    StartTimeout(u64),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn binary_name() -> String {
    format!("{}{}", SERVER_BINARY, std::env::consts::EXE_SUFFIX)
}

/// Search order: next to the CLI, `./target/release`, `./target/debug`,
/// then each `PATH` entry.
pub fn candidate_paths(exe_dir: Option<&Path>, cwd: &Path, path_var: Option<&OsStr>) -> Vec<PathBuf> {
    let name = binary_name();
    let mut candidates = Vec::new();

    if let Some(dir) = exe_dir {
        candidates.push(dir.join(&name));
    }
    candidates.push(cwd.join("target").join("release").join(&name));
    candidates.push(cwd.join("target").join("debug").join(&name));
    if let Some(path_var) = path_var {
        candidates.extend(std::env::split_paths(path_var).map(|dir| dir.join(&name)));
    }
    candidates
}

pub fn find_server_executable() -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let path_var = std::env::var_os("PATH");

    candidate_paths(exe_dir.as_deref(), &cwd, path_var.as_deref())
        .into_iter()
        .find(|p| p.is_file())
}

/// Reads a y/n answer. Anything other than `y`/`yes` is a no.
pub fn confirm(mut input: impl BufRead, mut output: impl Write, question: &str) -> std::io::Result<bool> {
    write!(output, "{} (y/n): ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub struct ServerManager {
    client: ApiClient,
    executable: Option<PathBuf>,
    child: Option<Child>,
    poll_interval: Duration,
}

impl ServerManager {
    /// `executable` is usually [`find_server_executable`].
    pub fn new(client: ApiClient, executable: Option<PathBuf>) -> Self {
        Self {
            client,
            executable,
            child: None,
            poll_interval: Duration::from_secs(1),
        }
    }

    pub async fn is_server_running(&self) -> bool {
        self.client.is_reachable().await
    }

    pub fn can_start_server(&self) -> bool {
        self.executable.as_deref().is_some_and(Path::is_file)
    }

    /// Makes sure the API answers, starting the server when allowed.
    pub async fn ensure_running(
        &mut self,
        auto_yes: bool,
        input: impl BufRead,
        mut output: impl Write,
    ) -> Result<(), ServerError> {
        if self.is_server_running().await {
            debug!(url = self.client.base_url(), "Server is reachable");
            return Ok(());
        }

        writeln!(output, "Backend server is not running.")?;
        if !self.can_start_server() {
            return Err(ServerError::ExecutableNotFound);
        }

        if !auto_yes && !confirm(input, &mut output, "Start the server now?")? {
            return Err(ServerError::Declined);
        }

        writeln!(output, "Starting backend server...")?;
        self.start_server().await?;
        writeln!(output, "Server started successfully!")?;
        Ok(())
    }

    /// Spawns the server with its output discarded and polls until it
    /// answers, once per poll interval for up to 30 attempts.
    pub async fn start_server(&mut self) -> Result<(), ServerError> {
        let executable = self
            .executable
            .clone()
            .ok_or(ServerError::ExecutableNotFound)?;

        let mut command = Command::new(&executable);
        if let Some(port) = reqwest::Url::parse(self.client.base_url())
            .ok()
            .and_then(|url| url.port_or_known_default())
        {
            command.arg("--port").arg(port.to_string());
        }

        info!(executable = %executable.display(), "Spawning server");
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ServerError::Spawn)?;
        self.child = Some(child);

        for attempt in 1..=START_ATTEMPTS {
            tokio::time::sleep(self.poll_interval).await;
            if self.is_server_running().await {
                info!(attempt, "Server is up");
                return Ok(());
            }
        }

        warn!("Server did not become reachable, stopping it");
        self.stop_server().await;
        Err(ServerError::StartTimeout(
            self.poll_interval.as_secs().max(1) * u64::from(START_ATTEMPTS),
        ))
    }

    /// Terminates the server only if this manager started it.
    pub async fn stop_server(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                warn!("Failed to stop server process: {}", e);
            }
        }
    }
}
