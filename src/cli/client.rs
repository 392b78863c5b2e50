//! IPC client for communicating with the planner daemon.
//!
//! This module provides:
//! - Unix Domain Socket client
//! - Request/response handling
//! - Connection retry logic
//! - Timeout handling

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::daemon::default_socket_path;
use crate::types::{IpcRequest, IpcResponse, SetParams, TimerMode};

// ============================================================================
// Constants
// ============================================================================

/// Connection timeout in seconds
const CONNECTION_TIMEOUT_SECS: u64 = 5;

/// Read/write timeout in seconds
const IO_TIMEOUT_SECS: u64 = 5;

/// Maximum response size in bytes (64KB)
const MAX_RESPONSE_SIZE: usize = 65536;

/// Maximum retry attempts
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds (base delay, multiplied by attempt number)
const RETRY_DELAY_MS: u64 = 500;

// ============================================================================
// IpcClient
// ============================================================================

/// IPC client for daemon communication.
pub struct IpcClient {
    /// Socket path
    socket_path: PathBuf,
    /// Connection timeout
    timeout: Duration,
}

impl IpcClient {
    /// Creates a new IPC client with the default socket path.
    pub fn new() -> Result<Self> {
        Ok(Self::with_socket_path(default_socket_path()?))
    }

    /// Creates a new IPC client with a custom socket path.
    pub fn with_socket_path(socket_path: PathBuf) -> Self {
        Self {
            socket_path,
            timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
        }
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &PathBuf {
        &self.socket_path
    }

    /// Sends a start command to the daemon.
    pub async fn start(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Start).await
    }

    /// Sends a pause command to the daemon.
    pub async fn pause(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Pause).await
    }

    /// Sends a reset command to the daemon.
    pub async fn reset(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Reset).await
    }

    /// Sends a mode switch to the daemon.
    pub async fn change_mode(&self, mode: TimerMode) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Mode { mode })
            .await
    }

    /// Sends duration overrides to the daemon.
    pub async fn set(&self, params: SetParams) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Set { params })
            .await
    }

    /// Toggles the completion chime.
    pub async fn sound(&self, enabled: bool) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Sound { enabled })
            .await
    }

    /// Sends a status query to the daemon.
    pub async fn status(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Status).await
    }

    /// Tells the daemon to end the session.
    pub async fn logout(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Logout).await
    }

    /// Sends a request to the daemon, retrying transport failures.
    ///
    /// A well-formed error response means the daemon received and rejected
    /// the request; re-sending it cannot help, so it is surfaced immediately.
    async fn send_request_with_retry(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut last_error = None;

        for attempt in 1..=MAX_RETRIES {
            match self.send_request(request).await {
                Ok(response) => {
                    if response.status == "error" {
                        anyhow::bail!("{}", response.message);
                    }
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!("Request failed (attempt {}/{}): {}", attempt, MAX_RETRIES, e);
                    last_error = Some(e);

                    if attempt < MAX_RETRIES {
                        let delay = Duration::from_millis(RETRY_DELAY_MS * u64::from(attempt));
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Request failed")))
    }

    /// Sends a single request to the daemon.
    async fn send_request(&self, request: &IpcRequest) -> Result<IpcResponse> {
        // Connect with timeout
        let mut stream = timeout(self.timeout, UnixStream::connect(&self.socket_path))
            .await
            .context("Connection timed out")?
            .context("Cannot reach the daemon. Start it with 'dayplan daemon'")?;

        // Serialize request
        let request_json = serde_json::to_string(request).context("Failed to serialize request")?;

        // Send request with timeout
        timeout(
            Duration::from_secs(IO_TIMEOUT_SECS),
            stream.write_all(request_json.as_bytes()),
        )
        .await
        .context("Write timed out")?
        .context("Failed to send request")?;

        // Flush
        timeout(Duration::from_secs(IO_TIMEOUT_SECS), stream.flush())
            .await
            .context("Flush timed out")?
            .context("Failed to flush request")?;

        // Shutdown write side to signal end of request
        stream
            .shutdown()
            .await
            .context("Failed to shut down write side")?;

        // Read response with timeout
        let mut buffer = vec![0u8; MAX_RESPONSE_SIZE];
        let n = timeout(
            Duration::from_secs(IO_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await
        .context("Read timed out")?
        .context("Failed to read response")?;

        if n == 0 {
            anyhow::bail!("Daemon closed the connection without a response");
        }

        // Deserialize response
        let response: IpcResponse =
            serde_json::from_slice(&buffer[..n]).context("Failed to parse response")?;

        Ok(response)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixListener;

    use crate::types::ResponseData;

    fn create_temp_socket_path() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sock");
        (dir, path)
    }

    /// Serves exactly one connection with a canned response.
    fn spawn_one_shot_server(
        socket_path: &PathBuf,
        response: IpcResponse,
    ) -> tokio::task::JoinHandle<IpcRequest> {
        let listener = UnixListener::bind(socket_path).unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut buffer = vec![0u8; 4096];
            let mut received = Vec::new();
            loop {
                let n = stream.read(&mut buffer).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buffer[..n]);
            }
            let request: IpcRequest = serde_json::from_slice(&received).unwrap();

            let json = serde_json::to_vec(&response).unwrap();
            stream.write_all(&json).await.unwrap();
            stream.flush().await.unwrap();

            request
        })
    }

    #[tokio::test]
    async fn test_start_round_trip() {
        let (_dir, path) = create_temp_socket_path();
        let response = IpcResponse::success("Timer started", Some(ResponseData::default()));
        let server = spawn_one_shot_server(&path, response);

        let client = IpcClient::with_socket_path(path);
        let received = client.start().await.unwrap();

        assert_eq!(received.status, "success");
        assert_eq!(received.message, "Timer started");
        assert!(matches!(server.await.unwrap(), IpcRequest::Start));
    }

    #[tokio::test]
    async fn test_mode_request_carries_target() {
        let (_dir, path) = create_temp_socket_path();
        let server = spawn_one_shot_server(&path, IpcResponse::success("ok", None));

        let client = IpcClient::with_socket_path(path);
        client.change_mode(TimerMode::LongBreak).await.unwrap();

        assert!(matches!(
            server.await.unwrap(),
            IpcRequest::Mode {
                mode: TimerMode::LongBreak
            }
        ));
    }

    #[tokio::test]
    async fn test_error_response_becomes_error() {
        let (_dir, path) = create_temp_socket_path();
        let server = spawn_one_shot_server(&path, IpcResponse::error("Not signed in"));

        let client = IpcClient::with_socket_path(path);
        let result = client.start().await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Not signed in"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_daemon_fails_after_retries() {
        let dir = tempfile::tempdir().unwrap();
        let client = IpcClient::with_socket_path(dir.path().join("absent.sock"));

        let result = client.status().await;
        assert!(result.is_err());
    }
}
