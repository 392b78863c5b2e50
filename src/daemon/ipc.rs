//! IPC server for the planner daemon.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for timer commands
//! - Integration with TimerEngine and the JSON store

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};
use tracing::warn;

use crate::auth::SessionContext;
use crate::planner::daily_focus;
use crate::sound::SoundPlayer;
use crate::store::{JsonStore, SessionLog};
use crate::types::{IpcRequest, IpcResponse, ResponseData, SetParams, TimerMode};

use super::timer::TimerEngine;

// ============================================================================
// Constants
// ============================================================================

/// Maximum request size in bytes (4KB)
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    /// Unix socket listener
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// If the socket file already exists, it will be removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        // Remove existing socket file if present
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Applies a read timeout to prevent blocking indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = vec![0u8; MAX_REQUEST_SIZE];

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            anyhow::bail!("Connection closed by client");
        }

        let request: IpcRequest = serde_json::from_slice(&buffer[..n])
            .with_context(|| "Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        // Clean up socket file on drop
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the timer engine and the store.
pub struct RequestHandler {
    /// Shared reference to the timer engine
    engine: Arc<Mutex<TimerEngine>>,
    /// Shared reference to the JSON store
    store: Arc<JsonStore>,
    /// Shared reference to the chime player
    player: Arc<dyn SoundPlayer + Send + Sync>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(
        engine: Arc<Mutex<TimerEngine>>,
        store: Arc<JsonStore>,
        player: Arc<dyn SoundPlayer + Send + Sync>,
    ) -> Self {
        Self {
            engine,
            store,
            player,
        }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::Mode { mode } => self.handle_mode(mode).await,
            IpcRequest::Set { params } => self.handle_set(params).await,
            IpcRequest::Sound { enabled } => self.handle_sound(enabled).await,
            IpcRequest::Status => self.handle_status().await,
            IpcRequest::Logout => self.handle_logout().await,
        }
    }

    /// Handles the start command.
    ///
    /// Starting the timer requires a signed-in session; the other commands
    /// only inspect or configure state and stay available.
    async fn handle_start(&self) -> IpcResponse {
        if !SessionContext::load(&self.store).logged_in {
            return IpcResponse::error("Not signed in. Run `dayplan login` first.");
        }

        let mut engine = self.engine.lock().await;

        match engine.start() {
            Ok(()) => IpcResponse::success(
                "Timer started",
                Some(ResponseData::from_timer_state(engine.state())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the pause command.
    async fn handle_pause(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.pause() {
            Ok(()) => IpcResponse::success(
                "Timer paused",
                Some(ResponseData::from_timer_state(engine.state())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the reset command.
    async fn handle_reset(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.reset() {
            Ok(()) => IpcResponse::success(
                "Timer reset",
                Some(ResponseData::from_timer_state(engine.state())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the mode command.
    async fn handle_mode(&self, mode: TimerMode) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.change_mode(mode) {
            Ok(()) => IpcResponse::success(
                format!("Switched to {}", mode.as_str()),
                Some(ResponseData::from_timer_state(engine.state())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the set command.
    async fn handle_set(&self, params: SetParams) -> IpcResponse {
        if params.is_empty() {
            return IpcResponse::error("No duration given");
        }

        let mut engine = self.engine.lock().await;

        match engine.set_durations(&params) {
            Ok(()) => IpcResponse::success(
                "Durations updated",
                Some(ResponseData::from_timer_state(engine.state())),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the sound command.
    async fn handle_sound(&self, enabled: bool) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        engine.set_sound(enabled);

        if enabled {
            self.player.enable();
        } else {
            self.player.disable();
        }

        let message = if enabled {
            "Sound enabled"
        } else {
            "Sound disabled"
        };
        IpcResponse::success(message, Some(ResponseData::from_timer_state(engine.state())))
    }

    /// Handles the status command.
    ///
    /// Attaches today's recorded focus totals so the client can show them
    /// without reading the store itself.
    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;
        let data = ResponseData::from_timer_state(engine.state());
        drop(engine);

        let today = Local::now().date_naive();
        let sessions = SessionLog::new(&self.store).all();
        let focus = daily_focus(&sessions, today);

        IpcResponse::success(
            "",
            Some(data.with_today(focus.total_seconds, focus.session_count)),
        )
    }

    /// Handles the logout command.
    ///
    /// Pauses the countdown first so no intervals complete for a signed-out
    /// user, then clears the session keys.
    async fn handle_logout(&self) -> IpcResponse {
        {
            let mut engine = self.engine.lock().await;
            if let Err(e) = engine.pause() {
                warn!("Failed to pause timer on logout: {}", e);
            }
        }

        match SessionContext::clear(&self.store) {
            Ok(()) => IpcResponse::success("Signed out", None),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
