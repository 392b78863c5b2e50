//! Daemon for the planner's focus timer.
//!
//! This module contains the core daemon functionality:
//! - `timer`: Timer engine with mode transitions and countdown logic
//! - `ipc`: Unix Domain Socket server and request handling
//!
//! The daemon owns the timer state. Three tasks cooperate:
//! - a ticker that advances the engine once per second
//! - an effect task that records sessions and plays the chime
//! - the accept loop serving client connections

pub mod ipc;
pub mod timer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::sound::{create_player, SoundPlayer};
use crate::store::{JsonStore, SessionLog};
use crate::types::TimerDurations;

pub use ipc::{IpcServer, RequestHandler};
pub use timer::{TimerEngine, TimerEvent};

/// Environment variable overriding the socket path.
pub const SOCKET_ENV: &str = "DAYPLAN_SOCKET";

/// Socket path relative to the home directory.
const DEFAULT_SOCKET: &str = ".dayplan/dayplan.sock";

/// Resolves the socket path: the environment override when set, otherwise
/// `~/.dayplan/dayplan.sock`.
pub fn default_socket_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(SOCKET_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DEFAULT_SOCKET))
}

/// Daemon startup options.
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    /// Socket to listen on
    pub socket_path: PathBuf,
    /// Backing store file
    pub store_path: PathBuf,
    /// Start with the chime disabled
    pub no_sound: bool,
}

impl DaemonOptions {
    /// Builds options from the default paths.
    pub fn from_defaults(no_sound: bool) -> Result<Self> {
        Ok(Self {
            socket_path: default_socket_path()?,
            store_path: JsonStore::default_path()?,
            no_sound,
        })
    }
}

/// Runs the daemon until interrupted.
pub async fn run(options: DaemonOptions) -> Result<()> {
    info!("Starting daemon on {:?}", options.socket_path);

    let store = Arc::new(JsonStore::open(&options.store_path)?);
    let player = create_player(options.no_sound);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut engine = TimerEngine::new(TimerDurations::default(), event_tx);
    if options.no_sound {
        engine.set_sound(false);
    }
    let engine = Arc::new(Mutex::new(engine));

    let server = IpcServer::new(&options.socket_path)?;
    let handler = Arc::new(RequestHandler::new(
        Arc::clone(&engine),
        Arc::clone(&store),
        Arc::clone(&player),
    ));

    let ticker = tokio::spawn(run_ticker(Arc::clone(&engine)));
    let effects = tokio::spawn(run_effects(event_rx, Arc::clone(&store), player));

    let result = accept_loop(&server, handler).await;

    ticker.abort();
    effects.abort();

    info!("Daemon stopped");
    result
}

/// Advances the engine once per second.
///
/// The lock is held only for the duration of a single tick, so client
/// requests interleave freely.
async fn run_ticker(engine: Arc<Mutex<TimerEngine>>) {
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let mut engine = engine.lock().await;
        if let Err(e) = engine.tick_once() {
            error!("Timer tick failed: {}", e);
        }
    }
}

/// Applies side effects of timer events: session recording and the chime.
///
/// Both effects are best-effort. A full disk or a missing audio device
/// must not stop the countdown, so failures are logged and dropped.
async fn run_effects(
    mut event_rx: mpsc::UnboundedReceiver<TimerEvent>,
    store: Arc<JsonStore>,
    player: Arc<dyn SoundPlayer + Send + Sync>,
) {
    while let Some(event) = event_rx.recv().await {
        match event {
            TimerEvent::FocusCompleted { duration_seconds } => {
                info!("Focus interval completed ({}s)", duration_seconds);

                let today = Local::now().date_naive();
                if let Err(e) = SessionLog::new(&store).record(duration_seconds, today) {
                    warn!("Failed to record focus session: {}", e);
                }

                if let Err(e) = player.play_chime() {
                    warn!("Failed to play completion chime: {}", e);
                }
            }
            TimerEvent::BreakCompleted { mode } => {
                info!("Break completed ({})", mode.as_str());

                if let Err(e) = player.play_chime() {
                    warn!("Failed to play completion chime: {}", e);
                }
            }
            TimerEvent::Tick { .. } => {}
            other => debug!("Timer event: {:?}", other),
        }
    }
}

/// Serves client connections until Ctrl-C.
async fn accept_loop(server: &IpcServer, handler: Arc<RequestHandler>) -> Result<()> {
    loop {
        tokio::select! {
            accepted = server.accept() => {
                let mut stream = match accepted {
                    Ok(stream) => stream,
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    let request = match IpcServer::receive_request(&mut stream).await {
                        Ok(request) => request,
                        Err(e) => {
                            debug!("Dropping connection: {}", e);
                            return;
                        }
                    };

                    let response = handler.handle(request).await;
                    if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
                        warn!("Failed to send response: {}", e);
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received interrupt, shutting down");
                return Ok(());
            }
        }
    }
}
