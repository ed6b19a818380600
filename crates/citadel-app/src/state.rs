//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use citadel_core::commands::PlayerCommand;
use citadel_core::state::GameStateSnapshot;
use citadel_sim::config::ConfigError;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("game loop is not running")]
    NotRunning,
}

/// Handle to a running game loop.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub thread: JoinHandle<()>,
    pub latest_snapshot: SharedSnapshot,
}

impl GameLoopHandle {
    /// Forward a player command to the loop.
    pub fn send(&self, command: PlayerCommand) -> Result<(), HostError> {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| HostError::NotRunning)
    }

    /// Most recent snapshot, if a tick has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        let _ = self.thread.join();
    }
}
