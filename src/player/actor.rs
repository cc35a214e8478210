//! Single-owner voice actor.
//!
//! The `VoiceManager` and its renderer live on one dedicated thread. Callers
//! hold a cheap `PlayerHandle` that only sends commands, so every play/stop
//! is applied in arrival order without any locking around voice state. While
//! the renderer is initializing, later commands wait in the mailbox and run
//! once it is done.

use std::{
    sync::{Arc, Mutex, PoisonError},
    thread::{self, JoinHandle},
};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, warn};

use super::{display::DisplayState, renderer::Renderer, voices::VoiceManager};

/// Messages understood by the voice actor.
#[derive(Debug)]
pub enum PlayerCommand {
    /// Acquire the renderer ahead of the first key press.
    Initialize,
    Play(i32),
    Stop(i32),
    StopAll,
    /// Reply once everything queued before this has been applied.
    Flush(Sender<()>),
    /// Dispose the renderer and end the actor thread.
    Shutdown,
}

/// Sending side of the voice actor.
///
/// Dropping the handle shuts the actor down and joins its thread.
pub struct PlayerHandle {
    tx: Sender<PlayerCommand>,
    display: Arc<Mutex<DisplayState>>,
    thread: Option<JoinHandle<()>>,
}

impl PlayerHandle {
    /// Start the actor thread.
    ///
    /// The renderer is built on that thread, so audio handles that are not
    /// `Send` never have to cross threads.
    pub fn spawn<R, F>(make_renderer: F) -> std::io::Result<Self>
    where
        R: Renderer + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (tx, rx) = unbounded();
        let display = Arc::new(Mutex::new(DisplayState::default()));

        let shared = Arc::clone(&display);
        let thread = thread::Builder::new()
            .name("echord-voices".into())
            .spawn(move || run(VoiceManager::new(make_renderer()), rx, shared))?;

        Ok(Self {
            tx,
            display,
            thread: Some(thread),
        })
    }

    fn send(&self, command: PlayerCommand) {
        if let Err(err) = self.tx.send(command) {
            warn!("voice actor is gone, dropping {:?}", err.into_inner());
        }
    }

    pub fn initialize(&self) {
        self.send(PlayerCommand::Initialize);
    }

    pub fn play(&self, key: i32) {
        self.send(PlayerCommand::Play(key));
    }

    pub fn stop(&self, key: i32) {
        self.send(PlayerCommand::Stop(key));
    }

    pub fn stop_all(&self) {
        self.send(PlayerCommand::StopAll);
    }

    /// Block until every command sent so far has been applied.
    pub fn flush(&self) {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(PlayerCommand::Flush(reply_tx));
        // An error means the actor exited; nothing is left to wait for.
        let _ = reply_rx.recv();
    }

    /// Latest snapshot published by the actor.
    pub fn display(&self) -> DisplayState {
        self.display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop all voices, dispose the renderer and join the actor thread.
    pub fn shutdown(mut self) {
        self.join();
    }

    fn join(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        self.send(PlayerCommand::Shutdown);
        if thread.join().is_err() {
            warn!("voice actor panicked");
        }
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        self.join();
    }
}

fn publish<R: Renderer>(voices: &VoiceManager<R>, display: &Mutex<DisplayState>) {
    let state = voices.display_state();
    *display.lock().unwrap_or_else(PoisonError::into_inner) = state;
}

fn run<R: Renderer>(
    mut voices: VoiceManager<R>,
    rx: Receiver<PlayerCommand>,
    display: Arc<Mutex<DisplayState>>,
) {
    debug!("voice actor started");

    for command in rx.iter() {
        match command {
            PlayerCommand::Initialize => {
                if let Err(err) = voices.initialize() {
                    warn!("renderer failed to start: {err}");
                }
            }
            PlayerCommand::Play(key) => voices.play(key),
            PlayerCommand::Stop(key) => voices.stop(key),
            PlayerCommand::StopAll => voices.stop_all(),
            PlayerCommand::Flush(reply) => {
                let _ = reply.send(());
                continue;
            }
            PlayerCommand::Shutdown => break,
        }
        publish(&voices, &display);
    }

    voices.dispose();
    publish(&voices, &display);
    debug!("voice actor stopped");
}
