//! Engine - orchestration state shared by presentation adapters
//!
//! The Engine owns the game session, the message channel, the background
//! round/timer runtime, and the event broadcaster. Adapters feed it player
//! input through [`Engine::start`], [`Engine::stop`], and [`Engine::guess`]
//! (or by sending [`Message`]s on [`Engine::msg_sender`]) and observe the
//! session through [`Engine::subscribe`].

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::actions::RoundRuntime;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::state::GameSession;
use fol_core::prelude::*;
use fol_core::{GamePhase, RoundId};
use fol_photos::{
    build_http_client, HttpImageFetcher, ImageFetcher, ImageProvider, RoundBuilder,
    UnsplashProvider,
};

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StateSnapshot {
    phase: GamePhase,
    level: u32,
    score: u32,
    active_round_id: Option<RoundId>,
    round_shown: bool,
    guess_count: u64,
}

impl StateSnapshot {
    fn capture(session: &GameSession) -> Self {
        Self {
            phase: session.phase,
            level: session.level,
            score: session.score,
            active_round_id: session.active_round_id(),
            round_shown: session.round.is_some(),
            guess_count: session.guess_count,
        }
    }
}

/// Orchestration engine for a game session.
pub struct Engine<P, F> {
    /// TEA game state (the Model); only `update()` mutates it
    session: GameSession,

    /// Sender half of the unified message channel.
    /// Input sources (signal handler, stdin reader) get clones via `msg_sender()`.
    msg_tx: mpsc::Sender<Message>,

    /// Receiver half, drained by `process_next_message()`
    msg_rx: mpsc::Receiver<Message>,

    /// Loaded settings
    pub settings: Settings,

    runtime: RoundRuntime<P, F>,

    /// Event broadcaster for presentation adapters.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<UnsplashProvider, HttpImageFetcher> {
    /// Create an engine backed by the real photo service.
    pub fn with_photo_service(settings: Settings) -> Result<Self> {
        let client = build_http_client(settings.photos.request_timeout())?;
        let provider = UnsplashProvider::new(client.clone(), settings.photos.provider_config()?);
        let fetcher = HttpImageFetcher::new(client);
        Ok(Self::new(settings, RoundBuilder::new(provider, fetcher)))
    }
}

impl<P, F> Engine<P, F>
where
    P: ImageProvider + Sync + 'static,
    F: ImageFetcher + Sync + 'static,
{
    /// Create a new Engine.
    ///
    /// - Creates the session with the configured round bonus
    /// - Creates message channel (capacity 256)
    /// - Creates the round/timer runtime with the configured decay
    /// - Creates the event broadcast channel (capacity 256)
    pub fn new(settings: Settings, builder: RoundBuilder<P, F>) -> Self {
        let session = GameSession::new(settings.game.round_bonus);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let runtime = RoundRuntime::new(builder, settings.game.decay());
        let (event_tx, _) = broadcast::channel(256);

        Self {
            session,
            msg_tx,
            msg_rx,
            settings,
            runtime,
            event_tx,
        }
    }

    /// Read-only view of the game session
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Get a clone of the message sender
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    pub fn builder(&self) -> &RoundBuilder<P, F> {
        self.runtime.builder()
    }

    /// Start a game (no-op while playing)
    pub fn start(&mut self) {
        self.process_message(Message::Start);
    }

    /// Stop the game (no-op while stopped)
    pub fn stop(&mut self) {
        self.process_message(Message::Stop);
    }

    /// Evaluate a guess at slot `index`
    pub fn guess(&mut self, index: usize) {
        self.process_message(Message::Guess { index });
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Emits EngineEvents based on state changes detected by comparing
    /// before/after snapshots.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.session);

        process::process_message(&mut self.session, msg, &self.msg_tx, &mut self.runtime);

        let post = StateSnapshot::capture(&self.session);
        if pre != post {
            self.emit_events(&pre, &post);
        }
    }

    /// Wait for the next message and process it.
    ///
    /// Returns `false` if the channel closed.
    pub async fn process_next_message(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    pub fn should_quit(&self) -> bool {
        self.session.should_quit()
    }

    pub fn is_timer_active(&self) -> bool {
        self.runtime.is_timer_active()
    }

    pub fn is_building(&self) -> bool {
        self.runtime.is_building()
    }

    /// Cancel background work and notify subscribers.
    pub fn shutdown(&mut self) {
        info!("Engine shutting down");
        self.runtime.end_round();
        self.emit(EngineEvent::Shutdown);
    }

    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if post.guess_count != pre.guess_count {
            if let Some(outcome) = self.session.last_guess {
                self.emit(EngineEvent::GuessEvaluated { outcome });
            }
        }

        if post.phase != pre.phase {
            self.emit(EngineEvent::PhaseChanged {
                old_phase: pre.phase,
                new_phase: post.phase,
            });

            if post.phase == GamePhase::Stopped {
                if let Some(reason) = self.session.last_stop.clone() {
                    self.emit(EngineEvent::GameStopped { reason });
                }
            }
        }

        let new_round = post.active_round_id != pre.active_round_id;

        if let Some(round_id) = post.active_round_id {
            if new_round && !post.round_shown {
                self.emit(EngineEvent::RoundLoading {
                    round_id,
                    level: post.level,
                });
            }

            if post.round_shown && (new_round || !pre.round_shown) {
                if let Some(round) = self.session.round.clone() {
                    self.emit(EngineEvent::RoundReady {
                        round_id,
                        level: post.level,
                        score: post.score,
                        round,
                    });
                }
            }
        }

        if post.score != pre.score {
            self.emit(EngineEvent::ScoreChanged { score: post.score });
        }
    }

    fn emit(&self, event: EngineEvent) {
        debug!("Engine event: {}", event.event_type());
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
