//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::handler::UpdateAction;
use crate::message::Message;
use fol_core::DecayConfig;
use fol_photos::{ImageFetcher, ImageProvider, RoundBuilder};

mod round;
pub mod timer;

pub use timer::ScoreTimer;

/// Background work owned on behalf of the session: the round builder, the
/// in-flight build task, and the score timer.
pub struct RoundRuntime<P, F> {
    builder: Arc<RoundBuilder<P, F>>,
    decay: DecayConfig,
    timer: ScoreTimer,
    build_task: Option<JoinHandle<()>>,
}

impl<P, F> RoundRuntime<P, F> {
    pub fn new(builder: RoundBuilder<P, F>, decay: DecayConfig) -> Self {
        Self {
            builder: Arc::new(builder),
            decay,
            timer: ScoreTimer::new(),
            build_task: None,
        }
    }

    pub fn builder(&self) -> &RoundBuilder<P, F> {
        &self.builder
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn is_building(&self) -> bool {
        self.build_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Cancel the timer and abort any in-flight build
    pub fn end_round(&mut self) {
        self.timer.cancel();
        if let Some(task) = self.build_task.take() {
            if !task.is_finished() {
                debug!("Aborting in-flight round build");
            }
            task.abort();
        }
    }
}

impl<P, F> Drop for RoundRuntime<P, F> {
    fn drop(&mut self) {
        self.end_round();
    }
}

/// Execute an action, spawning background tasks as needed
pub fn handle_action<P, F>(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    runtime: &mut RoundRuntime<P, F>,
) where
    P: ImageProvider + Sync + 'static,
    F: ImageFetcher + Sync + 'static,
{
    match action {
        UpdateAction::BeginRound { round_id } => {
            runtime.end_round();
            runtime.build_task = Some(round::spawn_round_build(
                round_id,
                runtime.builder.clone(),
                msg_tx.clone(),
            ));
        }

        UpdateAction::StartScoreTimer {
            round_id,
            initial_score,
        } => {
            runtime.timer.start(
                initial_score,
                runtime.decay,
                msg_tx.clone(),
                move |score| Message::ScoreTick { round_id, score },
                move || Message::ScoreExhausted { round_id },
            );
        }

        UpdateAction::EndRound => runtime.end_round(),
    }
}
