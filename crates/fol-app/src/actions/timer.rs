//! Score decay timer
//!
//! A repeating countdown that lowers a score by a fixed step every interval,
//! reports each new value, and stops by itself once the score reaches zero.
//! At most one countdown runs per timer: starting again cancels the previous
//! one first.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use fol_core::DecayConfig;

/// Handle to the running countdown, if any
#[derive(Debug, Default)]
pub struct ScoreTimer {
    cancel_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl ScoreTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start decaying `initial_score`.
    ///
    /// `on_tick` builds the message delivered after each decrement and
    /// `on_exhausted` the one delivered once the score hits zero; both are
    /// sent on `tx` so they are applied on the receiver's task. The first
    /// decrement happens one interval after start. A zero `initial_score`
    /// reports exhaustion straight away.
    pub fn start<M, T, E>(
        &mut self,
        initial_score: u32,
        decay: DecayConfig,
        tx: mpsc::Sender<M>,
        on_tick: T,
        on_exhausted: E,
    ) where
        M: Send + 'static,
        T: Fn(u32) -> M + Send + 'static,
        E: FnOnce() -> M + Send + 'static,
    {
        self.cancel();

        let (cancel_tx, mut cancel_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut score = initial_score;

            if score > 0 {
                let mut ticker = tokio::time::interval(decay.interval);
                // The first tick fires immediately; consume it so the first
                // decrement lands one interval after start.
                ticker.tick().await;

                while score > 0 {
                    tokio::select! {
                        _ = ticker.tick() => {
                            score = decay.apply(score);
                            trace!("Score tick: {}", score);
                            if tx.send(on_tick(score)).await.is_err() {
                                return;
                            }
                        }
                        _ = cancel_rx.changed() => {
                            debug!("Score timer cancelled at {}", score);
                            return;
                        }
                    }
                }
            }

            debug!("Score exhausted");
            let _ = tx.send(on_exhausted()).await;
        });

        self.cancel_tx = Some(cancel_tx);
        self.task = Some(task);
    }

    /// Stop the countdown. Safe to call when nothing is running.
    pub fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(true);
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// True while a countdown is still running
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for ScoreTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
