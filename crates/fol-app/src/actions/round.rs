//! Background round builds

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::message::Message;
use fol_core::RoundId;
use fol_photos::{ImageFetcher, ImageProvider, RoundBuilder};

/// Spawn a task that builds one round and reports the outcome, tagged with
/// `round_id`, on the message channel.
pub(super) fn spawn_round_build<P, F>(
    round_id: RoundId,
    builder: Arc<RoundBuilder<P, F>>,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    P: ImageProvider + Sync + 'static,
    F: ImageFetcher + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Building round {}", round_id);

        let message = match builder.build_round().await {
            Ok(round) => Message::RoundBuilt { round_id, round },
            Err(error) => {
                warn!("Round {} build failed: {}", round_id, error);
                Message::RoundFailed { round_id, error }
            }
        };

        if msg_tx.send(message).await.is_err() {
            debug!("Message channel closed before round {} was delivered", round_id);
        }
    })
}
