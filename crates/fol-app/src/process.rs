//! Message processing: runs the update function and dispatches actions

use tokio::sync::mpsc;

use crate::actions::{handle_action, RoundRuntime};
use crate::handler;
use crate::message::Message;
use crate::state::GameSession;
use fol_photos::{ImageFetcher, ImageProvider};

/// Process a message through the TEA update function, following any chain
/// of follow-up messages.
pub fn process_message<P, F>(
    session: &mut GameSession,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    runtime: &mut RoundRuntime<P, F>,
) where
    P: ImageProvider + Sync + 'static,
    F: ImageFetcher + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(session, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx, runtime);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
