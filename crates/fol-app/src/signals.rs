//! OS signal handling: a termination signal quits the game like the `quit` command

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::message::Message;
use fol_core::prelude::*;

/// Spawn a task that sends [`Message::Quit`] on the first SIGINT/SIGTERM
/// (Ctrl+C on Windows).
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match wait_for_shutdown_signal().await {
            Ok(name) => {
                info!("Received {}, quitting", name);
                let _ = tx.send(Message::Quit).await;
            }
            Err(e) => error!("Signal handler error: {}", e),
        }
    })
}

/// Resolve with the name of the signal that arrived
async fn wait_for_shutdown_signal() -> Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())
            .map_err(|e| Error::terminal(format!("SIGINT handler: {}", e)))?;
        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| Error::terminal(format!("SIGTERM handler: {}", e)))?;

        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        Ok(name)
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::terminal(format!("Ctrl+C handler: {}", e)))?;
        Ok("Ctrl+C")
    }
}
