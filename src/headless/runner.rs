//! Headless mode runner - main event loop without a UI
//!
//! Reads player commands from stdin on a blocking thread, drives the engine
//! from the message channel, and writes every engine event as NDJSON.

use std::io::BufRead;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use fol_app::config::Settings;
use fol_app::{spawn_signal_handler, Engine, EngineEvent, Message};
use fol_core::prelude::*;
use fol_photos::{ImageFetcher, ImageProvider};

use super::HeadlessEvent;

/// Run in headless mode against the real photo service
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Find or Lose starting in HEADLESS mode");
    info!("Photo service: {}", settings.photos.api_base_url);
    info!("═══════════════════════════════════════════════════════");

    let engine =
        Engine::with_photo_service(settings).context("Failed to create photo service client")?;

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    run_engine(engine).await
}

/// Drive an engine until a quit is requested or the channel closes
pub async fn run_engine<P, F>(mut engine: Engine<P, F>) -> Result<()>
where
    P: ImageProvider + Sync + 'static,
    F: ImageFetcher + Sync + 'static,
{
    let mut events = engine.subscribe();
    let signal_task = spawn_signal_handler(engine.msg_sender());

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown();
    flush_events(&mut events);
    signal_task.abort();

    info!("Find or Lose headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop<P, F>(
    engine: &mut Engine<P, F>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()>
where
    P: ImageProvider + Sync + 'static,
    F: ImageFetcher + Sync + 'static,
{
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        if !engine.process_next_message().await {
            info!("Message channel closed");
            break;
        }

        flush_events(events);
    }

    Ok(())
}

/// Write every event published since the last flush
fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                for line in HeadlessEvent::from_engine_event(&event) {
                    line.emit();
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Dropped {} engine events", skipped);
                HeadlessEvent::error(format!("{} events dropped", skipped), false).emit();
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

/// A parsed stdin line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Guess(usize),
    Quit,
}

impl Command {
    pub fn into_message(self) -> Message {
        match self {
            Command::Start => Message::Start,
            Command::Stop => Message::Stop,
            Command::Guess(index) => Message::Guess { index },
            Command::Quit => Message::Quit,
        }
    }
}

/// Parse one stdin line.
///
/// Returns `Ok(None)` for blank lines. Slot numbers are passed through
/// unchecked; the session ignores out-of-range guesses.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };

    let command = match head {
        "s" | "start" => Command::Start,
        "x" | "stop" => Command::Stop,
        "q" | "quit" => Command::Quit,
        "g" | "guess" => {
            let arg = parts
                .next()
                .ok_or_else(|| format!("'{}' needs a slot number", head))?;
            Command::Guess(parse_slot(arg)?)
        }
        digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) => {
            Command::Guess(parse_slot(digit)?)
        }
        other => return Err(format!("Unknown command: {}", other)),
    };

    if let Some(extra) = parts.next() {
        return Err(format!("Unexpected argument: {}", extra));
    }

    Ok(Some(command))
}

fn parse_slot(arg: &str) -> std::result::Result<usize, String> {
    arg.parse()
        .map_err(|_| format!("Invalid slot number: {}", arg))
}

/// Read stdin commands and forward them to the message channel (blocking)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    let stdin = std::io::stdin();
    forward_commands(stdin.lock(), &msg_tx);
    info!("Stdin reader exiting");
}

/// Forward parsed commands until `quit`, end of input, or a read error.
///
/// Input ending without `quit` still sends [`Message::Quit`]; the engine
/// keeps its own sender, so the loop would otherwise never finish.
fn forward_commands<R: BufRead>(reader: R, msg_tx: &mpsc::Sender<Message>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(command)) => {
                info!("Stdin: {:?}", command);
                if msg_tx.blocking_send(command.into_message()).is_err() {
                    return;
                }
                if command == Command::Quit {
                    return;
                }
            }
            Ok(None) => {}
            Err(message) => {
                warn!("{}", message);
                HeadlessEvent::error(message, false).emit();
            }
        }
    }

    info!("Stdin closed, quitting");
    let _ = msg_tx.blocking_send(Message::Quit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(parse_command("start"), Ok(Some(Command::Start)));
        assert_eq!(parse_command("s"), Ok(Some(Command::Start)));
        assert_eq!(parse_command("stop"), Ok(Some(Command::Stop)));
        assert_eq!(parse_command("x"), Ok(Some(Command::Stop)));
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command(" q "), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_guess_forms() {
        assert_eq!(parse_command("guess 2"), Ok(Some(Command::Guess(2))));
        assert_eq!(parse_command("g 0"), Ok(Some(Command::Guess(0))));
        assert_eq!(parse_command("3"), Ok(Some(Command::Guess(3))));
        assert_eq!(parse_command("guess 7"), Ok(Some(Command::Guess(7))));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("reload").is_err());
        assert!(parse_command("guess").is_err());
        assert!(parse_command("g two").is_err());
        assert!(parse_command("start now").is_err());
        assert!(parse_command("12").is_err());
    }

    #[test]
    fn test_command_into_message() {
        assert!(matches!(
            Command::Guess(1).into_message(),
            Message::Guess { index: 1 }
        ));
        assert!(matches!(Command::Quit.into_message(), Message::Quit));
    }

    fn forwarded(input: &str) -> Vec<Message> {
        let (tx, mut rx) = mpsc::channel(16);
        forward_commands(std::io::Cursor::new(input), &tx);
        drop(tx);

        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    #[test]
    fn test_end_of_input_sends_quit() {
        let messages = forwarded("start\nreload\n\ng 2\n");

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], Message::Start));
        assert!(matches!(messages[1], Message::Guess { index: 2 }));
        assert!(matches!(messages[2], Message::Quit));
    }

    #[test]
    fn test_explicit_quit_is_sent_once() {
        let messages = forwarded("s\nq\nstart\n");

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], Message::Start));
        assert!(matches!(messages[1], Message::Quit));
    }
}
