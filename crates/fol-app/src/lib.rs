//! fol-app - Game session state and orchestration for Find or Lose
//!
//! Follows the Elm Architecture: player input and background results arrive
//! as [`Message`]s, [`handler::update`] applies them to the [`GameSession`]
//! and returns [`handler::UpdateAction`]s, and the actions module runs the
//! round builds and the score timer. [`Engine`] ties the pieces together for
//! presentation adapters.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;

pub use actions::{RoundRuntime, ScoreTimer};
pub use config::Settings;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use signals::spawn_signal_handler;
pub use state::GameSession;
