//! Find or Lose
//!
//! Spot the odd image out among four before the decaying score runs out.
//! Game logic lives in the workspace crates; this crate hosts the headless
//! presentation adapter used by the `findorlose` binary.

pub mod headless;

pub use headless::runner::{run_engine, run_headless};
