//! gradquest-io — Terminal ports and configuration.
//!
//! Implements the core's collaborator traits against a real terminal and
//! loads the game's configuration, so `gradquest-core` never has to know
//! what a prompt looks like.

pub mod config;
pub mod console;

pub use config::{load_config, load_config_from, GameConfig};
pub use console::{ConsoleAnswerSource, ConsoleDialog, ConsoleSink};
