//! `va-cli` — terminal front end for the voicebot admin console.

pub mod cli;
pub mod context;
pub mod terminal;
