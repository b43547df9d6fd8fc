//! `va-domain` — shared configuration, error and trace types for the
//! voicebot admin console crates.

pub mod config;
pub mod error;
pub mod trace;
