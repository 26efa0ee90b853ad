//! Command handlers.
//!
//! Each handler parses CLI-specific input, wires the session or adapters it
//! needs, and formats output for the terminal. Debate logic lives in
//! `wits-runtime`.

pub mod check;
pub mod run;
pub mod voices;
