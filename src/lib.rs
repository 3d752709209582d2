//! Cookie Clicker: an idle clicker whose game-state engine runs in the browser.
//!
//! The engine ([`clicker::Engine`]) owns the authoritative [`clicker::GameState`],
//! the upgrade economy, the production/autosave timers and offline catch-up.
//! Everything else in the crate is host glue: rendering, input, storage,
//! logging.

pub mod clicker;
pub mod input;
pub mod logging;
pub mod time;
pub mod web;
pub mod widgets;
