//! Application module: the transport controller driving the player.
//!
//! `App` in `app::model` owns the catalog, the playback engine and the
//! current index; `app::input` maps key presses to intents and
//! `app::prompt` is the jump-to-track text prompt.

mod input;
mod model;
mod prompt;

pub use input::Intent;
pub use model::*;
pub use prompt::fuzzy_match_positions;

#[cfg(test)]
mod tests;
