//! UI rendering helpers for the terminal user interface.
//!
//! `view` projects application state into a `ViewModel` (pure, no terminal);
//! `draw` renders that model with `ratatui` and reports where the clickable
//! parts ended up so `hit` can map mouse clicks back to intents.

mod draw;
mod hit;
mod view;

pub use draw::draw;
pub use hit::{Hit, HitAreas};
pub use view::*;
