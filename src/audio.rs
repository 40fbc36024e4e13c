//! Playback engine and the media backends it drives.
//!
//! `PlaybackEngine` holds the transport rules (rate reset on load, clamped
//! seeking, ticketed play requests); a `MediaBackend` does the actual
//! decoding and output. `RodioBackend` is the real one.

mod backend;
mod engine;
pub mod ramp;
mod rodio_backend;
mod sink;
mod types;

pub use backend::MediaBackend;
pub use engine::PlaybackEngine;
pub use rodio_backend::RodioBackend;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
