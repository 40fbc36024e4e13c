//! Track catalog: the fixed, ordered playlist loaded once at startup.
//!
//! `Catalog` owns the configured tracks and the wrap-around index arithmetic;
//! `AssetPaths` turns a track's file references into paths on disk.

mod assets;
mod model;

pub use assets::AssetPaths;
pub use model::*;
