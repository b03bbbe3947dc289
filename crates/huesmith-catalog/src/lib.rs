//! Persistence for saved seed palettes: a small SQLite store plus JSON
//! import/export of the record list.

pub mod db;
pub mod models;

pub use db::PaletteStore;
pub use models::{PaletteColors, PaletteId, PaletteRecord};
