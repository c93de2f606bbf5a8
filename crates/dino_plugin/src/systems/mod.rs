// crates/dino_plugin/src/systems/mod.rs
//! Per-frame systems, run in draw order by `DinoGame::tick`.

pub mod menu;
pub mod money;
pub mod scene;
