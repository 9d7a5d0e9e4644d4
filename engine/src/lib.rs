// FICHIER : engine/src/lib.rs

pub mod ai;
pub mod experiment;
pub mod genetics;
pub mod utils;
