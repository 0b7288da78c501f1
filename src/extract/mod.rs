// src/extract/mod.rs
mod cards;

pub use cards::{extract_cards, extract_from_doc};
