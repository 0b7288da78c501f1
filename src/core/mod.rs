// src/core/mod.rs

pub mod html;
pub mod nodes;
pub mod sanitize;
