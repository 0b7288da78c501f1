// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod core;

pub mod cards;
pub mod error;
pub mod extract;
pub mod params;
