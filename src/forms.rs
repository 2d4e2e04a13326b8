//! Dynamic form engine.

pub use campus_forms::*;
