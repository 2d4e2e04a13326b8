//! Filter sidebar and URL view state.

pub use campus_filters::*;
