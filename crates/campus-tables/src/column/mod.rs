//! Column definitions
//!
//! This module provides the column types a page hands to a table:
//! - [`Column`]: The column trait
//! - [`BaseColumn`]: Column with a text accessor
//! - [`ValueColumn`]: Column with a typed accessor and optional custom renderer

pub mod base;
pub mod value;

pub use base::{Alignment, BaseColumn, Column};
pub use value::ValueColumn;
