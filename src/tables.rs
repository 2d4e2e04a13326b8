//! Tabular data engine.
//!
//! # Examples
//!
//! ```rust
//! use campus::tables::{Pagination, TableSettings};
//!
//! let settings = TableSettings::default();
//! let pagination = Pagination::new(settings.page_size);
//! assert_eq!(pagination.per_page, 10);
//! ```

pub use campus_tables::*;
