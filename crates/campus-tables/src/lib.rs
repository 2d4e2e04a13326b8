//! Headless data table engine for Campus admin screens
//!
//! This crate provides the tabular presentation layer shared by every admin
//! list page (courses, quizzes, transactions, students, ...). It owns no
//! rendering: it turns rows and column definitions into a [`TableView`] that
//! a UI layer draws.
//!
//! # Features
//!
//! - **Column Definition**: Trait-based columns with text or typed accessors
//! - **Sorting**: Single-key sorting cycling ascending, descending, none
//! - **Search**: Free-text search over the visible columns
//! - **Filtering**: Column text filters and structured (sidebar) filters
//! - **Pagination**: Client-side paging or mapping of server-side pages
//! - **Selection**: Per-page row selection with a tri-state header checkbox
//! - **Export**: CSV (requires `export` feature) and JSON export
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[SimpleTable] --> B[Columns]
//!     A --> C[Rows]
//!     A --> D[SortConfig]
//!     A --> E[Pagination]
//!     A --> F[Filters]
//!     A --> G[Selection]
//!     F --> H[Search]
//!     F --> I[FilterSelection]
//!     A --> J[Export]
//!     A --> K[TableView]
//! ```
//!
//! # Example
//!
//! ```rust
//! use campus_tables::column::BaseColumn;
//! use campus_tables::{SimpleTable, TableBody, TableRow};
//!
//! #[derive(Debug)]
//! struct Course {
//!     id: u32,
//!     title: String,
//! }
//!
//! impl TableRow for Course {
//!     fn row_id(&self) -> String {
//!         self.id.to_string()
//!     }
//! }
//!
//! let mut table = SimpleTable::with_rows(vec![
//!     Course { id: 1, title: "Advanced React".to_string() },
//!     Course { id: 2, title: "Node.js Masterclass".to_string() },
//! ]);
//! table.add_column(Box::new(BaseColumn::new("title", "Title", |c: &Course| c.title.clone())));
//! table.search("advanced");
//!
//! let view = table.render();
//! match view.body {
//!     TableBody::Rows(rows) => assert_eq!(rows.len(), 1),
//!     TableBody::Empty(_) => unreachable!(),
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod cell;
pub mod column;
pub mod error;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod selection;
pub mod settings;
pub mod sorting;
pub mod table;
pub mod view;

// Re-exports for convenience
pub use cell::CellValue;
pub use column::{Alignment, BaseColumn, Column, ValueColumn};
pub use error::{Result, TableError};
pub use export::{ExportFormat, ExportOptions, ExportResult, ExportScope};
pub use filter::FilterSelection;
pub use pagination::{PageInfo, PageRequest, PageResponse, Pagination};
pub use selection::{CheckState, Selection};
pub use settings::TableSettings;
pub use sorting::{SortConfig, SortOrder};
pub use table::{SimpleTable, Table, TableRow};
pub use view::{EmptyState, HeaderView, RowView, TableBody, TableView};
