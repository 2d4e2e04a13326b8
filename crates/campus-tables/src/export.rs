//! Export functionality for table data
//!
//! Exports always use the visible columns and the active sort and filters.
//! Whether all matching rows or only the current page are written is an
//! explicit [`ExportScope`].

use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
	/// Comma-separated values (RFC 4180 quoting)
	Csv,
	/// JSON array of objects keyed by column header
	Json,
	/// PDF is rendered outside the engine; requesting it is rejected
	Pdf,
}

impl ExportFormat {
	/// Get file extension for this format
	pub fn extension(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::Json => "json",
			ExportFormat::Pdf => "pdf",
		}
	}

	/// Get MIME type for this format
	pub fn mime_type(&self) -> &'static str {
		match self {
			ExportFormat::Csv => "text/csv",
			ExportFormat::Json => "application/json",
			ExportFormat::Pdf => "application/pdf",
		}
	}
}

/// Which rows an export includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
	/// Every row matching search and filters, ignoring pagination
	#[default]
	AllMatching,
	/// Only the rows of the current page
	CurrentPage,
}

/// Options for a single export call
///
/// # Examples
///
/// ```
/// use campus_tables::{ExportFormat, ExportOptions, ExportScope};
///
/// let options = ExportOptions::new(ExportFormat::Csv)
///     .with_scope(ExportScope::CurrentPage)
///     .with_filename("transactions");
///
/// assert_eq!(options.scope, Some(ExportScope::CurrentPage));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
	/// Output format
	pub format: ExportFormat,
	/// Row scope; `None` uses the table's configured default
	pub scope: Option<ExportScope>,
	/// Write a header line (CSV only)
	pub include_headers: bool,
	/// Filename stem for the suggested download name
	pub filename: String,
}

impl ExportOptions {
	/// Create options for a format with the table's default scope
	pub fn new(format: ExportFormat) -> Self {
		Self {
			format,
			scope: None,
			include_headers: true,
			filename: "export".to_string(),
		}
	}

	/// Override the row scope
	pub fn with_scope(mut self, scope: ExportScope) -> Self {
		self.scope = Some(scope);
		self
	}

	/// Set whether to include headers
	pub fn with_headers(mut self, include: bool) -> Self {
		self.include_headers = include;
		self
	}

	/// Set the filename stem
	pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
		self.filename = filename.into();
		self
	}
}

/// Export result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
	/// Exported data as bytes
	pub data: Vec<u8>,
	/// MIME type
	pub mime_type: String,
	/// Suggested filename
	pub filename: String,
	/// Number of rows exported
	pub row_count: usize,
}

impl ExportResult {
	/// Create a new export result
	pub fn new(
		data: Vec<u8>,
		mime_type: impl Into<String>,
		filename: impl Into<String>,
		row_count: usize,
	) -> Self {
		Self {
			data,
			mime_type: mime_type.into(),
			filename: filename.into(),
			row_count,
		}
	}

	/// Get data size in bytes
	pub fn size_bytes(&self) -> usize {
		self.data.len()
	}

	/// Exported data as text
	pub fn as_text(&self) -> Result<&str> {
		std::str::from_utf8(&self.data).map_err(|e| TableError::Export(e.to_string()))
	}
}

/// CSV exporter
pub struct CsvExporter;

impl CsvExporter {
	/// Export rendered cells to CSV
	///
	/// # Examples
	///
	/// ```
	/// use campus_tables::export::CsvExporter;
	///
	/// let headers = vec!["Title".to_string(), "Price".to_string()];
	/// let rows = vec![vec!["Rust, the \"fun\" way".to_string(), "49".to_string()]];
	/// let csv = CsvExporter::export(&headers, &rows, true).unwrap();
	///
	/// assert_eq!(
	///     String::from_utf8(csv).unwrap(),
	///     "Title,Price\n\"Rust, the \"\"fun\"\" way\",49\n"
	/// );
	/// ```
	#[cfg(feature = "export")]
	pub fn export(headers: &[String], rows: &[Vec<String>], include_headers: bool) -> Result<Vec<u8>> {
		// The csv crate quotes fields containing separators, quotes or newlines
		// and doubles embedded quotes (RFC 4180)
		let mut writer = csv::Writer::from_writer(Vec::new());

		if include_headers {
			writer
				.write_record(headers)
				.map_err(|e| TableError::Export(format!("Failed to write CSV headers: {}", e)))?;
		}

		for row in rows {
			writer
				.write_record(row)
				.map_err(|e| TableError::Export(format!("Failed to write CSV row: {}", e)))?;
		}

		writer
			.flush()
			.map_err(|e| TableError::Export(format!("Failed to flush CSV writer: {}", e)))?;

		writer
			.into_inner()
			.map_err(|e| TableError::Export(format!("Failed to get CSV output: {}", e)))
	}

	/// CSV export is unavailable without the `export` feature
	#[cfg(not(feature = "export"))]
	pub fn export(_headers: &[String], _rows: &[Vec<String>], _include_headers: bool) -> Result<Vec<u8>> {
		Err(TableError::UnsupportedExport(
			"csv (enable the `export` feature)".to_string(),
		))
	}
}

/// JSON exporter
pub struct JsonExporter;

impl JsonExporter {
	/// Export rendered cells as an array of objects keyed by header
	pub fn export(headers: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>> {
		let records: Vec<serde_json::Map<String, serde_json::Value>> = rows
			.iter()
			.map(|row| {
				headers
					.iter()
					.zip(row)
					.map(|(header, cell)| (header.clone(), serde_json::Value::String(cell.clone())))
					.collect()
			})
			.collect();

		serde_json::to_vec_pretty(&records)
			.map_err(|e| TableError::Export(format!("JSON export failed: {}", e)))
	}
}

/// Writes rendered cells in the requested format
pub(crate) fn write(
	options: &ExportOptions,
	headers: &[String],
	rows: &[Vec<String>],
) -> Result<ExportResult> {
	let data = match options.format {
		ExportFormat::Csv => CsvExporter::export(headers, rows, options.include_headers)?,
		ExportFormat::Json => JsonExporter::export(headers, rows)?,
		ExportFormat::Pdf => {
			return Err(TableError::UnsupportedExport("pdf".to_string()));
		}
	};

	let filename = format!(
		"{}_{}.{}",
		options.filename,
		chrono::Utc::now().format("%Y%m%d_%H%M%S"),
		options.format.extension()
	);

	Ok(ExportResult::new(
		data,
		options.format.mime_type(),
		filename,
		rows.len(),
	))
}
