//! Admin dashboard settings
//!
//! Settings can be loaded from a TOML or JSON file, from `CAMPUS_*`
//! environment variables, or built in code. Every section falls back to its
//! defaults, so a file only needs the values it changes:
//!
//! ```toml
//! [tables]
//! page_size = 25
//! export_scope = "current_page"
//!
//! [search]
//! debounce_ms = 500
//! ```

use campus_filters::SidebarSettings;
use campus_forms::{AfterSubmit, FormSettings};
use campus_tables::{ExportScope, TableSettings};
use campus_tasks::{MAX_DEBOUNCE_MS, SearchSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Settings for every engine of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
	/// Data tables
	pub tables: TableSettings,
	/// Search inputs
	pub search: SearchSettings,
	/// Create/edit modals
	pub forms: FormSettings,
	/// Filter sidebars
	pub sidebar: SidebarSettings,
}

impl AdminSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Validate settings
	///
	/// # Examples
	///
	/// ```
	/// use campus::settings::AdminSettings;
	///
	/// let mut settings = AdminSettings::default();
	/// assert!(settings.validate().is_ok());
	///
	/// settings.tables.page_size = 0;
	/// assert!(settings.validate().is_err());
	/// ```
	pub fn validate(&self) -> Result<(), SettingsError> {
		let tables = &self.tables;
		if tables.page_size == 0 || tables.page_size > tables.max_page_size {
			return Err(SettingsError::ValidationError(format!(
				"tables.page_size must be between 1 and {}, got {}",
				tables.max_page_size, tables.page_size
			)));
		}

		if self.search.debounce_ms > MAX_DEBOUNCE_MS {
			return Err(SettingsError::ValidationError(format!(
				"search.debounce_ms must be at most {}, got {}",
				MAX_DEBOUNCE_MS, self.search.debounce_ms
			)));
		}

		Ok(())
	}

	/// Load settings from environment variables
	///
	/// Reads `CAMPUS_PAGE_SIZE`, `CAMPUS_EXPORT_SCOPE`, `CAMPUS_DEBOUNCE_MS`
	/// and `CAMPUS_AFTER_SUBMIT`; unset variables keep their defaults.
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Load settings from a variable lookup, as [`from_env`](Self::from_env)
	/// does for the process environment
	pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut settings = Self::default();

		if let Some(value) = lookup("CAMPUS_PAGE_SIZE") {
			settings.tables.page_size = parse_var("CAMPUS_PAGE_SIZE", &value)?;
		}

		if let Some(value) = lookup("CAMPUS_EXPORT_SCOPE") {
			settings.tables.export_scope = match value.trim().to_lowercase().as_str() {
				"all_matching" | "all" => ExportScope::AllMatching,
				"current_page" | "page" => ExportScope::CurrentPage,
				_ => return Err(invalid_var("CAMPUS_EXPORT_SCOPE", &value)),
			};
		}

		if let Some(value) = lookup("CAMPUS_DEBOUNCE_MS") {
			settings.search.debounce_ms = parse_var("CAMPUS_DEBOUNCE_MS", &value)?;
		}

		if let Some(value) = lookup("CAMPUS_AFTER_SUBMIT") {
			settings.forms.after_submit = match value.trim().to_lowercase().as_str() {
				"close" => AfterSubmit::Close,
				"reset" => AfterSubmit::Reset,
				"keep" => AfterSubmit::Keep,
				_ => return Err(invalid_var("CAMPUS_AFTER_SUBMIT", &value)),
			};
		}

		Ok(settings)
	}

	/// Load settings from a configuration file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		let settings: AdminSettings = match Format::of(&path)? {
			Format::Toml => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?,
			Format::Json => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?,
		};

		debug!(path = %path.display(), "loaded admin settings");
		Ok(settings)
	}

	/// Write settings to a configuration file, in the format its extension names
	pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
		let path = path.as_ref();
		let contents = match Format::of(path)? {
			Format::Toml => toml::to_string_pretty(self)
				.map_err(|e| SettingsError::SerializationError(e.to_string()))?,
			Format::Json => serde_json::to_string_pretty(self)
				.map_err(|e| SettingsError::SerializationError(e.to_string()))?,
		};

		std::fs::write(path, contents).map_err(|e| {
			SettingsError::FileError(format!("Failed to write {}: {}", path.display(), e))
		})
	}
}

enum Format {
	Toml,
	Json,
}

impl Format {
	fn of(path: &Path) -> Result<Self, SettingsError> {
		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Ok(Self::Toml),
			Some("json") => Ok(Self::Json),
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
	value.trim().parse().map_err(|_| invalid_var(key, value))
}

fn invalid_var(key: &str, value: &str) -> SettingsError {
	SettingsError::ParseError(format!("Invalid value for {}: {:?}", key, value))
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// Reading or writing the file failed
	#[error("File error: {0}")]
	FileError(String),

	/// The file or a variable could not be parsed
	#[error("Parse error: {0}")]
	ParseError(String),

	/// A value is out of range
	#[error("Validation error: {0}")]
	ValidationError(String),

	/// The file extension is neither `.toml` nor `.json`
	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),

	/// Serializing the settings failed
	#[error("Serialization error: {0}")]
	SerializationError(String),
}
