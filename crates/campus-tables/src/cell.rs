//! Typed cell values and the ordering used for sorting
//!
//! Columns render text for display, search and export, but sort on a
//! [`CellValue`] so that numbers, dates and text each compare the way a user
//! expects.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Date format used when a date cell is rendered as text
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format used when a date-time cell is rendered as text
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A typed value extracted from a row for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
	/// Missing value
	Empty,
	/// Boolean flag
	Bool(bool),
	/// Any numeric value
	Number(f64),
	/// Calendar date
	Date(NaiveDate),
	/// Date and time without timezone
	DateTime(NaiveDateTime),
	/// Free text
	Text(String),
}

impl CellValue {
	fn rank(&self) -> u8 {
		match self {
			Self::Empty => 0,
			Self::Bool(_) => 1,
			Self::Number(_) => 2,
			Self::Date(_) => 3,
			Self::DateTime(_) => 4,
			Self::Text(_) => 5,
		}
	}

	/// Returns true for [`CellValue::Empty`] and blank text
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Empty => true,
			Self::Text(s) => s.trim().is_empty(),
			_ => false,
		}
	}

	/// Total order used by the sorter
	///
	/// Values of the same kind compare naturally (numbers numerically, dates
	/// chronologically, text with [`collate`]). Values of different kinds
	/// order by kind: empty, bool, number, date, date-time, text.
	///
	/// # Examples
	///
	/// ```
	/// use campus_tables::CellValue;
	/// use std::cmp::Ordering;
	///
	/// assert_eq!(CellValue::Number(2.0).compare(&CellValue::Number(10.0)), Ordering::Less);
	/// assert_eq!(
	///     CellValue::from("lesson 10").compare(&CellValue::from("Lesson 2")),
	///     Ordering::Greater
	/// );
	/// assert_eq!(CellValue::Empty.compare(&CellValue::Bool(false)), Ordering::Less);
	/// ```
	pub fn compare(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Self::Empty, Self::Empty) => Ordering::Equal,
			(Self::Bool(a), Self::Bool(b)) => a.cmp(b),
			(Self::Number(a), Self::Number(b)) => a.total_cmp(b),
			(Self::Date(a), Self::Date(b)) => a.cmp(b),
			(Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
			(Self::Text(a), Self::Text(b)) => collate(a, b),
			_ => self.rank().cmp(&other.rank()),
		}
	}

	/// Default text rendering of the value
	pub fn display(&self) -> String {
		match self {
			Self::Empty => String::new(),
			Self::Bool(b) => b.to_string(),
			Self::Number(n) => {
				if n.fract() == 0.0 && n.abs() < 1e15 {
					format!("{:.0}", n)
				} else {
					n.to_string()
				}
			}
			Self::Date(d) => d.format(DATE_FORMAT).to_string(),
			Self::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
			Self::Text(s) => s.clone(),
		}
	}
}

/// Compares two strings the way a list page sorts titles
///
/// Case is ignored and runs of ASCII digits compare by numeric value, so
/// `"Lesson 2"` sorts before `"Lesson 10"`. Strings equal under those rules
/// fall back to a raw comparison to keep the order total.
///
/// # Examples
///
/// ```
/// use campus_tables::cell::collate;
/// use std::cmp::Ordering;
///
/// assert_eq!(collate("apple", "Banana"), Ordering::Less);
/// assert_eq!(collate("Lesson 2", "Lesson 10"), Ordering::Less);
/// ```
pub fn collate(a: &str, b: &str) -> Ordering {
	natural_cmp(&a.to_lowercase(), &b.to_lowercase()).then_with(|| a.cmp(b))
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
	let mut left = a.chars().peekable();
	let mut right = b.chars().peekable();

	loop {
		match (left.peek().copied(), right.peek().copied()) {
			(None, None) => return Ordering::Equal,
			(None, Some(_)) => return Ordering::Less,
			(Some(_), None) => return Ordering::Greater,
			(Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
				let l_run = take_digits(&mut left);
				let r_run = take_digits(&mut right);
				let ord = compare_digit_runs(&l_run, &r_run);
				if ord != Ordering::Equal {
					return ord;
				}
			}
			(Some(l), Some(r)) => {
				left.next();
				right.next();
				let ord = l.cmp(&r);
				if ord != Ordering::Equal {
					return ord;
				}
			}
		}
	}
}

fn take_digits(iter: &mut Peekable<Chars<'_>>) -> String {
	let mut run = String::new();
	while let Some(c) = iter.next_if(|c| c.is_ascii_digit()) {
		run.push(c);
	}
	run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
	let a_trimmed = a.trim_start_matches('0');
	let b_trimmed = b.trim_start_matches('0');
	a_trimmed
		.len()
		.cmp(&b_trimmed.len())
		.then_with(|| a_trimmed.cmp(b_trimmed))
}

impl From<&str> for CellValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for CellValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for CellValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for CellValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<f32> for CellValue {
	fn from(value: f32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<i32> for CellValue {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<u32> for CellValue {
	fn from(value: u32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<i64> for CellValue {
	fn from(value: i64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<u64> for CellValue {
	fn from(value: u64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<NaiveDate> for CellValue {
	fn from(value: NaiveDate) -> Self {
		Self::Date(value)
	}
}

impl From<NaiveDateTime> for CellValue {
	fn from(value: NaiveDateTime) -> Self {
		Self::DateTime(value)
	}
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Self::Empty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("a", "B", Ordering::Less)]
	#[case("Lesson 2", "Lesson 10", Ordering::Less)]
	#[case("Lesson 010", "Lesson 9", Ordering::Greater)]
	#[case("react", "React", Ordering::Greater)]
	#[case("same", "same", Ordering::Equal)]
	fn test_collate(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
		assert_eq!(collate(a, b), expected);
	}

	#[rstest]
	fn test_numbers_compare_numerically() {
		assert_eq!(
			CellValue::Number(9.5).compare(&CellValue::Number(10.0)),
			Ordering::Less
		);
	}

	#[rstest]
	fn test_dates_compare_chronologically() {
		let earlier = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
		let later = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
		assert_eq!(
			CellValue::Date(earlier).compare(&CellValue::Date(later)),
			Ordering::Less
		);
	}

	#[rstest]
	fn test_mixed_kinds_order_by_rank() {
		assert_eq!(
			CellValue::Empty.compare(&CellValue::from("x")),
			Ordering::Less
		);
		assert_eq!(
			CellValue::from("1").compare(&CellValue::Number(2.0)),
			Ordering::Greater
		);
	}

	#[rstest]
	#[case(CellValue::Number(49.0), "49")]
	#[case(CellValue::Number(49.99), "49.99")]
	#[case(CellValue::Bool(true), "true")]
	#[case(CellValue::Empty, "")]
	fn test_display(#[case] value: CellValue, #[case] expected: &str) {
		assert_eq!(value.display(), expected);
	}

	#[rstest]
	fn test_option_conversion() {
		assert_eq!(CellValue::from(None::<i32>), CellValue::Empty);
		assert_eq!(CellValue::from(Some(3)), CellValue::Number(3.0));
	}
}
