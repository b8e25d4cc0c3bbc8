/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::{bail, Error};
use chrono::{Datelike, Local, NaiveDate};
use std::cmp::Ordering;
use std::fmt;

/// Earliest reference month accepted by the CLI: the first month of the Real.
pub const MIN_REFERENCE: Month = Month {
	year: 1994,
	month: 7,
};

/// A calendar month, standing in for the first day of that month. Every
/// index point and every query in the series code is expressed in these, so
/// nothing downstream ever has to floor a date to the first of the month.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Month {
	year: i32,
	month: u32,
}

impl Month {
	pub fn new(year: i32, month: u32) -> Result<Month, Error> {
		if !(1..=12).contains(&month) {
			bail!("Invalid month: {}", month);
		}
		if !(1..=9999).contains(&year) {
			bail!("Invalid year: {}", year);
		}

		Ok(Month { year, month })
	}

	/// Parses "YYYY-MM", "YYYY-MM-DD" or "MM/YYYY". A day, if present, must
	/// be valid for its month but is otherwise dropped.
	pub fn from_str(s: &str) -> Result<Month, Error> {
		let s = s.trim();

		if let Some((m, y)) = s.split_once('/') {
			if m.len() > 2 || y.len() != 4 {
				bail!("Month format must be MM/YYYY: {}", s);
			}
			return Month::new(y.parse::<i32>()?, m.parse::<u32>()?);
		}

		let parts: Vec<&str> = s.split('-').collect();
		match parts.len() {
			2 => Month::new(parts[0].parse::<i32>()?, parts[1].parse::<u32>()?),
			3 => {
				let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
					.map_err(|e| anyhow::anyhow!("Invalid date {}: {}", s, e))?;
				Ok(Month::from_date(date))
			},
			_ => bail!("Month format must be YYYY-MM, YYYY-MM-DD or MM/YYYY"),
		}
	}

	/// Parses the six-digit "YYYYMM" period codes used by IBGE.
	pub fn from_period_code(code: &str) -> Result<Month, Error> {
		let code = code.trim();
		if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
			bail!("Period code must be YYYYMM: {}", code);
		}

		Month::new(code[..4].parse::<i32>()?, code[4..].parse::<u32>()?)
	}

	pub fn from_date(date: NaiveDate) -> Month {
		Month {
			year: date.year(),
			month: date.month(),
		}
	}

	/// The month the wall clock is currently in.
	pub fn current() -> Month {
		Month::from_date(Local::now().date_naive())
	}

	pub fn first_day(&self) -> NaiveDate {
		// year and month are validated on every construction path
		NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
	}

	/// Shifts by a signed number of calendar months.
	pub fn add_months(&self, months: i32) -> Month {
		let index = self.index() + months;
		Month {
			year: index.div_euclid(12),
			month: index.rem_euclid(12) as u32 + 1,
		}
	}

	/// Signed number of months from self to other; positive when other is
	/// later.
	pub fn months_until(&self, other: &Month) -> i32 {
		other.index() - self.index()
	}

	/// Renders as MM/YYYY, the form used in user-facing messages.
	pub fn label(&self) -> String {
		format!("{:02}/{:04}", self.month, self.year)
	}

	fn index(&self) -> i32 {
		self.year * 12 + self.month as i32 - 1
	}
}

impl PartialOrd for Month {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Month {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.year, self.month).cmp(&(other.year, other.month))
	}
}

impl fmt::Display for Month {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.first_day().format("%Y-%m"))
	}
}
