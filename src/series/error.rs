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
use crate::series::source::IndexSource;
use crate::util::month::Month;
use std::fmt;
use thiserror::Error;

/// Failures of the series computations. Each variant carries the months
/// involved so a caller can tell the user which references are supported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
	#[error(
		"{series}: no value at or before {} (series starts at {})",
		.query.label(),
		.earliest.label()
	)]
	NoCoverage {
		series: IndexSource,
		query: Month,
		earliest: Month,
	},

	#[error(
		"{series}: {reason} for {} (month before the reference); series available from {}",
		.month.label(),
		.earliest.label()
	)]
	SeriesUnavailable {
		series: IndexSource,
		month: Month,
		earliest: Month,
		reason: UnavailableReason,
	},

	#[error("{series}: {detail}")]
	InvalidInput { series: IndexSource, detail: String },

	/// The table itself could not be read or fetched.
	#[error("{series}: table could not be loaded: {detail}")]
	Unloaded { series: IndexSource, detail: String },

	#[error("reference salary must be zero or more, got {0}")]
	InvalidSalary(f64),
}

/// Why the anchor month of a ratio series could not be used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnavailableReason {
	/// The table starts after the anchor month
	Uncovered,
	/// The anchor resolved, but to zero or a negative number
	NonPositive(f64),
}

impl fmt::Display for UnavailableReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UnavailableReason::Uncovered => write!(f, "no index available"),
			UnavailableReason::NonPositive(v) => {
				write!(f, "invalid index {}", v)
			},
		}
	}
}
