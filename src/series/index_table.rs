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

use crate::series::error::SeriesError;
use crate::series::source::IndexSource;
use crate::util::month::Month;

/// A value known to be in force from its effective month until the next
/// point of the same table supersedes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexPoint {
	pub effective: Month,
	pub value: f64,
}

impl IndexPoint {
	pub fn new(effective: Month, value: f64) -> Self {
		Self { effective, value }
	}
}

/// An immutable, ascending, duplicate-free monthly table for one source.
///
/// Built once from whatever the acquisition layer produced; after
/// construction it is only ever read.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexTable {
	source: IndexSource,
	points: Vec<IndexPoint>,
}

impl IndexTable {
	/// Sorts the points and collapses repeated months, keeping the point
	/// that came last in the input. Empty tables and non-finite values are
	/// refused; zero or negative values are kept, since the engines decide
	/// what those mean.
	pub fn new(
		source: IndexSource,
		mut points: Vec<IndexPoint>,
	) -> Result<Self, SeriesError> {
		if points.is_empty() {
			return Err(SeriesError::InvalidInput {
				series: source,
				detail: "table has no points".to_string(),
			});
		}

		if let Some(p) = points.iter().find(|p| !p.value.is_finite()) {
			return Err(SeriesError::InvalidInput {
				series: source,
				detail: format!(
					"non-finite value {} at {}",
					p.value,
					p.effective.label()
				),
			});
		}

		// stable, so equal months keep their input order
		points.sort_by_key(|p| p.effective);

		let mut deduped: Vec<IndexPoint> = Vec::with_capacity(points.len());
		for point in points {
			match deduped.last_mut() {
				Some(last) if last.effective == point.effective => {
					*last = point
				},
				_ => deduped.push(point),
			}
		}

		Ok(Self {
			source,
			points: deduped,
		})
	}

	pub fn source(&self) -> IndexSource {
		self.source
	}

	pub fn points(&self) -> &[IndexPoint] {
		&self.points
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// First month with a known value. Never fails: tables are non-empty.
	pub fn earliest(&self) -> Month {
		self.points[0].effective
	}

	pub fn latest(&self) -> Month {
		self.points[self.points.len() - 1].effective
	}

	/// Retrieves the value in force at the given month: the point with the
	/// greatest effective month at or before it. An exact match is simply
	/// the latest such point.
	pub fn resolve(&self, query: Month) -> Result<f64, SeriesError> {
		// number of points at or before the query
		let at_or_before =
			self.points.partition_point(|p| p.effective <= query);

		match at_or_before {
			0 => Err(SeriesError::NoCoverage {
				series: self.source,
				query,
				earliest: self.earliest(),
			}),
			n => Ok(self.points[n - 1].value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn month(s: &str) -> Month {
		Month::from_str(s).unwrap()
	}

	fn table(points: &[(&str, f64)]) -> IndexTable {
		IndexTable::new(
			IndexSource::Ipca,
			points
				.iter()
				.map(|(m, v)| IndexPoint::new(month(m), *v))
				.collect(),
		)
		.unwrap()
	}

	#[test]
	fn test_resolve_as_of() {
		let t = table(&[("2020-01-01", 100.0), ("2021-01-01", 110.0)]);

		assert_eq!(t.resolve(month("2020-06-01")).unwrap(), 100.0);
		assert_eq!(t.resolve(month("2021-06-01")).unwrap(), 110.0);
		assert_eq!(
			t.resolve(month("2019-12-01")),
			Err(SeriesError::NoCoverage {
				series: IndexSource::Ipca,
				query: month("2019-12"),
				earliest: month("2020-01"),
			})
		);
	}

	#[test]
	fn test_exact_match_wins() {
		let t = table(&[
			("2020-01", 100.0),
			("2020-02", 101.0),
			("2020-03", 103.0),
		]);

		assert_eq!(t.resolve(month("2020-01")).unwrap(), 100.0);
		assert_eq!(t.resolve(month("2020-02")).unwrap(), 101.0);
		assert_eq!(t.resolve(month("2020-03")).unwrap(), 103.0);
		assert_eq!(t.resolve(month("2030-03")).unwrap(), 103.0);
	}

	#[test]
	fn test_flat_between_points() {
		let t = table(&[("2019-01", 998.0), ("2020-01", 1039.0)]);

		let first = t.resolve(month("2019-01")).unwrap();
		for m in 1..12 {
			let q = month("2019-01").add_months(m);
			assert_eq!(t.resolve(q).unwrap(), first);
		}
		assert_eq!(t.resolve(month("2020-01")).unwrap(), 1039.0);
	}

	#[test]
	fn test_sorts_and_dedupes() {
		let t = table(&[
			("2021-01", 3.0),
			("2020-01", 1.0),
			("2020-06", 2.0),
			("2020-01", 1.5),
		]);

		assert_eq!(t.len(), 3);
		assert_eq!(t.earliest(), month("2020-01"));
		assert_eq!(t.latest(), month("2021-01"));
		assert_eq!(t.resolve(month("2020-01")).unwrap(), 1.5);
	}

	#[test]
	fn test_rejects_empty_and_non_finite() {
		assert!(matches!(
			IndexTable::new(IndexSource::Inpc, vec![]),
			Err(SeriesError::InvalidInput {
				series: IndexSource::Inpc,
				..
			})
		));
		assert!(IndexTable::new(
			IndexSource::Inpc,
			vec![IndexPoint::new(month("2020-01"), f64::NAN)]
		)
		.is_err());
	}

	#[test]
	fn test_keeps_non_positive_values() {
		let t = table(&[("2020-01", 0.0), ("2020-02", -1.0)]);
		assert_eq!(t.resolve(month("2020-01")).unwrap(), 0.0);
		assert_eq!(t.resolve(month("2020-05")).unwrap(), -1.0);
	}
}
