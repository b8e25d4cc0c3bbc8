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
use crate::series::error::{SeriesError, UnavailableReason};
use crate::series::index_table::IndexTable;
use crate::series::month_range::build_range;
use crate::series::reference::Reference;
use crate::series::source::IndexSource;
use crate::util::month::Month;

/// The reference salary carried forward by a price number-index.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioSeries {
	pub source: IndexSource,

	/// The month before the reference, whose index is the base of the ratio
	pub anchor_month: Month,
	pub anchor_value: f64,

	pub rows: Vec<RatioRow>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatioRow {
	pub month: Month,
	pub index: f64,
	pub adjusted: f64,
}

/// Builds salary × I(m) / I(reference − 1) over the month range, for
/// whichever price index the table holds.
///
/// The base is the month before the reference, so the reference row itself
/// already includes that month's inflation and is generally not equal to
/// the reference salary.
pub fn build_ratio_series(
	reference: Reference,
	index: &IndexTable,
	now: Month,
) -> Result<RatioSeries, SeriesError> {
	let anchor_month = reference.month.add_months(-1);

	let unavailable = |reason| SeriesError::SeriesUnavailable {
		series: index.source(),
		month: anchor_month,
		earliest: index.earliest(),
		reason,
	};

	let anchor_value = index
		.resolve(anchor_month)
		.map_err(|_| unavailable(UnavailableReason::Uncovered))?;
	if anchor_value <= 0.0 {
		return Err(unavailable(UnavailableReason::NonPositive(anchor_value)));
	}

	let mut rows = Vec::new();
	for month in build_range(reference.month, now) {
		let value = index.resolve(month)?;
		rows.push(RatioRow {
			month,
			index: value,
			adjusted: reference.salary * (value / anchor_value),
		});
	}

	Ok(RatioSeries {
		source: index.source(),
		anchor_month,
		anchor_value,
		rows,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::series::index_table::IndexPoint;

	fn month(s: &str) -> Month {
		Month::from_str(s).unwrap()
	}

	fn index(source: IndexSource, points: &[(&str, f64)]) -> IndexTable {
		IndexTable::new(
			source,
			points
				.iter()
				.map(|(m, v)| IndexPoint::new(month(m), *v))
				.collect(),
		)
		.unwrap()
	}

	fn ipca() -> IndexTable {
		index(
			IndexSource::Ipca,
			&[
				("2022-12", 6474.09),
				("2023-01", 6508.03),
				("2023-02", 6562.05),
				("2023-03", 6608.64),
				("2023-04", 6646.31),
			],
		)
	}

	#[test]
	fn test_anchors_on_previous_month() {
		let reference = Reference::new(month("2023-01"), 2000.0).unwrap();
		let series =
			build_ratio_series(reference, &ipca(), month("2023-05")).unwrap();

		assert_eq!(series.source, IndexSource::Ipca);
		assert_eq!(series.anchor_month, month("2022-12"));
		assert_eq!(series.anchor_value, 6474.09);
		assert_eq!(series.rows.len(), 4);

		// the reference row is not the salary itself
		let first = series.rows[0];
		assert!((first.adjusted - 2000.0 * 6508.03 / 6474.09).abs() < 1e-9);
		assert!(first.adjusted > 2000.0);

		let last = series.rows[3];
		assert_eq!(last.month, month("2023-04"));
		assert!((last.adjusted - 2000.0 * 6646.31 / 6474.09).abs() < 1e-9);
	}

	#[test]
	fn test_fills_forward_past_table_end() {
		let reference = Reference::new(month("2023-03"), 1000.0).unwrap();
		let series =
			build_ratio_series(reference, &ipca(), month("2023-09")).unwrap();

		assert_eq!(series.rows.len(), 6);
		for row in &series.rows[1..] {
			assert_eq!(row.index, 6646.31);
		}
	}

	#[test]
	fn test_linear_in_salary() {
		let table = ipca();
		let now = month("2023-05");
		let single = build_ratio_series(
			Reference::new(month("2023-02"), 1500.0).unwrap(),
			&table,
			now,
		)
		.unwrap();
		let double = build_ratio_series(
			Reference::new(month("2023-02"), 3000.0).unwrap(),
			&table,
			now,
		)
		.unwrap();

		assert_eq!(single.rows.len(), double.rows.len());
		for (a, b) in single.rows.iter().zip(&double.rows) {
			assert!((2.0 * a.adjusted - b.adjusted).abs() < 1e-9);
		}
	}

	#[test]
	fn test_anchor_before_table() {
		// the reference month is covered, but the month before is not
		let reference = Reference::new(month("2022-12"), 1000.0).unwrap();
		let err = build_ratio_series(reference, &ipca(), month("2023-05"))
			.unwrap_err();

		assert_eq!(
			err,
			SeriesError::SeriesUnavailable {
				series: IndexSource::Ipca,
				month: month("2022-11"),
				earliest: month("2022-12"),
				reason: UnavailableReason::Uncovered,
			}
		);
		let message = err.to_string();
		assert!(message.contains("IPCA"));
		assert!(message.contains("11/2022"));
		assert!(message.contains("12/2022"));
	}

	#[test]
	fn test_non_positive_anchor() {
		let table =
			index(IndexSource::Inpc, &[("2020-01", 0.0), ("2020-02", 100.0)]);
		let reference = Reference::new(month("2020-02"), 1000.0).unwrap();
		let err = build_ratio_series(reference, &table, month("2020-06"))
			.unwrap_err();

		assert!(matches!(
			err,
			SeriesError::SeriesUnavailable {
				series: IndexSource::Inpc,
				reason: UnavailableReason::NonPositive(v),
				..
			} if v == 0.0
		));
	}
}
