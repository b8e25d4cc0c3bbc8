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
use crate::series::index_table::IndexTable;
use crate::series::month_range::build_range;
use crate::series::reference::Reference;
use crate::util::month::Month;

/// The salary that keeps the same number of minimum wages as the reference.
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleSeries {
	pub reference: Reference,

	/// Minimum wage in force at the reference month
	pub sm_ref: f64,

	/// Salary at the reference divided by sm_ref; zero when sm_ref is not
	/// positive.
	pub multiple: f64,

	pub rows: Vec<MultipleRow>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MultipleRow {
	pub month: Month,
	pub min_wage: f64,
	pub equiv_brl: f64,
}

/// Builds k × MW(m) for every month from the reference to the last month
/// closed before `now`.
///
/// A non-positive minimum wage at the reference gives a multiple of zero
/// and therefore an all-zero series instead of an error.
// TODO: decide whether a non-positive reference minimum wage should be
// reported to the user instead of silently zeroing the series
pub fn build_multiple_series(
	reference: Reference,
	minimum_wage: &IndexTable,
	now: Month,
) -> Result<MultipleSeries, SeriesError> {
	let sm_ref = minimum_wage.resolve(reference.month)?;
	let multiple = if sm_ref > 0.0 {
		reference.salary / sm_ref
	} else {
		0.0
	};

	let mut rows = Vec::new();
	for month in build_range(reference.month, now) {
		let min_wage = minimum_wage.resolve(month)?;

		// Scaling the ratio rather than multiplying by k keeps the reference
		// row exactly equal to the reference salary.
		let equiv_brl = if sm_ref > 0.0 {
			reference.salary * (min_wage / sm_ref)
		} else {
			0.0
		};

		rows.push(MultipleRow {
			month,
			min_wage,
			equiv_brl,
		});
	}

	Ok(MultipleSeries {
		reference,
		sm_ref,
		multiple,
		rows,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::series::index_table::IndexPoint;
	use crate::series::source::IndexSource;

	fn month(s: &str) -> Month {
		Month::from_str(s).unwrap()
	}

	fn minimum_wage() -> IndexTable {
		IndexTable::new(
			IndexSource::MinimumWage,
			vec![
				IndexPoint::new(month("2022-01"), 1212.0),
				IndexPoint::new(month("2023-01"), 1302.0),
				IndexPoint::new(month("2023-05"), 1320.0),
				IndexPoint::new(month("2024-01"), 1412.0),
			],
		)
		.unwrap()
	}

	#[test]
	fn test_reference_row_equals_salary() {
		let table = minimum_wage();
		for (m, salary) in [
			("2022-03", 1000.0),
			("2023-01", 2000.0),
			("2023-08", 3333.33),
		] {
			let reference = Reference::new(month(m), salary).unwrap();
			let series =
				build_multiple_series(reference, &table, month("2024-03"))
					.unwrap();
			assert!((series.rows[0].equiv_brl - salary).abs() < 1e-9);
			assert_eq!(series.rows[0].month, month(m));
		}
	}

	#[test]
	fn test_tracks_minimum_wage() {
		let reference = Reference::new(month("2023-01"), 2000.0).unwrap();
		let series =
			build_multiple_series(reference, &minimum_wage(), month("2024-02"))
				.unwrap();

		assert_eq!(series.sm_ref, 1302.0);
		assert!((series.multiple - 1.536098).abs() < 1e-6);
		assert_eq!(series.rows.len(), 13);

		let june = series
			.rows
			.iter()
			.find(|r| r.month == month("2023-06"))
			.unwrap();
		assert_eq!(june.min_wage, 1320.0);
		assert!((june.equiv_brl - 2027.65).abs() < 0.01);

		let last = series.rows.last().unwrap();
		assert_eq!(last.month, month("2024-01"));
		assert!((last.equiv_brl - 2000.0 * 1412.0 / 1302.0).abs() < 1e-9);
	}

	#[test]
	fn test_non_positive_minimum_wage_gives_zero_series() {
		let table = IndexTable::new(
			IndexSource::MinimumWage,
			vec![
				IndexPoint::new(month("2020-01"), 0.0),
				IndexPoint::new(month("2020-03"), 1045.0),
			],
		)
		.unwrap();
		let reference = Reference::new(month("2020-01"), 1500.0).unwrap();
		let series =
			build_multiple_series(reference, &table, month("2020-06")).unwrap();

		assert_eq!(series.multiple, 0.0);
		assert_eq!(series.rows.len(), 5);
		assert!(series.rows.iter().all(|r| r.equiv_brl == 0.0));
	}

	#[test]
	fn test_reference_before_table_fails() {
		let reference = Reference::new(month("2021-12"), 1000.0).unwrap();
		let err =
			build_multiple_series(reference, &minimum_wage(), month("2022-06"))
				.unwrap_err();

		assert_eq!(
			err,
			SeriesError::NoCoverage {
				series: IndexSource::MinimumWage,
				query: month("2021-12"),
				earliest: month("2022-01"),
			}
		);
	}
}
