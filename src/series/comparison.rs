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
use crate::series::multiple::{build_multiple_series, MultipleSeries};
use crate::series::ratio::{build_ratio_series, RatioSeries};
use crate::series::reference::Reference;
use crate::series::source::IndexSource;
use crate::util::month::Month;

/// The three tables a comparison reads. A price index that could not be
/// obtained at all is carried as its error, so it shows up as unavailable
/// rather than stopping the other series.
pub struct Tables {
	pub minimum_wage: IndexTable,
	pub ipca: Result<IndexTable, SeriesError>,
	pub inpc: Result<IndexTable, SeriesError>,
}

/// All series for one reference, merged by month. The minimum-wage series
/// must succeed; each price index succeeds or fails on its own.
pub struct Comparison {
	pub multiple: MultipleSeries,
	pub ipca: Result<RatioSeries, SeriesError>,
	pub inpc: Result<RatioSeries, SeriesError>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonRow {
	pub month: Month,
	pub min_wage: f64,
	pub equiv_brl: f64,
	pub ipca: Option<f64>,
	pub inpc: Option<f64>,
}

/// Figures for the last month of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LastMonth {
	pub month: Month,
	pub equiv_brl: f64,
	pub ipca: Option<f64>,
	pub inpc: Option<f64>,
}

impl LastMonth {
	/// How far a current salary sits above (positive) or below each series.
	pub fn gaps(&self, current_salary: f64) -> Gaps {
		Gaps {
			equiv_brl: current_salary - self.equiv_brl,
			ipca: self.ipca.map(|v| current_salary - v),
			inpc: self.inpc.map(|v| current_salary - v),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaps {
	pub equiv_brl: f64,
	pub ipca: Option<f64>,
	pub inpc: Option<f64>,
}

impl Comparison {
	pub fn build(
		reference: Reference,
		tables: &Tables,
		now: Month,
	) -> Result<Self, SeriesError> {
		let multiple =
			build_multiple_series(reference, &tables.minimum_wage, now)?;

		let ratio = |table: &Result<IndexTable, SeriesError>| match table {
			Ok(t) => build_ratio_series(reference, t, now),
			Err(e) => Err(e.clone()),
		};

		Ok(Self {
			multiple,
			ipca: ratio(&tables.ipca),
			inpc: ratio(&tables.inpc),
		})
	}

	fn ratio(
		&self,
		source: IndexSource,
	) -> Option<&Result<RatioSeries, SeriesError>> {
		match source {
			IndexSource::Ipca => Some(&self.ipca),
			IndexSource::Inpc => Some(&self.inpc),
			IndexSource::MinimumWage => None,
		}
	}

	pub fn series(&self, source: IndexSource) -> Option<&RatioSeries> {
		self.ratio(source)?.as_ref().ok()
	}

	/// Price indices that produced no series, with the reason.
	pub fn unavailable(&self) -> Vec<(IndexSource, &SeriesError)> {
		IndexSource::PRICE_INDICES
			.into_iter()
			.filter_map(|source| {
				Some((source, self.ratio(source)?.as_ref().err()?))
			})
			.collect()
	}

	/// One row per month of the minimum-wage series; a price index fills its
	/// column only when it succeeded and has that month.
	pub fn rows(&self) -> Vec<ComparisonRow> {
		self.multiple
			.rows
			.iter()
			.map(|row| ComparisonRow {
				month: row.month,
				min_wage: row.min_wage,
				equiv_brl: row.equiv_brl,
				ipca: self.adjusted_at(IndexSource::Ipca, row.month),
				inpc: self.adjusted_at(IndexSource::Inpc, row.month),
			})
			.collect()
	}

	pub fn last_month(&self) -> Option<LastMonth> {
		let last = self.multiple.rows.last()?;

		Some(LastMonth {
			month: last.month,
			equiv_brl: last.equiv_brl,
			ipca: self.adjusted_at(IndexSource::Ipca, last.month),
			inpc: self.adjusted_at(IndexSource::Inpc, last.month),
		})
	}

	fn adjusted_at(&self, source: IndexSource, month: Month) -> Option<f64> {
		// rows are ascending by month
		let series = self.series(source)?;
		series
			.rows
			.binary_search_by_key(&month, |r| r.month)
			.ok()
			.map(|i| series.rows[i].adjusted)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::series::error::UnavailableReason;
	use crate::series::index_table::IndexPoint;

	fn month(s: &str) -> Month {
		Month::from_str(s).unwrap()
	}

	fn table(source: IndexSource, points: &[(&str, f64)]) -> IndexTable {
		IndexTable::new(
			source,
			points
				.iter()
				.map(|(m, v)| IndexPoint::new(month(m), *v))
				.collect(),
		)
		.unwrap()
	}

	fn tables() -> Tables {
		Tables {
			minimum_wage: table(
				IndexSource::MinimumWage,
				&[("2019-01", 998.0), ("2020-01", 1039.0), ("2020-02", 1045.0)],
			),
			ipca: Ok(table(
				IndexSource::Ipca,
				&[
					("2019-12", 5320.25),
					("2020-01", 5331.42),
					("2020-02", 5344.75),
				],
			)),
			// begins later, the way a chained fallback series does
			inpc: Ok(table(
				IndexSource::Inpc,
				&[("2020-01", 100.0), ("2020-02", 100.17)],
			)),
		}
	}

	#[test]
	fn test_one_index_unavailable_keeps_others() {
		let reference = Reference::new(month("2020-01"), 2078.0).unwrap();
		let cmp =
			Comparison::build(reference, &tables(), month("2020-04")).unwrap();

		assert!(cmp.ipca.is_ok());
		let unavailable = cmp.unavailable();
		assert_eq!(unavailable.len(), 1);
		assert_eq!(unavailable[0].0, IndexSource::Inpc);
		assert!(matches!(
			unavailable[0].1,
			SeriesError::SeriesUnavailable {
				reason: UnavailableReason::Uncovered,
				..
			}
		));

		let rows = cmp.rows();
		assert_eq!(rows.len(), 3);
		assert_eq!(rows[0].equiv_brl, 2078.0);
		assert!(rows.iter().all(|r| r.ipca.is_some() && r.inpc.is_none()));
	}

	#[test]
	fn test_all_available() {
		let reference = Reference::new(month("2020-02"), 1045.0).unwrap();
		let cmp =
			Comparison::build(reference, &tables(), month("2020-04")).unwrap();

		assert!(cmp.unavailable().is_empty());
		let last = cmp.last_month().unwrap();
		assert_eq!(last.month, month("2020-03"));
		assert_eq!(last.equiv_brl, 1045.0);
		assert!((last.inpc.unwrap() - 1045.0 * 100.17 / 100.0).abs() < 1e-9);
		assert!(
			(last.ipca.unwrap() - 1045.0 * 5344.75 / 5331.42).abs() < 1e-9
		);

		let gaps = last.gaps(1100.0);
		assert!((gaps.equiv_brl - 55.0).abs() < 1e-9);
		assert!(gaps.ipca.unwrap() < 55.0);
	}

	#[test]
	fn test_missing_table_is_scoped() {
		let mut t = tables();
		t.ipca = Err(SeriesError::Unloaded {
			series: IndexSource::Ipca,
			detail: "request timed out".to_string(),
		});
		let reference = Reference::new(month("2020-02"), 1045.0).unwrap();
		let cmp = Comparison::build(reference, &t, month("2020-04")).unwrap();

		assert!(cmp.inpc.is_ok());
		assert_eq!(cmp.unavailable()[0].0, IndexSource::Ipca);
		assert!(cmp.rows().iter().all(|r| r.ipca.is_none()));
	}

	#[test]
	fn test_minimum_wage_failure_is_fatal() {
		let reference = Reference::new(month("2018-06"), 1000.0).unwrap();
		assert!(matches!(
			Comparison::build(reference, &tables(), month("2020-04")),
			Err(SeriesError::NoCoverage {
				series: IndexSource::MinimumWage,
				..
			})
		));
	}
}
