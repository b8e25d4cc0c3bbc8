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
use crate::reports::table::Table;
use crate::series::comparison::Comparison;
use crate::util::money::brl;

const MISSING: &str = "-";

pub struct SeriesReporter {
	comparison: Comparison,
	precision: u32,
}

impl SeriesReporter {
	pub fn new(comparison: Comparison, precision: u32) -> Self {
		Self {
			comparison,
			precision,
		}
	}

	/// One line per price index that has no series for this reference.
	pub fn warnings(&self) -> Vec<String> {
		let reference = self.comparison.multiple.reference.month.label();
		self.comparison
			.unavailable()
			.into_iter()
			.map(|(source, e)| {
				format!(
					"warning: {} unavailable for reference {}: {}",
					source, reference, e
				)
			})
			.collect()
	}

	pub fn print_warnings(&self) {
		for warning in self.warnings() {
			eprintln!("{}", warning);
		}
	}

	/// Monthly table of every series; a missing price index shows as "-".
	pub fn render_table(&self) -> String {
		let mut table = Table::new(5);
		table.right_align(vec![1, 2, 3, 4]);
		table.add_header(vec![
			"Month",
			"Min. wage",
			"Equiv. (k×MW)",
			"IPCA-adjusted",
			"INPC-adjusted",
		]);
		table.add_separator();

		for row in self.comparison.rows() {
			table.add_row(vec![
				row.month.label(),
				self.money(row.min_wage),
				self.money(row.equiv_brl),
				self.maybe_money(row.ipca),
				self.maybe_money(row.inpc),
			]);
		}

		table.render()
	}

	/// Reference figures followed by those of the last month, and how a
	/// current salary compares to each series.
	pub fn render_summary(&self, current_salary: Option<f64>) -> String {
		let multiple = &self.comparison.multiple;

		let mut table = Table::new(2);
		table.right_align(vec![1]);
		table.add_row(vec![
			"Reference".to_string(),
			multiple.reference.month.label(),
		]);
		table.add_row(vec![
			"Salary (ref.)".to_string(),
			self.money(multiple.reference.salary),
		]);
		table.add_row(vec![
			"Minimum wage (ref.)".to_string(),
			self.money(multiple.sm_ref),
		]);
		table.add_row(vec![
			"Multiple (ref.)".to_string(),
			format!("{} MW", significant(multiple.multiple, 4)),
		]);

		if let Some(last) = self.comparison.last_month() {
			table.add_separator();
			table.add_row(vec!["Last month".to_string(), last.month.label()]);
			table.add_row(vec![
				"Equiv. (k×MW)".to_string(),
				self.money(last.equiv_brl),
			]);
			table.add_row(vec![
				"IPCA-adjusted".to_string(),
				self.maybe_money(last.ipca),
			]);
			table.add_row(vec![
				"INPC-adjusted".to_string(),
				self.maybe_money(last.inpc),
			]);

			if let Some(current) = current_salary.filter(|c| *c > 0.0) {
				let gaps = last.gaps(current);
				table.add_separator();
				table.add_row(vec![
					"Current salary".to_string(),
					self.money(current),
				]);
				table.add_row(vec![
					"Current − (k×MW)".to_string(),
					self.money(gaps.equiv_brl),
				]);
				table.add_row(vec![
					"Current − IPCA".to_string(),
					self.maybe_money(gaps.ipca),
				]);
				table.add_row(vec![
					"Current − INPC".to_string(),
					self.maybe_money(gaps.inpc),
				]);
			}
		}

		table.render()
	}

	/// Comma-separated series with "." decimals; an unavailable price index
	/// leaves its cells empty.
	pub fn render_csv(&self) -> String {
		let p = self.precision as usize;
		let cell = |v: Option<f64>| {
			v.map(|v| format!("{:.*}", p, v)).unwrap_or_default()
		};

		let mut out = String::from("month,min_wage,equiv_brl,ipca,inpc\n");
		for row in self.comparison.rows() {
			out.push_str(&format!(
				"{},{:.*},{:.*},{},{}\n",
				row.month,
				p,
				row.min_wage,
				p,
				row.equiv_brl,
				cell(row.ipca),
				cell(row.inpc),
			));
		}

		out
	}

	fn money(&self, value: f64) -> String {
		brl(value, self.precision)
	}

	fn maybe_money(&self, value: Option<f64>) -> String {
		value
			.map(|v| self.money(v))
			.unwrap_or_else(|| MISSING.to_string())
	}
}

/// Formats with a fixed number of significant digits, dropping trailing
/// zeros, so a multiple reads "1.536" or "12.5" rather than "1.53609831".
fn significant(value: f64, digits: i32) -> String {
	if value == 0.0 || !value.is_finite() {
		return format!("{}", value);
	}

	let magnitude = value.abs().log10().floor() as i32;
	let decimals = (digits - 1 - magnitude).max(0) as usize;
	let s = format!("{:.*}", decimals, value);

	if s.contains('.') {
		s.trim_end_matches('0').trim_end_matches('.').to_string()
	} else {
		s
	}
}
