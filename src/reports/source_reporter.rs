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
use crate::series::comparison::Tables;
use crate::series::index_table::IndexTable;
use crate::series::source::IndexSource;

/// Lists what each loaded table covers, so a user can see which reference
/// months every series supports.
pub struct SourceReporter {
	tables: Tables,
}

impl SourceReporter {
	pub fn new(tables: Tables) -> Self {
		Self { tables }
	}

	pub fn render(&self) -> String {
		let mut table = Table::new(5);
		table.right_align(vec![3]);
		table.add_header(vec![
			"Source",
			"First",
			"Last",
			"Points",
			"Last value",
		]);
		table.add_separator();

		table.add_row(coverage(&self.tables.minimum_wage));
		for (source, loaded) in [
			(IndexSource::Ipca, &self.tables.ipca),
			(IndexSource::Inpc, &self.tables.inpc),
		] {
			match loaded {
				Ok(t) => table.add_row(coverage(t)),
				Err(e) => table.add_row(vec![
					source.to_string(),
					"-".to_string(),
					"-".to_string(),
					"0".to_string(),
					format!("unavailable ({})", e),
				]),
			}
		}

		table.render()
	}
}

fn coverage(t: &IndexTable) -> Vec<String> {
	let last = t.points()[t.len() - 1];
	vec![
		t.source().to_string(),
		t.earliest().label(),
		t.latest().label(),
		t.len().to_string(),
		format!("{}", last.value),
	]
}
