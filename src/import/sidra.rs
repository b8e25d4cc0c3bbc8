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

//! Readers for the IBGE SIDRA "values" API. A response is a JSON list whose
//! first element describes the columns; every later element is one cell,
//! keyed by dimension: `D<n>C` holds a dimension's code, `D<n>N` its name,
//! and `V` the value, written with Brazilian separators.

use crate::series::index_table::IndexPoint;
use crate::util::money::parse_ptbr_number;
use crate::util::month::Month;
use anyhow::{bail, Error};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// IPCA number-index (table 1737, variable 2266).
pub const IPCA_URL: &str =
	"https://apisidra.ibge.gov.br/values/h/n/t/1737/p/all/n1/all/v/2266";

/// INPC, all variables (table 1736); rows must be filtered to the
/// number-index.
pub const INPC_URL: &str =
	"https://apisidra.ibge.gov.br/values/h/n/t/1736/p/all/n1/all/v/all";

/// INPC monthly variations by item (table 7063, from 2020 onward).
pub const INPC_VARIATION_URL: &str =
	"https://apisidra.ibge.gov.br/values/h/n/t/7063/p/all/n1/all/v/all";

pub const GENERAL_INDEX_ITEM: &str = "Índice geral";
pub const MONTHLY_VARIATION: &str = "Variação mensal";

/// One usable cell of a SIDRA response.
#[derive(Debug, PartialEq)]
pub struct Cell {
	pub period: Month,
	pub dimensions: Vec<String>,
	pub value: f64,
}

pub struct SidraReader {
	code_key: Regex,
	name_key: Regex,
}

impl SidraReader {
	pub fn new() -> Self {
		Self {
			code_key: Regex::new(r"^D\d+C$").unwrap(),
			name_key: Regex::new(r"^D\d+N$").unwrap(),
		}
	}

	/// Extracts every cell that has a YYYYMM period and a numeric value.
	/// Cells with placeholders such as "..." or "-" are skipped.
	pub fn cells(&self, data: &Value) -> Result<Vec<Cell>, Error> {
		let items = match data.as_array() {
			Some(items) if items.len() >= 2 => items,
			_ => bail!("unexpected SIDRA response: not a list with data rows"),
		};

		// the first element is the header row
		Ok(items[1..]
			.iter()
			.filter_map(Value::as_object)
			.filter_map(|item| self.cell(item))
			.collect())
	}

	fn cell(&self, item: &Map<String, Value>) -> Option<Cell> {
		let period = item
			.iter()
			.filter(|(k, _)| self.code_key.is_match(k))
			.filter_map(|(_, v)| as_text(v))
			.find_map(|v| Month::from_period_code(&v).ok())?;

		let dimensions = item
			.iter()
			.filter(|(k, _)| self.name_key.is_match(k))
			.filter_map(|(_, v)| as_text(v))
			.map(|v| v.trim().to_string())
			.collect();

		let value = parse_ptbr_number(&as_text(item.get("V")?)?).ok()?;

		Some(Cell {
			period,
			dimensions,
			value,
		})
	}
}

fn as_text(v: &Value) -> Option<String> {
	match v {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

/// Lowercases and strips the accents that appear in SIDRA dimension names,
/// so "Número-índice" and "numero indice" compare equal.
fn normalize(name: &str) -> String {
	name.trim()
		.to_lowercase()
		.chars()
		.map(|c| match c {
			'á' | 'à' | 'â' | 'ã' => 'a',
			'é' | 'ê' => 'e',
			'í' => 'i',
			'ó' | 'ô' | 'õ' => 'o',
			'ú' => 'u',
			'ç' => 'c',
			'-' => ' ',
			c => c,
		})
		.collect()
}

fn is_number_index(dimensions: &[String]) -> bool {
	dimensions
		.iter()
		.any(|d| normalize(d).contains("numero indice"))
}

/// Number-index points from a response. With `require_number_index`, only
/// cells with a dimension naming "Número-índice" are kept, for tables that
/// mix several variables.
pub fn parse_number_index(
	reader: &SidraReader,
	data: &Value,
	require_number_index: bool,
) -> Result<Vec<IndexPoint>, Error> {
	let points: Vec<IndexPoint> = reader
		.cells(data)?
		.into_iter()
		.filter(|c| !require_number_index || is_number_index(&c.dimensions))
		.map(|c| IndexPoint::new(c.period, c.value))
		.collect();

	if points.is_empty() {
		bail!("no number-index values found");
	}

	Ok(points)
}

/// Monthly percentage variations for one item, taken from cells where some
/// dimension contains `variable` and another equals `item`, both compared
/// without regard to case or accents. Ascending by month, one per month.
pub fn parse_monthly_variation(
	reader: &SidraReader,
	data: &Value,
	item: &str,
	variable: &str,
) -> Result<Vec<(Month, f64)>, Error> {
	let (item, variable) = (normalize(item), normalize(variable));

	let by_month: BTreeMap<Month, f64> = reader
		.cells(data)?
		.into_iter()
		.filter(|c| {
			let names: Vec<String> =
				c.dimensions.iter().map(|d| normalize(d)).collect();
			names.iter().any(|n| n.contains(&variable))
				&& names.iter().any(|n| *n == item)
		})
		.map(|c| (c.period, c.value))
		.collect();

	if by_month.is_empty() {
		bail!("no monthly variation found for item {:?}", item);
	}

	Ok(by_month.into_iter().collect())
}

/// Rebuilds a number-index from monthly percentage variations: a base of
/// 100 sits one month before the first variation and each month compounds
/// on the previous one. Only ratios of the result are meaningful.
pub fn chain_index(variations: &[(Month, f64)]) -> Vec<IndexPoint> {
	let mut sorted = variations.to_vec();
	sorted.sort_by_key(|(m, _)| *m);

	let Some((first, _)) = sorted.first() else {
		return Vec::new();
	};

	let mut current = 100.0;
	let mut points = vec![IndexPoint::new(first.add_months(-1), current)];
	for (month, pct) in sorted {
		current *= 1.0 + pct / 100.0;
		points.push(IndexPoint::new(month, current));
	}

	points
}
