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
use crate::series::index_table::IndexPoint;
use crate::util::month::Month;
use anyhow::{bail, Error};
use regex::{Captures, Regex};
use tracing::debug;

/// Historical minimum wage table, one row per change.
pub const MINIMUM_WAGE_URL: &str =
	"https://previdenciarista.com/tabela-historica-dos-salarios-minimos/";

const MONTH: &str = r"\b(jan|fev|mar|abr|mai|jun|jul|ago|set|out|nov|dez)\s*/\s*(\d{4})\b";

// Only amounts in reais count; "CR$" and other earlier currencies, as well
// as bare years, are left alone.
const AMOUNT: &str = r"(?:^|[^A-Za-z$])R\$\s*([\d.,]+)";

/// Scrapes minimum wage changes out of an HTML page.
///
/// Each table row is first searched for a "mmm/yyyy" month and an "R$"
/// amount; if no row yields both, the whole document is scanned for a month
/// followed, lazily, by an amount.
pub struct MinWageScraper {
	row: Regex,
	month: Regex,
	amount: Regex,
	anywhere: Regex,
}

impl MinWageScraper {
	pub fn new() -> Self {
		Self {
			row: Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap(),
			month: Regex::new(&format!("(?i){}", MONTH)).unwrap(),
			amount: Regex::new(AMOUNT).unwrap(),
			anywhere: Regex::new(&format!("(?is){}.*?{}", MONTH, AMOUNT))
				.unwrap(),
		}
	}

	pub fn scrape(&self, html: &str) -> Result<Vec<IndexPoint>, Error> {
		let html = html.replace("&nbsp;", " ").replace('\u{a0}', " ");

		let mut points = Vec::new();
		for row in self.row.captures_iter(&html) {
			let row = &row[1];
			let (Some(m), Some(a)) =
				(self.month.captures(row), self.amount.captures(row))
			else {
				continue;
			};

			if let Some(point) = point(&m, &a[1]) {
				points.push(point);
			}
		}

		if points.is_empty() {
			debug!("no table rows matched; scanning the whole page");
			for c in self.anywhere.captures_iter(&html) {
				if let Some(point) = point(&c, &c[3]) {
					points.push(point);
				}
			}
		}

		if points.is_empty() {
			bail!("could not find the minimum wage table in the page");
		}

		Ok(points)
	}
}

/// Builds a point from month captures (abbreviation, year) and an amount.
fn point(month: &Captures, amount: &str) -> Option<IndexPoint> {
	let m = month_number(&month[1])?;
	let year = month[2].parse::<i32>().ok()?;
	let effective = Month::new(year, m).ok()?;

	Some(IndexPoint::new(effective, parse_brl_amount(amount)?))
}

fn month_number(abbr: &str) -> Option<u32> {
	let n = match abbr.to_lowercase().as_str() {
		"jan" => 1,
		"fev" => 2,
		"mar" => 3,
		"abr" => 4,
		"mai" => 5,
		"jun" => 6,
		"jul" => 7,
		"ago" => 8,
		"set" => 9,
		"out" => 10,
		"nov" => 11,
		"dez" => 12,
		_ => return None,
	};
	Some(n)
}

/// Amounts on the page always use "." for thousands and "," for cents.
fn parse_brl_amount(s: &str) -> Option<f64> {
	let s = s.trim_end_matches(['.', ',']);
	s.replace('.', "").replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn month(s: &str) -> Month {
		Month::from_str(s).unwrap()
	}

	#[test]
	fn test_scrape_table_rows() {
		let html = r#"
			<table>
			<tr><th>Vigência</th><th>Valor mensal</th></tr>
			<tr><td>jan/2024</td><td>R$&nbsp;1.412,00</td></tr>
			<tr><td>Mai/2023</td><td>R$ 1.320,00</td></tr>
			<tr><td>jul/1994</td><td>R$ 64,79</td></tr>
			<tr><td>mar/1994</td><td>CR$ 42.829,00</td></tr>
			</table>
		"#;

		let points = MinWageScraper::new().scrape(html).unwrap();
		assert_eq!(
			points,
			vec![
				IndexPoint::new(month("2024-01"), 1412.0),
				IndexPoint::new(month("2023-05"), 1320.0),
				IndexPoint::new(month("1994-07"), 64.79),
			]
		);
	}

	#[test]
	fn test_scrape_falls_back_to_text() {
		let html = "<p>A partir de jan/2023 o salário passou a R$ 1.302,00.</p>\
			<p>Desde mai/2023: R$ 1.320,00</p>";

		let points = MinWageScraper::new().scrape(html).unwrap();
		assert_eq!(
			points,
			vec![
				IndexPoint::new(month("2023-01"), 1302.0),
				IndexPoint::new(month("2023-05"), 1320.0),
			]
		);
	}

	#[test]
	fn test_scrape_nothing() {
		let html = "<table><tr><td>2024</td><td>1412</td></tr></table>";
		assert!(MinWageScraper::new().scrape(html).is_err());
	}
}
