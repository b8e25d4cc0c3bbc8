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
use crate::parsing::filesystem::Filesystem;
use crate::series::index_table::IndexPoint;
use crate::util::money::parse_ptbr_number;
use crate::util::month::Month;
use anyhow::{anyhow, bail, Error};
use std::io;
use std::io::BufRead;

/// Reads a local index table: one "<month> <value>" pair per line, where the
/// month is any form Month::from_str accepts and the value may be written
/// with Brazilian separators. Anything after '#' is a comment.
pub fn read_table_file(
	fs: &Filesystem,
	file_path: &str,
) -> Result<Vec<IndexPoint>, Error> {
	let file = fs.open(file_path)?;
	parse_table(io::BufReader::new(file))
		.map_err(|e| anyhow!("{}: {}", file_path, e))
}

pub fn parse_table<R: BufRead>(reader: R) -> Result<Vec<IndexPoint>, Error> {
	let mut points = Vec::new();

	for (i, line) in reader.lines().enumerate() {
		let line = line?;
		let l = line.split('#').next().unwrap_or_default().trim();

		// Skip blank lines
		if l.is_empty() {
			continue;
		}

		let fields: Vec<&str> = l.split_whitespace().collect();
		if fields.len() != 2 {
			bail!("Expected \"<month> <value>\" (line {}): {}", i + 1, l);
		}

		let month = Month::from_str(fields[0])
			.map_err(|e| anyhow!("{} (line {})", e, i + 1))?;
		let value = parse_ptbr_number(fields[1])
			.map_err(|e| anyhow!("{} (line {})", e, i + 1))?;

		points.push(IndexPoint::new(month, value));
	}

	Ok(points)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_table() {
		let input = "\
# minimum wage history
1994-07-01  64,79
1995-05     100.00   # May
01/1996     112,00

";
		let points = parse_table(input.as_bytes()).unwrap();
		assert_eq!(points.len(), 3);
		assert_eq!(points[0].effective, Month::new(1994, 7).unwrap());
		assert_eq!(points[0].value, 64.79);
		assert_eq!(points[1].value, 100.0);
		assert_eq!(points[2].effective, Month::new(1996, 1).unwrap());
	}

	#[test]
	fn test_parse_errors_name_line() {
		let err = parse_table("2020-01 1,0\n2020-13 2,0\n".as_bytes())
			.unwrap_err()
			.to_string();
		assert!(err.contains("line 2"), "{}", err);

		let err = parse_table("2020-01\n".as_bytes()).unwrap_err().to_string();
		assert!(err.contains("line 1"), "{}", err);

		assert!(parse_table("2020-01 abc\n".as_bytes()).is_err());
	}
}
