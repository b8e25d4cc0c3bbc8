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
use anyhow::{anyhow, Error};

/// Formats a value as Brazilian reais, e.g. "R$ 1.234,56", without relying
/// on the locale of the host.
pub fn brl(value: f64, precision: u32) -> String {
	let formatted = ptbr_number(value.abs(), precision);
	if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0')
	{
		format!("-R$ {}", formatted)
	} else {
		format!("R$ {}", formatted)
	}
}

/// Renders an unsigned value with "." grouping thousands and "," before the
/// decimals.
fn ptbr_number(value: f64, precision: u32) -> String {
	let plain = format!("{:.*}", precision as usize, value);
	let (int_part, frac_part) = match plain.split_once('.') {
		Some((i, f)) => (i, Some(f)),
		None => (plain.as_str(), None),
	};

	let mut grouped =
		String::with_capacity(int_part.len() + int_part.len() / 3);
	for (i, c) in int_part.chars().enumerate() {
		if i > 0 && (int_part.len() - i) % 3 == 0 {
			grouped.push('.');
		}
		grouped.push(c);
	}

	match frac_part {
		Some(f) => format!("{},{}", grouped, f),
		None => grouped,
	}
}

/// Parses a number as published by Brazilian sources: "1.234,56",
/// "1234,56" and "1234.56" are all accepted.
pub fn parse_ptbr_number(s: &str) -> Result<f64, Error> {
	let s = s.trim();
	let normalized = if s.contains(',') && s.contains('.') {
		s.replace('.', "").replace(',', ".")
	} else if s.contains(',') {
		s.replace(',', ".")
	} else {
		s.to_string()
	};

	let value = normalized
		.parse::<f64>()
		.map_err(|e| anyhow!("Invalid number {:?}: {}", s, e))?;
	if !value.is_finite() {
		return Err(anyhow!("Invalid number {:?}: not finite", s));
	}

	Ok(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_brl_grouping() {
		assert_eq!(brl(0.0, 2), "R$ 0,00");
		assert_eq!(brl(64.79, 2), "R$ 64,79");
		assert_eq!(brl(999.999, 2), "R$ 1.000,00");
		assert_eq!(brl(1234.5, 2), "R$ 1.234,50");
		assert_eq!(brl(1234567.891, 2), "R$ 1.234.567,89");
		assert_eq!(brl(1320.0, 0), "R$ 1.320");
	}

	#[test]
	fn test_brl_negative() {
		assert_eq!(brl(-1500.25, 2), "-R$ 1.500,25");
		assert_eq!(brl(-0.001, 2), "R$ 0,00");
	}

	#[test]
	fn test_parse_ptbr() {
		assert_eq!(parse_ptbr_number("1.234,56").unwrap(), 1234.56);
		assert_eq!(parse_ptbr_number("1234,56").unwrap(), 1234.56);
		assert_eq!(parse_ptbr_number("-0,60").unwrap(), -0.6);
		assert_eq!(parse_ptbr_number(" 6578.95 ").unwrap(), 6578.95);
		assert!(parse_ptbr_number("...").is_err());
		assert!(parse_ptbr_number("-").is_err());
		assert!(parse_ptbr_number("").is_err());
	}
}
