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
use crate::util::month::Month;

/// The anchor chosen by the user: a salary known to be paid in a month.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reference {
	pub month: Month,
	pub salary: f64,
}

impl Reference {
	pub fn new(month: Month, salary: f64) -> Result<Self, SeriesError> {
		if !salary.is_finite() || salary < 0.0 {
			return Err(SeriesError::InvalidSalary(salary));
		}

		Ok(Self { month, salary })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_salary_validation() {
		let m = Month::new(2023, 1).unwrap();
		assert!(Reference::new(m, 0.0).is_ok());
		assert!(Reference::new(m, 2000.0).is_ok());
		assert_eq!(
			Reference::new(m, -0.01),
			Err(SeriesError::InvalidSalary(-0.01))
		);
		assert_eq!(
			Reference::new(m, -5.0).unwrap_err().to_string(),
			"reference salary must be zero or more, got -5"
		);
		assert!(Reference::new(m, f64::INFINITY).is_err());
		assert!(Reference::new(m, f64::NAN).is_err());
	}
}
