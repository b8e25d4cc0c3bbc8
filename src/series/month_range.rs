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
use crate::util::month::Month;

/// The most recent fully elapsed month relative to `now`.
pub fn last_closed_month(now: Month) -> Month {
	now.add_months(-1)
}

/// Every month from the reference through the last closed month, inclusive
/// and ascending. A reference at or after the last closed month yields just
/// the reference.
pub fn build_range(reference: Month, now: Month) -> Vec<Month> {
	let end = reference.max(last_closed_month(now));
	let span = reference.months_until(&end);

	(0..=span).map(|i| reference.add_months(i)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn month(s: &str) -> Month {
		Month::from_str(s).unwrap()
	}

	#[test]
	fn test_last_closed() {
		assert_eq!(last_closed_month(month("2024-01")), month("2023-12"));
		assert_eq!(last_closed_month(month("2024-07")), month("2024-06"));
	}

	#[test]
	fn test_range_complete_and_ordered() {
		let range = build_range(month("2022-11"), month("2023-07"));

		assert_eq!(range.len(), 8);
		assert_eq!(range.first(), Some(&month("2022-11")));
		assert_eq!(range.last(), Some(&month("2023-06")));
		for pair in range.windows(2) {
			assert_eq!(pair[0].add_months(1), pair[1]);
		}
	}

	#[test]
	fn test_range_length_matches_difference() {
		let reference = month("1994-07");
		let now = month("2025-03");
		let range = build_range(reference, now);

		let expected =
			reference.months_until(&last_closed_month(now)) as usize + 1;
		assert_eq!(range.len(), expected);
	}

	#[test]
	fn test_range_degenerates_to_reference() {
		// reference is the last closed month
		assert_eq!(
			build_range(month("2023-06"), month("2023-07")),
			vec![month("2023-06")]
		);
		// current month
		assert_eq!(
			build_range(month("2023-07"), month("2023-07")),
			vec![month("2023-07")]
		);
		// future
		assert_eq!(
			build_range(month("2030-01"), month("2023-07")),
			vec![month("2030-01")]
		);
	}
}
