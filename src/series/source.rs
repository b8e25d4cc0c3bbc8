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
use std::fmt;

/// Identifies which monthly series a table holds. Travels with every table
/// and every error so messages can say which source failed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexSource {
	/// Minimum wage in force, in reais
	MinimumWage,
	/// IPCA number-index (IBGE)
	Ipca,
	/// INPC number-index (IBGE)
	Inpc,
}

impl IndexSource {
	pub const PRICE_INDICES: [IndexSource; 2] =
		[IndexSource::Ipca, IndexSource::Inpc];

	pub fn name(&self) -> &'static str {
		match self {
			IndexSource::MinimumWage => "minimum wage",
			IndexSource::Ipca => "IPCA",
			IndexSource::Inpc => "INPC",
		}
	}
}

impl fmt::Display for IndexSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}
