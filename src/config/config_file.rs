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
use anyhow::{bail, Error};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub sources: Option<Sources>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sources {
	/// Seconds before an HTTP request to a source is abandoned
	pub timeout_secs: Option<u64>,
	pub user_agent: Option<String>,

	pub minimum_wage: Option<Source>,
	pub ipca: Option<Source>,
	pub inpc: Option<Source>,

	/// Monthly variation table used to chain an INPC index when the
	/// number-index table cannot be read.
	pub inpc_fallback: Option<Source>,
}

/// Where one table comes from. At most one of the two may be set; with
/// neither, the built-in URL is used.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Source {
	pub url: Option<String>,
	pub file: Option<String>,
}

impl Config {
	pub fn sources(&self) -> &Sources {
		static EMPTY: Sources = Sources {
			timeout_secs: None,
			user_agent: None,
			minimum_wage: None,
			ipca: None,
			inpc: None,
			inpc_fallback: None,
		};
		self.sources.as_ref().unwrap_or(&EMPTY)
	}

	pub fn validate(&self) -> Result<(), Error> {
		let sources = self.sources();
		for (name, source) in [
			("minimum_wage", &sources.minimum_wage),
			("ipca", &sources.ipca),
			("inpc", &sources.inpc),
			("inpc_fallback", &sources.inpc_fallback),
		] {
			if let Some(s) = source {
				if s.url.is_some() && s.file.is_some() {
					bail!(
						"Only one of sources.{name}.url and sources.{name}.file \
						 may be specified"
					)
				}
			}
		}

		if sources.timeout_secs == Some(0) {
			bail!("sources.timeout_secs must be positive");
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_full() {
		let config: Config = toml::from_str(
			r#"
			[sources]
			timeout_secs = 10
			user_agent = "payevol-test"

			[sources.ipca]
			file = "ipca.txt"

			[sources.inpc]
			url = "https://example.com/inpc"
			"#,
		)
		.unwrap();

		assert!(config.validate().is_ok());
		let sources = config.sources();
		assert_eq!(sources.timeout_secs, Some(10));
		assert_eq!(
			sources.ipca.as_ref().unwrap().file.as_deref(),
			Some("ipca.txt")
		);
		assert!(sources.minimum_wage.is_none());
	}

	#[test]
	fn test_empty_config() {
		let config: Config = toml::from_str("").unwrap();
		assert!(config.validate().is_ok());
		assert!(config.sources().ipca.is_none());
	}

	#[test]
	fn test_url_and_file_conflict() {
		let config: Config = toml::from_str(
			r#"
			[sources.minimum_wage]
			url = "https://example.com"
			file = "mw.txt"
			"#,
		)
		.unwrap();
		assert!(config.validate().is_err());
	}
}
