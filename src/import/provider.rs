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
use crate::config::config_file::{Config, Source, Sources};
use crate::import::http::{Client, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::import::min_wage::{MinWageScraper, MINIMUM_WAGE_URL};
use crate::import::sidra::{
	chain_index, parse_monthly_variation, parse_number_index, SidraReader,
	GENERAL_INDEX_ITEM, INPC_URL, INPC_VARIATION_URL, IPCA_URL,
	MONTHLY_VARIATION,
};
use crate::parsing::filesystem::Filesystem;
use crate::parsing::table_file::read_table_file;
use crate::series::comparison::Tables;
use crate::series::error::SeriesError;
use crate::series::index_table::{IndexPoint, IndexTable};
use crate::series::source::IndexSource;
use anyhow::{anyhow, Error};
use serde_json::Value;
use tracing::{info, warn};

/// Local files named on the command line; they win over the config.
#[derive(Debug, Default)]
pub struct FileOverrides {
	pub minimum_wage: Option<String>,
	pub ipca: Option<String>,
	pub inpc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Origin {
	File(String),
	Url(String),
}

impl Origin {
	fn resolve(
		flag: &Option<String>,
		configured: &Option<Source>,
		default_url: &str,
	) -> Self {
		if let Some(file) = flag {
			return Origin::File(file.clone());
		}

		match configured {
			Some(Source {
				file: Some(file), ..
			}) => Origin::File(file.clone()),
			Some(Source { url: Some(url), .. }) => Origin::Url(url.clone()),
			_ => Origin::Url(default_url.to_string()),
		}
	}
}

/// Loads the three tables from local files or the public sources. The
/// minimum wage table is required; a price index that cannot be loaded is
/// handed on as an error so only its own series goes missing.
pub struct Provider<'a> {
	fs: &'a Filesystem,
	sources: &'a Sources,
	overrides: FileOverrides,

	/// Built on first use, so runs on local files never touch the network
	client: Option<Client>,
	sidra: SidraReader,
}

impl<'a> Provider<'a> {
	pub fn new(
		fs: &'a Filesystem,
		config: &'a Config,
		overrides: FileOverrides,
	) -> Self {
		Self {
			fs,
			sources: config.sources(),
			overrides,
			client: None,
			sidra: SidraReader::new(),
		}
	}

	pub fn load_tables(&mut self) -> Result<Tables, Error> {
		let minimum_wage = self
			.load_minimum_wage()
			.map_err(|e| anyhow!("minimum wage table unavailable: {:#}", e))?;

		let ipca = self.load_ipca();
		let ipca = scoped(IndexSource::Ipca, ipca);
		let inpc = self.load_inpc();
		let inpc = scoped(IndexSource::Inpc, inpc);

		Ok(Tables {
			minimum_wage,
			ipca,
			inpc,
		})
	}

	fn load_minimum_wage(&mut self) -> Result<IndexTable, Error> {
		let origin = Origin::resolve(
			&self.overrides.minimum_wage,
			&self.sources.minimum_wage,
			MINIMUM_WAGE_URL,
		);

		let points = match origin {
			Origin::File(path) => read_table_file(self.fs, &path)?,
			Origin::Url(url) => {
				let html = self.client()?.get_text(&url)?;
				MinWageScraper::new().scrape(&html)?
			},
		};

		table(IndexSource::MinimumWage, points)
	}

	fn load_ipca(&mut self) -> Result<IndexTable, Error> {
		let origin =
			Origin::resolve(&self.overrides.ipca, &self.sources.ipca, IPCA_URL);

		let points = match origin {
			Origin::File(path) => read_table_file(self.fs, &path)?,
			Origin::Url(url) => {
				let data = self.fetch_json(&url)?;
				parse_number_index(&self.sidra, &data, false)
					.map_err(|e| anyhow!("IPCA ({}): {}", url, e))?
			},
		};

		table(IndexSource::Ipca, points)
	}

	/// The number-index table is preferred; when it cannot be used, the
	/// monthly variations are chained into an index instead.
	fn load_inpc(&mut self) -> Result<IndexTable, Error> {
		let origin =
			Origin::resolve(&self.overrides.inpc, &self.sources.inpc, INPC_URL);

		let url = match origin {
			Origin::File(path) => {
				return table(
					IndexSource::Inpc,
					read_table_file(self.fs, &path)?,
				)
			},
			Origin::Url(url) => url,
		};

		let primary = self.fetch_json(&url).and_then(|data| {
			parse_number_index(&self.sidra, &data, true)
				.map_err(|e| anyhow!("INPC ({}): {}", url, e))
		});

		match primary {
			Ok(points) => table(IndexSource::Inpc, points),
			Err(e) => {
				warn!("{:#}; chaining monthly variations instead", e);
				let points = self.load_inpc_variations()?;
				table(IndexSource::Inpc, points)
			},
		}
	}

	fn load_inpc_variations(&mut self) -> Result<Vec<IndexPoint>, Error> {
		let origin = Origin::resolve(
			&None,
			&self.sources.inpc_fallback,
			INPC_VARIATION_URL,
		);

		let variations = match origin {
			Origin::File(path) => read_table_file(self.fs, &path)?
				.into_iter()
				.map(|p| (p.effective, p.value))
				.collect(),
			Origin::Url(url) => {
				let data = self.fetch_json(&url)?;
				parse_monthly_variation(
					&self.sidra,
					&data,
					GENERAL_INDEX_ITEM,
					MONTHLY_VARIATION,
				)
				.map_err(|e| anyhow!("INPC variations ({}): {}", url, e))?
			},
		};

		let points = chain_index(&variations);
		info!(
			"INPC chained from {} monthly variations starting {}",
			variations.len(),
			points.first().map(|p| p.effective.label()).unwrap_or_default()
		);
		Ok(points)
	}

	fn fetch_json(&mut self, url: &str) -> Result<Value, Error> {
		self.client()?.get_json(url)
	}

	fn client(&mut self) -> Result<&Client, Error> {
		if self.client.is_none() {
			self.client = Some(Client::new(
				self.sources.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
				self.sources
					.user_agent
					.as_deref()
					.unwrap_or(DEFAULT_USER_AGENT),
			)?);
		}

		self.client
			.as_ref()
			.ok_or_else(|| anyhow!("HTTP client unavailable"))
	}
}

fn table(
	source: IndexSource,
	points: Vec<IndexPoint>,
) -> Result<IndexTable, Error> {
	let table = IndexTable::new(source, points)?;
	info!(
		"{} table: {} points, {} to {}",
		source,
		table.len(),
		table.earliest().label(),
		table.latest().label()
	);
	Ok(table)
}

/// Turns a loading failure into an error scoped to its own source.
fn scoped(
	source: IndexSource,
	loaded: Result<IndexTable, Error>,
) -> Result<IndexTable, SeriesError> {
	loaded.map_err(|e| {
		warn!("{} table unavailable: {:#}", source, e);
		SeriesError::Unloaded {
			series: source,
			detail: format!("{:#}", e),
		}
	})
}
