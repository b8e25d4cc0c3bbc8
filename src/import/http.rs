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
use reqwest::header::USER_AGENT;
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Some of the public sources refuse requests without a browser-like agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

pub struct Client {
	client: reqwest::blocking::Client,
	user_agent: String,
}

impl Client {
	pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, Error> {
		let client = reqwest::blocking::Client::builder()
			.timeout(Duration::from_secs(timeout_secs))
			.build()?;

		Ok(Client {
			client,
			user_agent: user_agent.to_string(),
		})
	}

	/// Sends a GET and returns the body as text. Errors on non-2xx response
	/// codes.
	pub fn get_text(&self, url: &str) -> Result<String, Error> {
		Ok(self.send(url)?.text()?)
	}

	/// Sends a GET and deserializes the JSON body. Errors on non-2xx
	/// response codes.
	pub fn get_json<R>(&self, url: &str) -> Result<R, Error>
	where
		R: for<'de> Deserialize<'de>,
	{
		Ok(self.send(url)?.json()?)
	}

	fn send(&self, url: &str) -> Result<reqwest::blocking::Response, Error> {
		let request = self
			.client
			.request(Method::GET, url)
			.header(USER_AGENT, self.user_agent.as_str());

		info!("Sending GET to {}", url);
		let response = request.send()?;

		// Handle non-2xx response codes
		if !response.status().is_success() {
			bail!(
				"Request to {} failed with status: {}",
				url,
				response.status()
			);
		}

		Ok(response)
	}
}
