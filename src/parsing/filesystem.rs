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
use crate::config::config_file::Config;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub struct Filesystem;

impl Filesystem {
	pub fn new() -> Self {
		Self
	}

	pub fn open(&self, file_path: &str) -> Result<File, Error> {
		let path = Path::new(file_path);
		File::open(path)
			.map_err(|e| anyhow!("cannot open {}: {}", file_path, e))
	}

	/// Fetches the config from the given path, or default path if none. The
	/// default file is created empty the first time it is looked for.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => home_dir()
				.ok_or_else(|| anyhow!("Unable to determine home directory"))?
				.join(".config/payevol/config.toml"),
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		let content = fs::read_to_string(&config_path).map_err(|e| {
			anyhow!("cannot read config {}: {}", config_path.display(), e)
		})?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;
		config.validate()?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn config_file(content: &str) -> NamedTempFile {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "{}", content).unwrap();
		file
	}

	#[test]
	fn test_custom_config() {
		let file = config_file("[sources]\ntimeout_secs = 5");
		let path = file.path().to_string_lossy().to_string();

		let config = Filesystem::new().get_config(Some(&path)).unwrap();
		assert_eq!(config.sources().timeout_secs, Some(5));
	}

	#[test]
	fn test_invalid_custom_config() {
		let file = config_file("[sources]\ntimeout_secs = 0");
		let path = file.path().to_string_lossy().to_string();

		assert!(Filesystem::new().get_config(Some(&path)).is_err());
	}

	#[test]
	fn test_missing_custom_config() {
		let missing = "/nonexistent/payevol/config.toml".to_string();
		assert!(Filesystem::new().get_config(Some(&missing)).is_err());
	}
}
