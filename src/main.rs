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
use crate::import::provider::{FileOverrides, Provider};
use crate::parsing::filesystem::Filesystem;
use crate::reports::series_reporter::SeriesReporter;
use crate::reports::source_reporter::SourceReporter;
use crate::series::comparison::Comparison;
use crate::series::month_range::last_closed_month;
use crate::series::reference::Reference;
use crate::series::source::IndexSource;
use crate::util::month::{Month, MIN_REFERENCE};
use anyhow::{anyhow, bail, Error};
use clap::{Parser, ValueEnum};
use regex::Regex;
use std::cmp::PartialEq;
use tracing::{debug, warn, Level};

mod config;
mod import;
mod parsing;
mod reports;
mod series;
mod util;

#[derive(Parser)]
#[command(
	name = "payevol",
	version = "0.1",
	about = "Salary evolution against the minimum wage, IPCA and INPC"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Reference month (MM/YYYY or YYYY-MM)
	#[arg(short, long)]
	reference: Option<String>,

	/// Salary at the reference month, e.g. 2000, 2000,50 or 2.000,50
	#[arg(short, long, allow_hyphen_values = true)]
	salary: Option<String>,

	/// Current salary, compared against the last month of every series
	#[arg(long, allow_hyphen_values = true)]
	current: Option<String>,

	/// Treat this month as the current one (YYYY-MM; default: today)
	#[arg(long)]
	today: Option<String>,

	/// Custom config file location (default: ~/.config/payevol/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Read the minimum wage table from this file
	#[arg(long)]
	minimum_wage_file: Option<String>,

	/// Read the IPCA number index from this file
	#[arg(long)]
	ipca_file: Option<String>,

	/// Read the INPC number index from this file
	#[arg(long)]
	inpc_file: Option<String>,

	/// Decimal places to show for amounts
	#[arg(short, long)]
	precision: Option<u32>,

	/// Log what is loaded and computed to stderr
	#[arg(short, long)]
	verbose: bool,
}

impl Cli {
	const MAX_PRECISION: u32 = 10;
	const DEFAULT_PRECISION: u32 = 2;

	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(prec) = self.precision {
			if prec > Cli::MAX_PRECISION {
				bail!("Maximum precision is {}", Cli::MAX_PRECISION);
			}
		}

		Ok(())
	}

	/// The reference month and salary; only the sources command runs
	/// without them.
	fn reference(&self) -> Result<Reference, Error> {
		let month = match &self.reference {
			Some(r) => Month::from_str(r)?,
			None => bail!("No reference month specified (-r MM/YYYY)"),
		};
		if month < MIN_REFERENCE {
			bail!(
				"Reference month {} is before {}",
				month.label(),
				MIN_REFERENCE.label()
			);
		}

		let salary = match &self.salary {
			Some(s) => parse_salary(s)?,
			None => bail!("No salary specified (-s)"),
		};

		Ok(Reference::new(month, salary)?)
	}

	fn current_salary(&self) -> Result<Option<f64>, Error> {
		self.current.as_deref().map(parse_salary).transpose()
	}

	fn now(&self) -> Result<Month, Error> {
		match &self.today {
			Some(t) => Month::from_str(t)
				.map_err(|e| anyhow!("Invalid --today value: {}", e)),
			None => Ok(Month::current()),
		}
	}

	fn overrides(&self) -> FileOverrides {
		FileOverrides {
			minimum_wage: self.minimum_wage_file.clone(),
			ipca: self.ipca_file.clone(),
			inpc: self.inpc_file.clone(),
		}
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Table,   // monthly series
	Summary, // reference figures and last month
	Csv,     // monthly series, machine readable

	Sources, // coverage of the loaded tables
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;
	init_logging(args.verbose);

	let now = args.now()?;
	let precision = args.precision.unwrap_or(Cli::DEFAULT_PRECISION);

	// inputs are checked before anything is fetched
	let reference = if args.command == Directive::Sources {
		None
	} else {
		Some(args.reference()?)
	};
	let current_salary = args.current_salary()?;

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let tables = Provider::new(&fs, &config, args.overrides()).load_tables()?;

	let Some(reference) = reference else {
		print!("{}", SourceReporter::new(tables).render());
		return Ok(());
	};

	if reference.month > last_closed_month(now) {
		warn!(
			"reference {} is after the last closed month {}",
			reference.month.label(),
			last_closed_month(now).label()
		);
	}
	debug!(
		"building series for {} from {} at {}",
		reference.month.label(),
		reference.salary,
		now
	);

	let comparison = Comparison::build(reference, &tables, now)?;
	for source in IndexSource::PRICE_INDICES {
		if let Some(s) = comparison.series(source) {
			debug!(
				"{} anchored at {} ({}), last index {}",
				s.source,
				s.anchor_month.label(),
				s.anchor_value,
				s.rows.last().map(|r| r.index).unwrap_or_default()
			);
		}
	}
	let reporter = SeriesReporter::new(comparison, precision);
	reporter.print_warnings();

	match args.command {
		Directive::Table => print!("{}", reporter.render_table()),
		Directive::Summary => {
			print!("{}", reporter.render_summary(current_salary))
		},
		Directive::Csv => print!("{}", reporter.render_csv()),
		Directive::Sources => {},
	}

	Ok(())
}

/// Reads an amount typed on the command line. A "." followed by groups of
/// three digits is Brazilian thousands grouping, so "2.000" is two thousand;
/// otherwise a single "." or "," marks the decimals. Forms that read
/// differently in en-US, such as "2,000" or "2,000.50", are refused.
fn parse_salary(input: &str) -> Result<f64, Error> {
	let s = input.trim();
	let grouped = Regex::new(r"^-?\d{1,3}(\.\d{3})+(,\d+)?$")?;
	let plain = Regex::new(r"^-?\d+([.,]\d+)?$")?;
	let comma_grouped = Regex::new(r"^-?\d{1,3},\d{3}$")?;

	let normalized = if grouped.is_match(s) {
		s.replace('.', "").replace(',', ".")
	} else if plain.is_match(s) && !comma_grouped.is_match(s) {
		s.replace(',', ".")
	} else {
		bail!(
			"Ambiguous or invalid amount {:?}; write e.g. 2000, 2000,50 or \
			 2.000,50",
			input
		);
	};

	normalized
		.parse::<f64>()
		.map_err(|e| anyhow!("Invalid amount {:?}: {}", input, e))
}

/// Logs go to stderr so they never mix with a report on stdout.
fn init_logging(verbose: bool) {
	let level = if verbose { Level::DEBUG } else { Level::WARN };
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
