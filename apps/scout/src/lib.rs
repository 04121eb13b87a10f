use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre;
use time::{Date, OffsetDateTime, macros::format_description};
use tracing_subscriber::EnvFilter;

use scout_config::Config;
use scout_domain::{NamespacePrefixes, NodeRef, QName};
use scout_query::{
	ArchiveCriteria, ArchiveTextMode, ArchivedWithin, QueryBuilder, QuerySettings, RangeFilter,
	SavedSearch, SearchCriteria, SearchMode,
};

const RANGE_SEPARATOR: &str = "..";

#[derive(Debug, Parser)]
#[command(
	version = scout_cli::VERSION,
	rename_all = "kebab",
	styles = scout_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Print the query for the given criteria or saved search.
	Query {
		#[command(flatten)]
		criteria: CriteriaArgs,
		#[arg(long, value_name = "FILE")]
		saved: Option<PathBuf>,
	},
	/// Print the query listing deleted items in the archive store.
	Archive(ArchiveArgs),
	/// Write the given criteria out as a saved search.
	Save {
		#[command(flatten)]
		criteria: CriteriaArgs,
		#[arg(long, short = 'o', value_name = "FILE")]
		output: Option<PathBuf>,
	},
}

#[derive(Debug, Default, clap::Args)]
pub struct CriteriaArgs {
	/// Free text; wrap it in double quotes to search for a phrase.
	#[arg(long, short = 't', default_value = "")]
	pub text: String,
	#[arg(long, short = 'm', default_value = "all")]
	pub mode: SearchMode,
	#[arg(long, value_name = "PATH")]
	pub scope: Option<String>,
	/// Only search direct children of the scope.
	#[arg(long)]
	pub children_only: bool,
	#[arg(long = "category", value_name = "PATH")]
	pub categories: Vec<String>,
	#[arg(long = "attribute", value_name = "QNAME=VALUE")]
	pub attributes: Vec<String>,
	#[arg(long = "fixed", value_name = "QNAME=VALUE")]
	pub fixed_values: Vec<String>,
	#[arg(long = "range", value_name = "QNAME=LOWER..UPPER")]
	pub ranges: Vec<String>,
	#[arg(long = "exclusive-range", value_name = "QNAME=LOWER..UPPER")]
	pub exclusive_ranges: Vec<String>,
	#[arg(long, value_name = "QNAME")]
	pub content_type: Option<String>,
	#[arg(long, value_name = "QNAME")]
	pub folder_type: Option<String>,
	#[arg(long)]
	pub mimetype: Option<String>,
	#[arg(long = "also-match", value_name = "QNAME")]
	pub simple_search_attributes: Vec<String>,
	/// Require every search term instead of any.
	#[arg(long = "and")]
	pub force_and_terms: bool,
}

#[derive(Debug, clap::Args)]
pub struct ArchiveArgs {
	#[arg(long, short = 't', default_value = "")]
	pub text: String,
	/// Match the text against content as well as names.
	#[arg(long)]
	pub content: bool,
	#[arg(long, value_name = "USER")]
	pub archived_by: Option<String>,
	#[arg(long, value_enum, conflicts_with_all = ["from", "to"])]
	pub within: Option<Within>,
	#[arg(long, value_name = "YYYY-MM-DD", requires = "to")]
	pub from: Option<String>,
	#[arg(long, value_name = "YYYY-MM-DD", requires = "from")]
	pub to: Option<String>,
	#[arg(long, value_name = "NODEREF")]
	pub root: Option<NodeRef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Within {
	Today,
	LastWeek,
	LastMonth,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = scout_config::load(&args.config)?;
	init_tracing(&config)?;
	let builder = QueryBuilder::new(QuerySettings::from_config(&config)?);
	let prefixes = scout_config::prefixes(&config);

	match args.command {
		Command::Query { criteria, saved } => {
			let criteria = match saved {
				Some(path) => SavedSearch::from_json(&fs::read_to_string(path)?)?.criteria,
				None => criteria.into_criteria(&prefixes)?,
			};
			let query = builder.build(&criteria)?;

			println!("{query}");
		},
		Command::Archive(archive) => {
			let criteria = archive.into_criteria()?;
			let query =
				scout_query::build_archive_query(&criteria, &builder, OffsetDateTime::now_utc())?;

			println!("{query}");
		},
		Command::Save { criteria, output } => {
			let saved = SavedSearch::new(criteria.into_criteria(&prefixes)?, &builder)?;
			let json = saved.to_json()?;

			match output {
				Some(path) => {
					fs::write(&path, json)?;

					tracing::info!(path = %path.display(), "Saved search written.");
				},
				None => println!("{json}"),
			}
		},
	}

	Ok(())
}

impl CriteriaArgs {
	pub fn into_criteria(self, prefixes: &NamespacePrefixes) -> color_eyre::Result<SearchCriteria> {
		let mut criteria = SearchCriteria::new(self.text)
			.with_mode(self.mode)
			.with_force_and_terms(self.force_and_terms);

		if let Some(scope) = self.scope {
			criteria = criteria.with_scope(scope, !self.children_only);
		}

		for category in self.categories {
			criteria = criteria.add_category(category);
		}
		for assignment in &self.attributes {
			let (attribute, value) = parse_assignment(prefixes, assignment)?;

			criteria = criteria.add_attribute(attribute, value);
		}
		for assignment in &self.fixed_values {
			let (attribute, value) = parse_assignment(prefixes, assignment)?;

			criteria = criteria.add_fixed_value(attribute, value);
		}
		for (assignments, inclusive) in [(&self.ranges, true), (&self.exclusive_ranges, false)] {
			for assignment in assignments {
				let (attribute, range) = parse_assignment(prefixes, assignment)?;
				let (lower, upper) = range.split_once(RANGE_SEPARATOR).ok_or_else(|| {
					eyre::eyre!("Range '{assignment}' must look like QNAME=LOWER..UPPER.")
				})?;

				criteria = criteria.add_range(attribute, RangeFilter::new(lower, upper, inclusive));
			}
		}

		if let Some(content_type) = self.content_type {
			criteria = criteria.with_content_type(prefixes.resolve(&content_type)?);
		}
		if let Some(folder_type) = self.folder_type {
			criteria = criteria.with_folder_type(prefixes.resolve(&folder_type)?);
		}
		if let Some(mimetype) = self.mimetype {
			criteria = criteria.with_mimetype(mimetype);
		}

		for attribute in &self.simple_search_attributes {
			criteria = criteria.add_simple_search_attribute(prefixes.resolve(attribute)?);
		}

		Ok(criteria)
	}
}

impl ArchiveArgs {
	pub fn into_criteria(self) -> color_eyre::Result<ArchiveCriteria> {
		let archived = match (self.within, self.from, self.to) {
			(Some(Within::Today), ..) => Some(ArchivedWithin::Today),
			(Some(Within::LastWeek), ..) => Some(ArchivedWithin::LastWeek),
			(Some(Within::LastMonth), ..) => Some(ArchivedWithin::LastMonth),
			(None, Some(from), Some(to)) =>
				Some(ArchivedWithin::Between { from: parse_date(&from)?, to: parse_date(&to)? }),
			_ => None,
		};
		let text_mode = if self.content { ArchiveTextMode::Content } else { ArchiveTextMode::Name };

		Ok(ArchiveCriteria {
			text: self.text,
			text_mode,
			archived_by: self.archived_by,
			archived,
			root: self.root,
		})
	}
}

fn parse_assignment(
	prefixes: &NamespacePrefixes,
	assignment: &str,
) -> color_eyre::Result<(QName, String)> {
	let (attribute, value) = assignment
		.split_once('=')
		.ok_or_else(|| eyre::eyre!("Expected QNAME=VALUE, got '{assignment}'."))?;

	Ok((prefixes.resolve(attribute)?, value.to_string()))
}

fn parse_date(value: &str) -> color_eyre::Result<Date> {
	Ok(Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))?)
}

fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
	Ok(())
}
