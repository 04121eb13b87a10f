pub mod archive;
pub mod search;
pub mod tx;

mod error;

pub use error::{BackendError, Error, Result};
pub use search::SearchResults;
pub use tx::TxGuard;

use std::sync::Arc;

use scout_config::Config;
use scout_domain::{NodeRef, StoreRef};
use scout_query::{QueryBuilder, QuerySettings, QueryString};
use scout_view::{NodeSource, Normalizer, ViewSettings};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
	pub store: StoreRef,
	pub query: QueryString,
	pub limit: Option<usize>,
}

pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn query(&self, request: &SearchRequest) -> Result<Vec<NodeRef>, BackendError>;
}

pub trait Transaction {
	fn commit(self: Box<Self>) -> Result<()>;

	fn rollback(self: Box<Self>) -> Result<()>;
}

pub trait TransactionManager
where
	Self: Send + Sync,
{
	fn begin(&self) -> Result<Box<dyn Transaction>>;
}

#[derive(Clone)]
pub struct Backends {
	pub search: Arc<dyn SearchBackend>,
	pub transactions: Arc<dyn TransactionManager>,
	pub nodes: Arc<dyn NodeSource>,
}
impl Backends {
	pub fn new(
		search: Arc<dyn SearchBackend>,
		transactions: Arc<dyn TransactionManager>,
		nodes: Arc<dyn NodeSource>,
	) -> Self {
		Self { search, transactions, nodes }
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceSettings {
	pub store: StoreRef,
	pub max_results: Option<usize>,
	pub archive_store: StoreRef,
	pub archive_max_results: Option<usize>,
}
impl ServiceSettings {
	pub fn from_config(cfg: &Config) -> Result<Self> {
		let store = |label: &str, value: &str| {
			value
				.parse::<StoreRef>()
				.map_err(|err| Error::Settings { message: format!("{label}: {err}") })
		};

		Ok(Self {
			store: store("search.store", &cfg.search.store)?,
			max_results: limit(cfg.search.max_results),
			archive_store: store("archive.store", &cfg.archive.store)?,
			archive_max_results: limit(cfg.archive.max_results),
		})
	}
}
impl Default for ServiceSettings {
	fn default() -> Self {
		Self {
			store: StoreRef::workspace(),
			max_results: None,
			archive_store: StoreRef::archive(),
			archive_max_results: None,
		}
	}
}

pub struct SearchService {
	pub settings: ServiceSettings,
	pub backends: Backends,
	builder: QueryBuilder,
	normalizer: Normalizer,
}
impl SearchService {
	pub fn new(
		settings: ServiceSettings,
		query: QuerySettings,
		view: ViewSettings,
		backends: Backends,
	) -> Self {
		let normalizer = Normalizer::new(Arc::clone(&backends.nodes), view);

		Self { settings, backends, builder: QueryBuilder::new(query), normalizer }
	}

	pub fn from_config(cfg: &Config, backends: Backends) -> Result<Self> {
		Ok(Self::new(
			ServiceSettings::from_config(cfg)?,
			QuerySettings::from_config(cfg)?,
			ViewSettings::from_config(cfg)?,
			backends,
		))
	}

	pub fn builder(&self) -> &QueryBuilder {
		&self.builder
	}

	fn execute(
		&self,
		store: &StoreRef,
		limit: Option<usize>,
		query: QueryString,
	) -> Result<SearchResults> {
		let tx = TxGuard::begin(self.backends.transactions.as_ref())?;
		let request = SearchRequest { store: store.clone(), query, limit };
		let mut hits = self.backends.search.query(&request)?;

		if let Some(limit) = limit {
			hits.truncate(limit);
		}

		let rows = self.normalizer.normalize(&hits)?;

		tx.commit()?;

		tracing::info!(
			store = %request.store,
			hits = hits.len(),
			rows = rows.len(),
			"Search completed."
		);

		Ok(SearchResults { query: request.query, rows })
	}
}

fn limit(max_results: u32) -> Option<usize> {
	if max_results == 0 { None } else { Some(max_results as usize) }
}
