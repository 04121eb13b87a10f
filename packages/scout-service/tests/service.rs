use std::sync::Arc;

use time::macros::datetime;

use scout_domain::{NodeRef, StoreRef};
use scout_query::{ArchiveCriteria, QueryBuilder, QuerySettings, SearchCriteria};
use scout_service::{Backends, Error, SearchService, ServiceSettings, TransactionManager, TxGuard};
use scout_testkit::{MemoryRepository, TxCounts};
use scout_view::{ContentData, ViewSettings};

struct Fixture {
	repo: Arc<MemoryRepository>,
	projects: NodeRef,
	report: NodeRef,
}

fn fixture() -> Fixture {
	let repo = Arc::new(MemoryRepository::new());
	let home = repo.company_home();
	let projects = repo.add_folder(&home, "Projects");
	let report = repo.add_content(
		&projects,
		"report.pdf",
		Some(ContentData {
			mimetype: "application/pdf".to_string(),
			encoding: "UTF-8".to_string(),
			size: 10,
		}),
	);

	repo.set_hits(vec![report.clone(), projects.clone()]);

	Fixture { repo, projects, report }
}

fn service(repo: &Arc<MemoryRepository>, settings: ServiceSettings) -> SearchService {
	SearchService::new(
		settings,
		QuerySettings::default(),
		ViewSettings::default(),
		Backends::new(repo.clone(), repo.clone(), repo.clone()),
	)
}

fn counts(begun: usize, committed: usize, rolled_back: usize) -> TxCounts {
	TxCounts { begun, committed, rolled_back }
}

#[test]
fn successful_search_commits_and_normalizes() {
	let Fixture { repo, projects, report } = fixture();
	let service =
		service(&repo, ServiceSettings { max_results: Some(50), ..ServiceSettings::default() });
	let criteria = SearchCriteria::new("report");
	let results = service.search(&criteria).expect("search");
	let requests = repo.requests();

	assert_eq!(results.rows.content[0].node(), &report);
	assert_eq!(results.rows.containers[0].node(), &projects);
	assert_eq!(repo.tx_counts(), counts(1, 1, 0));
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].store, StoreRef::workspace());
	assert_eq!(requests[0].limit, Some(50));
	assert_eq!(requests[0].query, QueryBuilder::default().build(&criteria).expect("query"));
	assert_eq!(results.query, requests[0].query);
}

#[test]
fn insufficient_criteria_never_opens_a_transaction() {
	let Fixture { repo, .. } = fixture();
	let err = service(&repo, ServiceSettings::default())
		.search(&SearchCriteria::new(" "))
		.expect_err("empty search");

	assert!(matches!(err, Error::Query(scout_query::Error::InsufficientCriteria { .. })));
	assert!(err.user_message().contains("at least 1 characters"));
	assert_eq!(repo.tx_counts(), TxCounts::default());
	assert!(repo.requests().is_empty());
}

#[test]
fn backend_failure_rolls_back() {
	let Fixture { repo, .. } = fixture();

	repo.fail_search(Some("index offline"));

	let err = service(&repo, ServiceSettings::default())
		.search(&SearchCriteria::new("report"))
		.expect_err("backend failure");

	assert!(matches!(err, Error::Backend(ref inner) if inner.message == "index offline"));
	assert!(err.user_message().starts_with("The search could not be completed."));
	assert_eq!(repo.tx_counts(), counts(1, 0, 1));
}

#[test]
fn rollback_failure_keeps_the_original_error() {
	let Fixture { repo, .. } = fixture();

	repo.fail_search(Some("index offline"));
	repo.fail_rollback(true);

	let err = service(&repo, ServiceSettings::default())
		.search(&SearchCriteria::new("report"))
		.expect_err("backend failure");

	assert!(matches!(err, Error::Backend(_)));
	assert_eq!(repo.tx_counts(), counts(1, 0, 0));
}

#[test]
fn transaction_failures_are_reported() {
	let Fixture { repo, .. } = fixture();

	repo.fail_begin(true);

	let begin = service(&repo, ServiceSettings::default())
		.search(&SearchCriteria::new("report"))
		.expect_err("begin failure");

	assert!(matches!(begin, Error::Transaction { .. }));
	assert!(repo.requests().is_empty());

	repo.fail_begin(false);
	repo.fail_commit(true);

	let commit = service(&repo, ServiceSettings::default())
		.search(&SearchCriteria::new("report"))
		.expect_err("commit failure");

	assert!(matches!(commit, Error::Transaction { .. }));
	assert!(commit.user_message().starts_with("A system error happened during the operation"));
}

#[test]
fn normalization_failure_rolls_back() {
	let Fixture { repo, .. } = fixture();

	repo.fail_lookups(Some("node service unavailable"));

	let err = service(&repo, ServiceSettings::default())
		.search(&SearchCriteria::new("report"))
		.expect_err("lookup failure");

	assert!(matches!(err, Error::View(scout_view::Error::Source(_))));
	assert_eq!(repo.tx_counts(), counts(1, 0, 1));
}

#[test]
fn max_results_caps_the_hits() {
	let Fixture { repo, .. } = fixture();
	let settings = ServiceSettings { max_results: Some(1), ..ServiceSettings::default() };
	let results =
		service(&repo, settings).search(&SearchCriteria::new("report")).expect("search");

	assert_eq!(results.rows.len(), 1);
}

#[test]
fn archive_search_targets_the_archive_store() {
	let Fixture { repo, .. } = fixture();
	let settings = ServiceSettings { archive_max_results: Some(500), ..ServiceSettings::default() };
	let results = service(&repo, settings)
		.search_archive(&ArchiveCriteria::default(), datetime!(2024-05-10 15:00 UTC))
		.expect("archive search");
	let requests = repo.requests();

	assert!(results.query.as_str().starts_with("ASPECT:"));
	assert_eq!(requests[0].store, StoreRef::archive());
	assert_eq!(requests[0].limit, Some(500));
	assert_eq!(repo.tx_counts(), counts(1, 1, 0));
}

#[test]
fn guard_rolls_back_unless_committed() {
	let repo = MemoryRepository::new();
	let manager: &dyn TransactionManager = &repo;

	drop(TxGuard::begin(manager).expect("begin"));

	TxGuard::begin(manager).expect("begin").commit().expect("commit");
	TxGuard::begin(manager).expect("begin").rollback();

	assert_eq!(repo.tx_counts(), counts(3, 1, 2));
}

#[test]
fn service_builds_from_config() {
	let Fixture { repo, .. } = fixture();
	let cfg: scout_config::Config = toml::from_str(
		r#"
[service]
log_level = "info"

[search]
minimum_length = 3
max_results = 0

[archive]
store = "archive://SpacesStore"
max_results = 25
"#,
	)
	.expect("Failed to parse config.");
	let service =
		SearchService::from_config(&cfg, Backends::new(repo.clone(), repo.clone(), repo.clone()))
			.expect("service");

	assert_eq!(service.settings.max_results, None);
	assert_eq!(service.settings.archive_max_results, Some(25));
	assert_eq!(service.builder().settings().minimum_length, 3);

	let err = service.search(&SearchCriteria::new("ab")).expect_err("too short");

	assert!(err.user_message().contains("at least 3 characters"));
}
