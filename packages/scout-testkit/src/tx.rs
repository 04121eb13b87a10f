use std::sync::{Arc, Mutex};

use scout_service::{Error, Result, Transaction, TransactionManager};

use crate::{MemoryRepository, State};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TxCounts {
	pub begun: usize,
	pub committed: usize,
	pub rolled_back: usize,
}

#[derive(Default)]
pub(crate) struct TxState {
	counts: TxCounts,
	fail_begin: bool,
	fail_commit: bool,
	fail_rollback: bool,
}

impl MemoryRepository {
	pub fn tx_counts(&self) -> TxCounts {
		self.state().tx.counts
	}

	pub fn fail_begin(&self, fail: bool) {
		self.state().tx.fail_begin = fail;
	}

	pub fn fail_commit(&self, fail: bool) {
		self.state().tx.fail_commit = fail;
	}

	pub fn fail_rollback(&self, fail: bool) {
		self.state().tx.fail_rollback = fail;
	}
}
impl TransactionManager for MemoryRepository {
	fn begin(&self) -> Result<Box<dyn Transaction>> {
		let mut state = self.state();

		if state.tx.fail_begin {
			return Err(Error::Transaction { message: "begin refused".to_string() });
		}

		state.tx.counts.begun += 1;

		Ok(Box::new(MemoryTransaction { state: Arc::clone(&self.state) }))
	}
}

struct MemoryTransaction {
	state: Arc<Mutex<State>>,
}
impl Transaction for MemoryTransaction {
	fn commit(self: Box<Self>) -> Result<()> {
		let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());

		if state.tx.fail_commit {
			return Err(Error::Transaction { message: "commit refused".to_string() });
		}

		state.tx.counts.committed += 1;

		Ok(())
	}

	fn rollback(self: Box<Self>) -> Result<()> {
		let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());

		if state.tx.fail_rollback {
			return Err(Error::Transaction { message: "rollback refused".to_string() });
		}

		state.tx.counts.rolled_back += 1;

		Ok(())
	}
}
