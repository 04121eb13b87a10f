use crate::{Result, Transaction, TransactionManager};

/// Dropping a guard without calling [`TxGuard::commit`] rolls the transaction back. Rollback
/// failures are logged and never replace the error that caused the rollback.
pub struct TxGuard {
	tx: Option<Box<dyn Transaction>>,
}
impl TxGuard {
	pub fn begin(manager: &dyn TransactionManager) -> Result<Self> {
		let tx = manager.begin()?;

		Ok(Self { tx: Some(tx) })
	}

	pub fn commit(mut self) -> Result<()> {
		match self.tx.take() {
			Some(tx) => tx.commit(),
			None => Ok(()),
		}
	}

	pub fn rollback(mut self) {
		self.rollback_open();
	}

	fn rollback_open(&mut self) {
		if let Some(tx) = self.tx.take()
			&& let Err(err) = tx.rollback()
		{
			tracing::warn!(error = %err, "Failed to roll back transaction.");
		}
	}
}
impl Drop for TxGuard {
	fn drop(&mut self) {
		self.rollback_open();
	}
}
