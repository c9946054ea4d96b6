//! Atomic-commit seam toward the durable store.
//!
//! Every multi-row protocol (reverse-then-apply across up to two accounts
//! plus one budget bucket plus the transaction record) runs inside one
//! [`TransactionExecutor::execute`] call. The store implementation wraps the
//! closure in a storage transaction: either every mutation performed inside
//! it commits, or none do.

use crate::errors::Result;

/// Trait for executing repository operations within one storage transaction.
pub trait TransactionExecutor: Send + Sync {
    /// Execute operations atomically and return the result.
    ///
    /// A returned error must roll back every repository mutation performed
    /// inside the closure.
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>;
}

/// Executor that runs the closure directly, with no transaction demarcation.
///
/// Suitable for in-memory repositories and tests, where each repository call
/// is already atomic.
#[derive(Debug, Clone, Default)]
pub struct ImmediateExecutor;

impl TransactionExecutor for ImmediateExecutor {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        f()
    }
}

impl<E: TransactionExecutor> TransactionExecutor for std::sync::Arc<E> {
    fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        (**self).execute(f)
    }
}
