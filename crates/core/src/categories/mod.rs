//! Categories module - resolver seam used by the ledger engine.
//!
//! Category CRUD lives outside this crate; the engine only needs to resolve
//! a category id scoped to its owner before recording a categorized expense.

mod categories_model;
mod categories_traits;

pub use categories_model::Category;
pub use categories_traits::CategoryResolverTrait;
