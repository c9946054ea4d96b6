//! Category resolver trait.

use super::categories_model::Category;
use crate::errors::Result;

/// Resolves a category id scoped to the requesting user.
///
/// Implementations return `Error::NotFound` when the category does not exist
/// or belongs to another user.
pub trait CategoryResolverTrait: Send + Sync {
    fn get_by_id(&self, category_id: &str, user_id: &str) -> Result<Category>;
}
